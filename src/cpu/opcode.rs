//! The ALU operation catalogue.
//!
//! Codes are assigned in catalogue order starting at 0:
//!
//! | Code | Op     | Arity |
//! |------|--------|-------|
//! | 0    | INC    | 1     |
//! | 1    | DEC    | 1     |
//! | 2    | ADD    | 2     |
//! | 3    | SUB    | 2     |
//! | 4    | MUL    | 2     |
//! | 5    | DIV    | 2     |
//! | 6    | AND    | 2     |
//! | 7    | OR     | 2     |
//! | 8    | XOR    | 2     |
//! | 9    | NOT    | 1     |
//! | 10   | RSHIFT | 2     |
//! | 11   | LSHIFT | 2     |
//! | 12   | CMP    | 2     |
//!
//! Arithmetic wraps on overflow. Shift counts use only the low five bits of
//! the second operand.

use crate::cpu::alu::AluError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Number of operations in the catalogue.
pub const OPCODE_COUNT: usize = 13;

/// An ALU operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpCode {
    /// arg1 + 1
    Inc,
    /// arg1 - 1
    Dec,
    Add,
    Sub,
    Mul,
    /// Integer division truncating toward zero.
    Div,
    And,
    Or,
    Xor,
    /// Bitwise complement of arg1.
    Not,
    /// Arithmetic right shift of arg1 by arg2.
    RShift,
    /// Left shift of arg1 by arg2.
    LShift,
    /// Compare arg1 with arg2; sets status flags instead of producing a value.
    Cmp,
}

/// Number of operands an operation takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    Unary,
    Binary,
}

impl Arity {
    pub const fn count(self) -> usize {
        match self {
            Arity::Unary => 1,
            Arity::Binary => 2,
        }
    }
}

/// Result of evaluating an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Value(i32),
    /// Ordering of arg1 relative to arg2, produced by CMP.
    Compare(Ordering),
}

impl OpCode {
    /// All operations in code order.
    pub const ALL: [OpCode; OPCODE_COUNT] = [
        OpCode::Inc,
        OpCode::Dec,
        OpCode::Add,
        OpCode::Sub,
        OpCode::Mul,
        OpCode::Div,
        OpCode::And,
        OpCode::Or,
        OpCode::Xor,
        OpCode::Not,
        OpCode::RShift,
        OpCode::LShift,
        OpCode::Cmp,
    ];

    /// Look up an operation by numeric code.
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn arity(self) -> Arity {
        match self {
            OpCode::Inc | OpCode::Dec | OpCode::Not => Arity::Unary,
            _ => Arity::Binary,
        }
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Inc => "INC",
            OpCode::Dec => "DEC",
            OpCode::Add => "ADD",
            OpCode::Sub => "SUB",
            OpCode::Mul => "MUL",
            OpCode::Div => "DIV",
            OpCode::And => "AND",
            OpCode::Or => "OR",
            OpCode::Xor => "XOR",
            OpCode::Not => "NOT",
            OpCode::RShift => "RSHIFT",
            OpCode::LShift => "LSHIFT",
            OpCode::Cmp => "CMP",
        }
    }

    /// Evaluate the operation.
    ///
    /// Unary operations ignore `b`; callers pass 0 in its place.
    pub fn evaluate(self, a: i32, b: i32) -> Result<Outcome, AluError> {
        let value = match self {
            OpCode::Inc => a.wrapping_add(1),
            OpCode::Dec => a.wrapping_sub(1),
            OpCode::Add => a.wrapping_add(b),
            OpCode::Sub => a.wrapping_sub(b),
            OpCode::Mul => a.wrapping_mul(b),
            OpCode::Div => {
                if b == 0 {
                    return Err(AluError::DivisionByZero);
                }
                a.wrapping_div(b)
            }
            OpCode::And => a & b,
            OpCode::Or => a | b,
            OpCode::Xor => a ^ b,
            OpCode::Not => !a,
            OpCode::RShift => a.wrapping_shr(b as u32),
            OpCode::LShift => a.wrapping_shl(b as u32),
            OpCode::Cmp => return Ok(Outcome::Compare(a.cmp(&b))),
        };
        Ok(Outcome::Value(value))
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Error for an unrecognized mnemonic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mnemonic: {0}")]
pub struct ParseOpCodeError(pub String);

impl FromStr for OpCode {
    type Err = ParseOpCodeError;

    /// Accepts a mnemonic in any case or a numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        if let Some(op) = Self::ALL.iter().find(|op| op.mnemonic() == upper) {
            return Ok(*op);
        }
        upper
            .parse::<i32>()
            .ok()
            .and_then(Self::from_code)
            .ok_or_else(|| ParseOpCodeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(op: OpCode, a: i32, b: i32) -> i32 {
        match op.evaluate(a, b).unwrap() {
            Outcome::Value(v) => v,
            other => panic!("{} produced {:?}", op, other),
        }
    }

    #[test]
    fn test_codes_follow_catalogue_order() {
        for (i, op) in OpCode::ALL.iter().enumerate() {
            assert_eq!(op.code(), i as i32);
            assert_eq!(OpCode::from_code(i as i32), Some(*op));
        }
        assert_eq!(OpCode::Cmp.code(), 12);
    }

    #[test]
    fn test_from_code_out_of_range() {
        assert_eq!(OpCode::from_code(-1), None);
        assert_eq!(OpCode::from_code(OPCODE_COUNT as i32), None);
        assert_eq!(OpCode::from_code(i32::MAX), None);
    }

    #[test]
    fn test_arity() {
        let unary: Vec<_> = OpCode::ALL
            .iter()
            .filter(|op| op.arity() == Arity::Unary)
            .collect();
        assert_eq!(unary, vec![&OpCode::Inc, &OpCode::Dec, &OpCode::Not]);
        assert_eq!(OpCode::Cmp.arity().count(), 2);
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(value(OpCode::Inc, 5, 0), 6);
        assert_eq!(value(OpCode::Dec, 5, 0), 4);
        assert_eq!(value(OpCode::Add, 3, 4), 7);
        assert_eq!(value(OpCode::Sub, 3, 4), -1);
        assert_eq!(value(OpCode::Mul, -6, 7), -42);
        assert_eq!(value(OpCode::Div, 7, 2), 3);
        assert_eq!(value(OpCode::Div, -7, 2), -3);
    }

    #[test]
    fn test_arithmetic_wraps() {
        assert_eq!(value(OpCode::Inc, i32::MAX, 0), i32::MIN);
        assert_eq!(value(OpCode::Dec, i32::MIN, 0), i32::MAX);
        assert_eq!(value(OpCode::Div, i32::MIN, -1), i32::MIN);
    }

    #[test]
    fn test_logic() {
        assert_eq!(value(OpCode::And, 0b1100, 0b1010), 0b1000);
        assert_eq!(value(OpCode::Or, 0b1100, 0b1010), 0b1110);
        assert_eq!(value(OpCode::Xor, 0b1100, 0b1010), 0b0110);
        assert_eq!(value(OpCode::Not, 5, 0), -6);
    }

    #[test]
    fn test_shifts() {
        assert_eq!(value(OpCode::RShift, 16, 2), 4);
        assert_eq!(value(OpCode::RShift, -16, 2), -4);
        assert_eq!(value(OpCode::LShift, 1, 4), 16);
        // Counts use the low five bits.
        assert_eq!(value(OpCode::LShift, 1, 33), 2);
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(OpCode::Div.evaluate(1, 0), Err(AluError::DivisionByZero));
    }

    #[test]
    fn test_cmp_is_mathematical() {
        assert_eq!(OpCode::Cmp.evaluate(5, 5), Ok(Outcome::Compare(Ordering::Equal)));
        assert_eq!(OpCode::Cmp.evaluate(2, 7), Ok(Outcome::Compare(Ordering::Less)));
        // a - b overflows here, the comparison must not.
        assert_eq!(
            OpCode::Cmp.evaluate(i32::MAX, -1),
            Ok(Outcome::Compare(Ordering::Greater))
        );
    }

    #[test]
    fn test_parse_mnemonic() {
        assert_eq!("add".parse::<OpCode>(), Ok(OpCode::Add));
        assert_eq!("RSHIFT".parse::<OpCode>(), Ok(OpCode::RShift));
        assert_eq!("12".parse::<OpCode>(), Ok(OpCode::Cmp));
        assert!("13".parse::<OpCode>().is_err());
        assert!("NOP".parse::<OpCode>().is_err());
    }
}
