//! The arithmetic-logic unit.
//!
//! The ALU owns the register file. It validates an opcode and its operand
//! count against the [`OpCode`] table, evaluates the operation and, for CMP,
//! records the comparison in the status flags.

use crate::cpu::opcode::{OpCode, Outcome, OPCODE_COUNT};
use crate::cpu::register::Flag;
use crate::cpu::registers::{RegisterError, Registers};
use std::cmp::Ordering;
use thiserror::Error;

/// Errors raised by [`Alu::compute`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AluError {
    #[error("OP code {0} doesn't exist")]
    UnknownOpCode(i32),

    #[error("{op} takes {expected} argument(s), got {actual}")]
    ArityMismatch {
        op: OpCode,
        expected: usize,
        actual: usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("register error: {0}")]
    Register(#[from] RegisterError),
}

/// An ALU with its register file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alu {
    registers: Registers,
}

impl Alu {
    /// Create an ALU with `register_count` general-purpose registers.
    pub fn new(register_count: i64) -> Result<Self, AluError> {
        Ok(Self {
            registers: Registers::new(register_count)?,
        })
    }

    /// Take ownership of an existing register file.
    pub fn from_registers(registers: Registers) -> Self {
        Self { registers }
    }

    /// Give the register file back, consuming the ALU.
    pub fn into_registers(self) -> Registers {
        self.registers
    }

    /// Run operation `opcode` on the supplied operands.
    ///
    /// Returns `None` for CMP, which only updates the status flags.
    pub fn compute(&mut self, opcode: i32, arg1: i32, arg2: Option<i32>) -> Result<Option<i32>, AluError> {
        let op = OpCode::from_code(opcode).ok_or(AluError::UnknownOpCode(opcode))?;
        self.compute_op(op, arg1, arg2)
    }

    /// Typed variant of [`Alu::compute`].
    pub fn compute_op(&mut self, op: OpCode, arg1: i32, arg2: Option<i32>) -> Result<Option<i32>, AluError> {
        let expected = op.arity().count();
        let actual = 1 + usize::from(arg2.is_some());
        if expected != actual {
            return Err(AluError::ArityMismatch { op, expected, actual });
        }

        log::trace!("{} {} {:?}", op, arg1, arg2);

        match op.evaluate(arg1, arg2.unwrap_or(0))? {
            Outcome::Value(value) => Ok(Some(value)),
            Outcome::Compare(ordering) => {
                self.record_comparison(ordering);
                Ok(None)
            }
        }
    }

    /// Clear Z, C and N, then set the one matching `ordering`.
    fn record_comparison(&mut self, ordering: Ordering) {
        let status = self.registers.status_mut();
        status.clear_flags();
        let flag = match ordering {
            Ordering::Less => Flag::Negative,
            Ordering::Greater => Flag::Carry,
            Ordering::Equal => Flag::Zero,
        };
        status.set_flag(flag, true);
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    /// Write a register through the ALU.
    pub fn set_register(&mut self, address: i64, value: i32) -> Result<(), AluError> {
        Ok(self.registers.write(address, value)?)
    }

    pub fn read_register(&self, address: i64) -> Result<i32, AluError> {
        Ok(self.registers.read(address)?)
    }
}
