//! Single storage cells.
//!
//! A [`Register`] holds an optional value and is undefined until it is first
//! written. The [`StatusRegister`] keeps its value defined at all times and
//! carves the low three bits into the Zero, Carry and Negative flags.

use crate::cpu::registers::RegisterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A general-purpose register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Register {
    value: Option<i32>,
}

impl Register {
    /// Create an unwritten register.
    pub const fn new() -> Self {
        Self { value: None }
    }

    /// Raw contents, `None` until the first write.
    pub fn value(&self) -> Option<i32> {
        self.value
    }

    /// Read the register. `address` only labels the error.
    pub fn read(&self, address: usize) -> Result<i32, RegisterError> {
        self.value.ok_or(RegisterError::Uninitialized(address))
    }

    pub fn write(&mut self, value: i32) {
        self.value = Some(value);
    }

    pub fn is_written(&self) -> bool {
        self.value.is_some()
    }

    /// Return to the unwritten state.
    pub fn clear(&mut self) {
        self.value = None;
    }
}

/// A condition flag held in the status register.
///
/// The discriminant is the bit position inside the register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flag {
    Zero = 0,
    Carry = 1,
    Negative = 2,
}

impl Flag {
    pub const ALL: [Flag; 3] = [Flag::Zero, Flag::Carry, Flag::Negative];

    /// Bit mask of this flag within the status value.
    #[inline]
    pub const fn mask(self) -> i32 {
        1 << self as u32
    }

    /// Single-letter name used by the string flag API.
    pub const fn name(self) -> &'static str {
        match self {
            Flag::Zero => "Z",
            Flag::Carry => "C",
            Flag::Negative => "N",
        }
    }
}

impl FromStr for Flag {
    type Err = RegisterError;

    /// Exactly `"Z"`, `"C"` or `"N"`; lowercase is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Z" => Ok(Flag::Zero),
            "C" => Ok(Flag::Carry),
            "N" => Ok(Flag::Negative),
            other => Err(RegisterError::InvalidFlagName(other.to_string())),
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of the three condition flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusFlags {
    pub zero: bool,
    pub carry: bool,
    pub negative: bool,
}

impl StatusFlags {
    /// Decode the flag bits of a status value. Higher bits are ignored.
    pub fn from_bits(bits: i32) -> Self {
        Self {
            zero: bits & Flag::Zero.mask() != 0,
            carry: bits & Flag::Carry.mask() != 0,
            negative: bits & Flag::Negative.mask() != 0,
        }
    }

    pub fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::Zero => self.zero,
            Flag::Carry => self.carry,
            Flag::Negative => self.negative,
        }
    }

    /// Number of asserted flags.
    pub fn count(&self) -> usize {
        Flag::ALL.iter().filter(|&&flag| self.get(flag)).count()
    }
}

impl fmt::Display for StatusFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Z={} C={} N={}",
            self.zero as u8, self.carry as u8, self.negative as u8
        )
    }
}

/// The status register at address 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusRegister {
    value: i32,
}

impl StatusRegister {
    /// Create a status register with every flag clear.
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// Raw status value, flags included.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Overwrite the whole value. Bits above the flags are kept as written.
    pub fn write(&mut self, value: i32) {
        self.value = value;
    }

    pub fn flag(&self, flag: Flag) -> bool {
        self.value & flag.mask() != 0
    }

    pub fn set_flag(&mut self, flag: Flag, state: bool) {
        if state {
            self.value |= flag.mask();
        } else {
            self.value &= !flag.mask();
        }
    }

    pub fn clear_flags(&mut self) {
        for flag in Flag::ALL {
            self.set_flag(flag, false);
        }
    }

    pub fn flags(&self) -> StatusFlags {
        StatusFlags::from_bits(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_starts_unwritten() {
        let reg = Register::new();
        assert_eq!(reg.value(), None);
        assert_eq!(reg.read(3), Err(RegisterError::Uninitialized(3)));
    }

    #[test]
    fn test_register_write_then_clear() {
        let mut reg = Register::new();
        reg.write(-7);
        assert_eq!(reg.read(1), Ok(-7));

        reg.clear();
        assert!(!reg.is_written());
    }

    #[test]
    fn test_flag_bit_layout() {
        assert_eq!(Flag::Zero.mask(), 1);
        assert_eq!(Flag::Carry.mask(), 2);
        assert_eq!(Flag::Negative.mask(), 4);
    }

    #[test]
    fn test_flag_names_are_case_sensitive() {
        assert_eq!("Z".parse::<Flag>(), Ok(Flag::Zero));
        assert_eq!("C".parse::<Flag>(), Ok(Flag::Carry));
        assert_eq!("N".parse::<Flag>(), Ok(Flag::Negative));
        assert_eq!(
            "z".parse::<Flag>(),
            Err(RegisterError::InvalidFlagName("z".to_string()))
        );
        assert!("P".parse::<Flag>().is_err());
        assert!("".parse::<Flag>().is_err());
    }

    #[test]
    fn test_status_flags_are_independent() {
        let mut status = StatusRegister::new();
        status.set_flag(Flag::Carry, true);
        status.set_flag(Flag::Negative, true);
        assert_eq!(status.value(), 6);

        status.set_flag(Flag::Carry, false);
        assert!(!status.flag(Flag::Carry));
        assert!(status.flag(Flag::Negative));
        assert!(!status.flag(Flag::Zero));
    }

    #[test]
    fn test_clear_flags_keeps_high_bits() {
        let mut status = StatusRegister::new();
        status.write(0b1111);
        status.clear_flags();
        assert_eq!(status.value(), 0b1000);
        assert_eq!(status.flags().count(), 0);
    }

    #[test]
    fn test_status_flags_display() {
        let flags = StatusFlags::from_bits(Flag::Carry.mask());
        assert_eq!(flags.to_string(), "Z=0 C=1 N=0");
    }
}
