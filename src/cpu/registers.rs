//! The register file.
//!
//! Address 0 is always the status register; addresses `1..=N` are
//! general-purpose registers that stay undefined until written.
//!
//! Address 0 is meant to change only through the flag operations. A direct
//! write to it is still carried out but logs a warning.

use crate::cpu::register::{Flag, Register, StatusFlags, StatusRegister};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Address of the status register.
pub const STATUS_ADDRESS: usize = 0;

/// General-purpose register count used by [`Registers::default`].
pub const DEFAULT_REGISTER_COUNT: usize = 8;

/// Errors raised by register file access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("register count can't be negative: {0}")]
    InvalidConstruction(i64),

    #[error("register address {address} out of range (0-{max})")]
    OutOfBounds { address: i64, max: usize },

    #[error("register {0} read before it was written")]
    Uninitialized(usize),

    #[error("illegal flag name {0:?}, expected one of \"Z\", \"C\", \"N\"")]
    InvalidFlagName(String),

    #[error("missing {0}")]
    NullArgument(&'static str),
}

/// Status register plus `N` general-purpose registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers {
    status: StatusRegister,
    general: Vec<Register>,
}

impl Registers {
    /// Create a file with `count` general-purpose registers.
    ///
    /// A count of 0 yields a file holding only the status register.
    pub fn new(count: i64) -> Result<Self, RegisterError> {
        let count = usize::try_from(count).map_err(|_| RegisterError::InvalidConstruction(count))?;
        Ok(Self {
            status: StatusRegister::new(),
            general: vec![Register::new(); count],
        })
    }

    /// Number of addressable slots, status register included.
    pub fn len(&self) -> usize {
        self.general.len() + 1
    }

    /// Always false: slot 0 exists in every file.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of general-purpose registers.
    pub fn general_count(&self) -> usize {
        self.general.len()
    }

    /// Highest valid address.
    pub fn max_address(&self) -> usize {
        self.general.len()
    }

    pub fn status(&self) -> &StatusRegister {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusRegister {
        &mut self.status
    }

    /// Validate an address and turn it into a slot index.
    fn slot(&self, address: i64) -> Result<usize, RegisterError> {
        usize::try_from(address)
            .ok()
            .filter(|&index| index <= self.max_address())
            .ok_or(RegisterError::OutOfBounds {
                address,
                max: self.max_address(),
            })
    }

    /// Read the register at `address`.
    pub fn read(&self, address: i64) -> Result<i32, RegisterError> {
        match self.slot(address)? {
            STATUS_ADDRESS => Ok(self.status.value()),
            index => self.general[index - 1].read(index),
        }
    }

    /// Raw contents of a register, `None` if it was never written.
    pub fn get(&self, address: i64) -> Result<Option<i32>, RegisterError> {
        match self.slot(address)? {
            STATUS_ADDRESS => Ok(Some(self.status.value())),
            index => Ok(self.general[index - 1].value()),
        }
    }

    /// Write `value` to the register at `address`.
    pub fn write(&mut self, address: i64, value: i32) -> Result<(), RegisterError> {
        match self.slot(address)? {
            STATUS_ADDRESS => {
                log::warn!("Did you mean to overwrite status register?");
                self.status.write(value);
            }
            index => self.general[index - 1].write(value),
        }
        Ok(())
    }

    pub fn flag(&self, flag: Flag) -> bool {
        self.status.flag(flag)
    }

    pub fn set_flag(&mut self, flag: Flag, state: bool) {
        self.status.set_flag(flag, state);
    }

    pub fn flags(&self) -> StatusFlags {
        self.status.flags()
    }

    /// Change a status flag by its single-letter name.
    ///
    /// # Errors
    /// [`RegisterError::NullArgument`] when `name` is `None`,
    /// [`RegisterError::InvalidFlagName`] for anything but `"Z"`, `"C"` or `"N"`.
    pub fn set_flag_by_name(&mut self, name: Option<&str>, state: bool) -> Result<(), RegisterError> {
        let flag = Self::parse_flag(name)?;
        self.status.set_flag(flag, state);
        Ok(())
    }

    /// Read a status flag by its single-letter name.
    pub fn flag_by_name(&self, name: Option<&str>) -> Result<bool, RegisterError> {
        Ok(self.status.flag(Self::parse_flag(name)?))
    }

    fn parse_flag(name: Option<&str>) -> Result<Flag, RegisterError> {
        name.ok_or(RegisterError::NullArgument("flag name"))?.parse()
    }

    /// Clear the status register and forget every general register value.
    pub fn reset(&mut self) {
        self.status = StatusRegister::new();
        for reg in &mut self.general {
            reg.clear();
        }
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            status: StatusRegister::new(),
            general: vec![Register::new(); DEFAULT_REGISTER_COUNT],
        }
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "R0 (status) = {} [{}]", self.status.value(), self.status.flags())?;
        for (i, reg) in self.general.iter().enumerate() {
            match reg.value() {
                Some(value) => writeln!(f, "R{} = {}", i + 1, value)?,
                None => writeln!(f, "R{} = --", i + 1)?,
            }
        }
        Ok(())
    }
}
