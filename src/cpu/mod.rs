//! ALU and register file.
//!
//! - [`Registers`]: status register at address 0 plus `N` general registers
//! - [`OpCode`]: the 13-entry operation table
//! - [`Alu`]: validates and runs operations, owns the register file

pub mod register;
pub mod registers;
pub mod opcode;
pub mod alu;

pub use register::{Flag, Register, StatusFlags, StatusRegister};
pub use registers::{Registers, RegisterError, DEFAULT_REGISTER_COUNT, STATUS_ADDRESS};
pub use opcode::{Arity, OpCode, Outcome, ParseOpCodeError, OPCODE_COUNT};
pub use alu::{Alu, AluError};
