//! # ALU Emulator
//!
//! The arithmetic-logic unit and register file of a small simulated
//! processor. A control unit drives it through two primitives: compute an
//! operation by opcode, and read or write a register.

pub mod cpu;
pub mod state;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use cpu::{Alu, AluError, Flag, OpCode, RegisterError, Registers, StatusFlags};
pub use state::{load_state, save_state, Snapshot, StateError};
