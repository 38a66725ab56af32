//! Register file snapshots.
//!
//! A snapshot is a small JSON document:
//!
//! ```json
//! { "version": 1, "registers": { "status": { "value": 0 }, "general": [ { "value": 5 }, { "value": null } ] } }
//! ```
//!
//! Unwritten registers are stored as `null` so they stay unwritten on reload.

use crate::cpu::Registers;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A saved register file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub registers: Registers,
}

impl Snapshot {
    pub fn new(registers: Registers) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            registers,
        }
    }
}

/// Load a snapshot from disk.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<Snapshot, StateError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let snapshot: Snapshot = serde_json::from_str(&text)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(StateError::UnsupportedVersion(snapshot.version));
    }
    Ok(snapshot)
}

/// Save a snapshot to disk, replacing any existing file.
pub fn save_state<P: AsRef<Path>>(path: P, snapshot: &Snapshot) -> Result<(), StateError> {
    let text = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path.as_ref(), text)?;
    Ok(())
}

/// Load the snapshot at `path`, or start a fresh file of `count` registers
/// when nothing has been saved there yet.
pub fn load_or_create<P: AsRef<Path>>(path: P, count: i64) -> Result<Registers, StateError> {
    let path = path.as_ref();
    if path.exists() {
        log::debug!("loading register snapshot from {}", path.display());
        Ok(load_state(path)?.registers)
    } else {
        Ok(Registers::new(count)?)
    }
}

/// Errors that can occur while loading or saving snapshots.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("{0}")]
    Registers(#[from] crate::cpu::RegisterError),
}
