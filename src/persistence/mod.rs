//! Unlocked-level persistence
//!
//! The whole save is one integer: the highest level the player may start.
//! Backends:
//! - `MemoryStore`: in-process (tests, hosts with their own saving)
//! - `FileStore`: JSON file (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::FIRST_LEVEL;

/// Persistence failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value slot holding the unlocked-level watermark
pub trait LevelProgressStore {
    /// Highest unlocked level (1 when nothing is stored)
    fn unlocked_level(&self) -> u32;

    /// Overwrite the stored level
    fn set_unlocked_level(&mut self, level: u32) -> Result<(), StoreError>;
}

/// On-disk / LocalStorage record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub unlocked_level: u32,
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self {
            unlocked_level: FIRST_LEVEL,
        }
    }
}

impl SaveRecord {
    /// Parse a record, treating garbage as "nothing saved"
    pub fn parse_or_default(json: &str) -> Self {
        match serde_json::from_str::<SaveRecord>(json) {
            Ok(record) if record.unlocked_level >= FIRST_LEVEL => record,
            Ok(record) => {
                log::warn!(
                    "Stored unlocked level {} is invalid, starting fresh",
                    record.unlocked_level
                );
                Self::default()
            }
            Err(e) => {
                log::warn!("Corrupt save data ({}), starting fresh", e);
                Self::default()
            }
        }
    }
}

/// Non-durable store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    unlocked_level: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with a watermark
    pub fn with_level(level: u32) -> Self {
        Self {
            unlocked_level: Some(level),
        }
    }
}

impl LevelProgressStore for MemoryStore {
    fn unlocked_level(&self) -> u32 {
        self.unlocked_level.unwrap_or(FIRST_LEVEL)
    }

    fn set_unlocked_level(&mut self, level: u32) -> Result<(), StoreError> {
        self.unlocked_level = Some(level);
        Ok(())
    }
}
