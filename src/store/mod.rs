//! JSON-file persistence for the roster and the schedule.
//!
//! Each store owns one pretty-printed JSON file under the data directory
//! and does read-modify-write per operation with an atomic replace, so a
//! crash mid-write never corrupts the file. There is no cross-process
//! locking; concurrent writers are last-write-wins.

mod roster;
mod shifts;

pub use roster::{RosterStore, ROSTER_FILE};
pub use shifts::{ShiftStore, SHIFTS_FILE};

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Seed file for the ability vocabulary. Read-only: the app never writes
/// it, tags persist only inside the worker records that carry them.
pub const ABILITIES_FILE: &str = "abilities.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("name already in use: {0}")]
    NameTaken(String),
    #[error("read error ({path}): {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("write error ({path}): {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse error ({path}): {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Read and deserialize a JSON collection file. A file that does not
/// exist yet reads as the empty collection.
fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    serde_json::from_str(&content).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Serialize `data` as pretty-printed JSON and write it atomically,
/// creating the parent directory if needed.
fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let content = serde_json::to_string_pretty(data)?;
    crate::util::atomic_write_str(path, &content).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read the vocabulary seed file. Missing file reads as no seed.
pub fn seed_abilities(data_dir: &Path) -> Result<Vec<String>, StoreError> {
    read_json_or_default(&data_dir.join(ABILITIES_FILE))
}
