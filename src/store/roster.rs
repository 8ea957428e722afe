//! Worker roster persistence, keyed by worker name.

use std::path::{Path, PathBuf};

use crate::types::Worker;

use super::{read_json_or_default, write_json, StoreError};

pub const ROSTER_FILE: &str = "roster.json";

#[derive(Debug, Clone)]
pub struct RosterStore {
    path: PathBuf,
}

impl RosterStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(ROSTER_FILE),
        }
    }

    pub fn list(&self) -> Result<Vec<Worker>, StoreError> {
        read_json_or_default(&self.path)
    }

    pub fn get(&self, name: &str) -> Result<Option<Worker>, StoreError> {
        Ok(self.list()?.into_iter().find(|w| w.name == name))
    }

    /// Insert, or replace the record with the same name.
    pub fn upsert(&self, worker: Worker) -> Result<(), StoreError> {
        let mut workers = self.list()?;
        match workers.iter_mut().find(|w| w.name == worker.name) {
            Some(slot) => *slot = worker,
            None => workers.push(worker),
        }
        write_json(&self.path, &workers)
    }

    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        let mut workers = self.list()?;
        let before = workers.len();
        workers.retain(|w| w.name != name);
        if workers.len() == before {
            return Err(StoreError::NotFound(format!("worker {name}")));
        }
        write_json(&self.path, &workers)
    }

    /// Rename a record in place. Shifts referencing the old name are the
    /// caller's problem; `AppState::rename_worker` cascades them.
    pub fn rename(&self, old_name: &str, new_name: &str) -> Result<Worker, StoreError> {
        let mut workers = self.list()?;
        if old_name != new_name && workers.iter().any(|w| w.name == new_name) {
            return Err(StoreError::NameTaken(new_name.to_string()));
        }
        let worker = workers
            .iter_mut()
            .find(|w| w.name == old_name)
            .ok_or_else(|| StoreError::NotFound(format!("worker {old_name}")))?;
        worker.name = new_name.to_string();
        let renamed = worker.clone();
        write_json(&self.path, &workers)?;
        Ok(renamed)
    }
}
