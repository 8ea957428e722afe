//! Shift persistence, keyed by store-assigned id.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::types::Shift;

use super::{read_json_or_default, write_json, StoreError};

pub const SHIFTS_FILE: &str = "shifts.json";

#[derive(Debug, Clone)]
pub struct ShiftStore {
    path: PathBuf,
}

impl ShiftStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SHIFTS_FILE),
        }
    }

    /// List shifts, optionally narrowed to one date (exact string match).
    pub fn list(&self, date: Option<&str>) -> Result<Vec<Shift>, StoreError> {
        let mut shifts: Vec<Shift> = read_json_or_default(&self.path)?;
        if let Some(date) = date {
            shifts.retain(|s| s.date == date);
        }
        Ok(shifts)
    }

    /// Create or update. A shift without an id gets a fresh one and is
    /// appended; an id that matches no stored record is `NotFound`.
    /// Returns the stored record, id filled in.
    pub fn save(&self, mut shift: Shift) -> Result<Shift, StoreError> {
        let mut shifts: Vec<Shift> = read_json_or_default(&self.path)?;
        match shift.id {
            Some(ref id) => {
                let slot = shifts
                    .iter_mut()
                    .find(|s| s.id.as_deref() == Some(id.as_str()))
                    .ok_or_else(|| StoreError::NotFound(format!("shift {id}")))?;
                *slot = shift.clone();
            }
            None => {
                shift.id = Some(Uuid::new_v4().to_string());
                shifts.push(shift.clone());
            }
        }
        write_json(&self.path, &shifts)?;
        Ok(shift)
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut shifts: Vec<Shift> = read_json_or_default(&self.path)?;
        let before = shifts.len();
        shifts.retain(|s| s.id.as_deref() != Some(id));
        if shifts.len() == before {
            return Err(StoreError::NotFound(format!("shift {id}")));
        }
        write_json(&self.path, &shifts)
    }

    /// Point every shift owned by `old_name` at `new_name`, across all
    /// dates. Returns how many records changed.
    pub fn reassign_worker(&self, old_name: &str, new_name: &str) -> Result<usize, StoreError> {
        let mut shifts: Vec<Shift> = read_json_or_default(&self.path)?;
        let mut migrated = 0;
        for shift in shifts.iter_mut().filter(|s| s.name == old_name) {
            shift.name = new_name.to_string();
            migrated += 1;
        }
        if migrated > 0 {
            write_json(&self.path, &shifts)?;
        }
        Ok(migrated)
    }
}
