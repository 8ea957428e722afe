//! Application state shared across request handlers.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::assistant::ChatGateway;
use crate::store::{self, RosterStore, ShiftStore, StoreError};
use crate::types::{AbilityVocabulary, Worker};

/// Shared application state, passed to handlers via Axum's state
/// extractor. Stores are cheap handles; the vocabulary is the only
/// mutable piece and lives for the process, not on disk.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    roster: RosterStore,
    shifts: ShiftStore,
    vocabulary: Mutex<AbilityVocabulary>,
    gateway: Arc<dyn ChatGateway>,
}

impl AppState {
    pub fn new(
        roster: RosterStore,
        shifts: ShiftStore,
        vocabulary: AbilityVocabulary,
        gateway: Arc<dyn ChatGateway>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                roster,
                shifts,
                vocabulary: Mutex::new(vocabulary),
                gateway,
            }),
        }
    }

    pub fn roster(&self) -> &RosterStore {
        &self.inner.roster
    }

    pub fn shifts(&self) -> &ShiftStore {
        &self.inner.shifts
    }

    pub fn gateway(&self) -> &Arc<dyn ChatGateway> {
        &self.inner.gateway
    }

    pub fn assistant_configured(&self) -> bool {
        self.inner.gateway.is_configured()
    }

    /// Snapshot of the session vocabulary.
    pub fn abilities(&self) -> Vec<String> {
        self.inner.vocabulary.lock().tags().to_vec()
    }

    /// Add a tag to the session vocabulary. Returns whether it was new.
    pub fn add_ability(&self, tag: &str) -> bool {
        self.inner.vocabulary.lock().add(tag)
    }

    /// Merge a worker's tags into the session vocabulary. Called after
    /// roster writes so a tag typed on a worker shows up in the picker.
    pub fn absorb_tags(&self, worker: &Worker) {
        let mut vocabulary = self.inner.vocabulary.lock();
        for tag in &worker.abilities {
            vocabulary.add(tag);
        }
    }

    /// Rename a worker and migrate every shift that referenced the old
    /// name. Returns the updated worker and how many shifts moved. Two
    /// file writes; a crash between them leaves old-name shifts behind,
    /// which render as orphans until renamed again.
    pub fn rename_worker(&self, old: &str, new: &str) -> Result<(Worker, usize), StoreError> {
        let worker = self.inner.roster.rename(old, new)?;
        let migrated = self.inner.shifts.reassign_worker(old, new)?;
        Ok((worker, migrated))
    }
}

/// Build the startup vocabulary: the seed file first, then every tag
/// already on the roster.
pub fn load_vocabulary(
    data_dir: &std::path::Path,
    roster: &RosterStore,
) -> Result<AbilityVocabulary, StoreError> {
    let mut vocabulary = AbilityVocabulary::new(store::seed_abilities(data_dir)?);
    for worker in roster.list()? {
        for tag in &worker.abilities {
            vocabulary.add(tag);
        }
    }
    Ok(vocabulary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Shift;

    fn worker(name: &str, abilities: &[&str]) -> Worker {
        Worker {
            name: name.to_string(),
            email: String::new(),
            working_hours: String::new(),
            abilities: abilities.iter().map(|s| s.to_string()).collect(),
            target_hours: 40.0,
            pto: vec![],
        }
    }

    #[test]
    fn test_load_vocabulary_merges_seed_and_roster() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(store::ABILITIES_FILE),
            r#"["Dispatch", "Loading"]"#,
        )
        .unwrap();
        let roster = RosterStore::new(dir.path());
        roster.upsert(worker("Alice", &["Driver", "Dispatch"])).unwrap();

        let vocabulary = load_vocabulary(dir.path(), &roster).unwrap();
        assert_eq!(vocabulary.tags(), ["Dispatch", "Loading", "Driver"]);
    }

    #[test]
    fn test_rename_migrates_shifts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let roster = RosterStore::new(dir.path());
        let shifts = ShiftStore::new(dir.path());
        roster.upsert(worker("Bob", &[])).unwrap();
        for date in ["2026-08-25", "2026-08-26"] {
            shifts
                .save(Shift {
                    id: None,
                    name: "Bob".to_string(),
                    date: date.to_string(),
                    role: "Driver".to_string(),
                    start: 480,
                    end: 960,
                    notes: None,
                })
                .unwrap();
        }

        let state = AppState::new(
            roster.clone(),
            shifts.clone(),
            AbilityVocabulary::default(),
            failing_gateway(),
        );
        let (renamed, migrated) = state.rename_worker("Bob", "Robert").unwrap();
        assert_eq!(renamed.name, "Robert");
        assert_eq!(migrated, 2);
        assert!(shifts
            .list(None)
            .unwrap()
            .iter()
            .all(|s| s.name == "Robert"));
    }

    #[test]
    fn test_session_abilities_are_process_local() {
        let dir = tempfile::tempdir().expect("tempdir");
        let roster = RosterStore::new(dir.path());
        let shifts = ShiftStore::new(dir.path());
        let state = AppState::new(
            roster.clone(),
            shifts.clone(),
            AbilityVocabulary::default(),
            failing_gateway(),
        );

        assert!(state.add_ability("Forklift"));
        assert!(!state.add_ability("Forklift"));
        assert_eq!(state.abilities(), ["Forklift"]);

        // A fresh process would rebuild from seed + roster only.
        let rebuilt = load_vocabulary(dir.path(), &roster).unwrap();
        assert!(rebuilt.tags().is_empty());
    }

    fn failing_gateway() -> Arc<dyn ChatGateway> {
        use crate::assistant::AssistantError;
        use async_trait::async_trait;

        struct Unconfigured;

        #[async_trait]
        impl ChatGateway for Unconfigured {
            async fn send(&self, _text: &str, _date: &str) -> Result<String, AssistantError> {
                Err(AssistantError::NoApiKey)
            }
        }

        Arc::new(Unconfigured)
    }
}
