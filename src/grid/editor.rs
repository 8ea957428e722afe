//! Day-grid editing view-model.
//!
//! `DayGridEditor` is the controller behind the grid: it owns the viewed
//! day's working set (roster snapshot plus that day's shifts) and pushes
//! every committed edit through the stores. Writes go to the store first
//! and the working set changes only on success, so a failed write leaves
//! the grid exactly where it was and the next redraw shows the truth.

use thiserror::Error;
use tracing::warn;

use crate::store::{RosterStore, ShiftStore, StoreError};
use crate::types::{AbilityVocabulary, Shift, Worker};
use crate::util::{format_clock, parse_clock};

use super::gesture::GestureOutcome;
use super::layout::{self, GridLayout};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("unknown worker: {0}")]
    UnknownWorker(String),
    #[error("unparseable time: {0:?}")]
    BadClock(String),
    #[error("end must be after start (got {start}..{end})")]
    EmptySpan { start: u16, end: u16 },
    #[error("no shift at index {0}")]
    ShiftIndex(usize),
    #[error("no worker row {0}")]
    RowOutOfRange(usize),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EditorError {
    /// Validation failures leave the dialog open and mutate nothing.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownWorker(_) | Self::BadClock(_) | Self::EmptySpan { .. }
        )
    }
}

/// Dialog working copy. Times are text exactly as typed; validation
/// happens on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftForm {
    pub mode: DialogMode,
    pub worker: String,
    pub role: String,
    pub start_text: String,
    pub end_text: String,
    pub notes: String,
}

/// Whether a submit upserts by working-set index or appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    New,
    Edit(usize),
}

/// What a completed gesture turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEffect {
    Nothing,
    /// Open the shift dialog with this form.
    Dialog(ShiftForm),
    /// A move or resize was persisted; redraw.
    Committed,
}

pub struct DayGridEditor {
    date: String,
    roster: RosterStore,
    store: ShiftStore,
    workers: Vec<Worker>,
    shifts: Vec<Shift>,
    vocabulary: AbilityVocabulary,
}

impl DayGridEditor {
    /// Open the editor on one day. `seed` is the deployment's ability
    /// vocabulary (see [`crate::store::seed_abilities`]); roster tags are
    /// merged in on every reload.
    pub fn open(
        roster: RosterStore,
        store: ShiftStore,
        date: impl Into<String>,
        seed: impl IntoIterator<Item = String>,
    ) -> Result<Self, EditorError> {
        let mut editor = Self {
            date: date.into(),
            roster,
            store,
            workers: Vec::new(),
            shifts: Vec::new(),
            vocabulary: AbilityVocabulary::new(seed),
        };
        editor.reload()?;
        Ok(editor)
    }

    /// Re-read the roster and the viewed day's shifts from disk. Session
    /// vocabulary additions survive.
    pub fn reload(&mut self) -> Result<(), EditorError> {
        self.workers = self.roster.list()?;
        self.shifts = self.store.list(Some(&self.date))?;
        for worker in &self.workers {
            for tag in &worker.abilities {
                self.vocabulary.add(tag);
            }
        }
        Ok(())
    }

    /// Switch the viewed day.
    pub fn view(&mut self, date: impl Into<String>) -> Result<(), EditorError> {
        self.date = date.into();
        self.reload()
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn abilities(&self) -> &[String] {
        self.vocabulary.tags()
    }

    /// Append a tag to the session vocabulary (the role picker's
    /// "add new" path). Returns whether it was new.
    pub fn add_ability(&mut self, tag: &str) -> bool {
        self.vocabulary.add(tag)
    }

    /// Rebuild the visual model from the working set.
    pub fn layout(&self) -> GridLayout {
        layout::build_layout(&self.date, &self.workers, &self.shifts)
    }

    /// Resolve a completed gesture: dialog seeds for create and click,
    /// persisted commits for move and resize.
    pub fn apply_gesture(&mut self, outcome: GestureOutcome) -> Result<GestureEffect, EditorError> {
        match outcome {
            GestureOutcome::None => Ok(GestureEffect::Nothing),
            GestureOutcome::Create { row, start, end } => {
                Ok(GestureEffect::Dialog(self.seed_dialog(row, start, end)?))
            }
            GestureOutcome::Edit { shift_index } => {
                Ok(GestureEffect::Dialog(self.edit_dialog(shift_index)?))
            }
            GestureOutcome::Move {
                shift_index,
                start,
                end,
                row,
            } => {
                self.commit_move(shift_index, start, end, row)?;
                Ok(GestureEffect::Committed)
            }
            GestureOutcome::Resize {
                shift_index,
                start,
                end,
            } => {
                self.commit_resize(shift_index, start, end)?;
                Ok(GestureEffect::Committed)
            }
        }
    }

    /// New-shift dialog seeded from a create drag. The row picks the
    /// worker under the anchor cell, in the current render order.
    pub fn seed_dialog(&self, row: usize, start: u16, end: u16) -> Result<ShiftForm, EditorError> {
        let order = layout::row_order(&self.workers, &self.shifts);
        let worker = order.get(row).ok_or(EditorError::RowOutOfRange(row))?;
        Ok(ShiftForm {
            mode: DialogMode::New,
            worker: worker.name.clone(),
            role: String::new(),
            start_text: format_clock(start),
            end_text: format_clock(end),
            notes: String::new(),
        })
    }

    /// Edit dialog pre-filled from an existing shift.
    pub fn edit_dialog(&self, shift_index: usize) -> Result<ShiftForm, EditorError> {
        let shift = self
            .shifts
            .get(shift_index)
            .ok_or(EditorError::ShiftIndex(shift_index))?;
        Ok(ShiftForm {
            mode: DialogMode::Edit(shift_index),
            worker: shift.name.clone(),
            role: shift.role.clone(),
            start_text: format_clock(shift.start),
            end_text: format_clock(shift.end),
            notes: shift.notes.clone().unwrap_or_default(),
        })
    }

    /// Validate and commit a dialog submission. The worker must be on the
    /// roster, both times must parse, and the end must be after the
    /// start; otherwise nothing changes. On success the record is
    /// persisted, then written into the working set by index (edit) or
    /// appended (new).
    pub fn submit(&mut self, form: &ShiftForm) -> Result<Shift, EditorError> {
        let worker = form.worker.trim();
        if !self.workers.iter().any(|w| w.name == worker) {
            return Err(EditorError::UnknownWorker(worker.to_string()));
        }
        let start = parse_clock(&form.start_text)
            .ok_or_else(|| EditorError::BadClock(form.start_text.clone()))?;
        let end = parse_clock(&form.end_text)
            .ok_or_else(|| EditorError::BadClock(form.end_text.clone()))?;
        if end <= start {
            return Err(EditorError::EmptySpan { start, end });
        }

        let notes = form.notes.trim();
        let notes = (!notes.is_empty()).then(|| notes.to_string());
        let role = form.role.trim().to_string();

        match form.mode {
            DialogMode::Edit(index) => {
                let previous = self
                    .shifts
                    .get(index)
                    .ok_or(EditorError::ShiftIndex(index))?;
                let saved = self.store.save(Shift {
                    id: previous.id.clone(),
                    name: worker.to_string(),
                    date: previous.date.clone(),
                    role,
                    start,
                    end,
                    notes,
                })?;
                self.shifts[index] = saved.clone();
                Ok(saved)
            }
            DialogMode::New => {
                let saved = self.store.save(Shift {
                    id: None,
                    name: worker.to_string(),
                    date: self.date.clone(),
                    role,
                    start,
                    end,
                    notes,
                })?;
                self.shifts.push(saved.clone());
                Ok(saved)
            }
        }
    }

    /// Delete the shift at `index`: store first, then the working set. A
    /// record the store no longer has is dropped from the working set
    /// anyway; that is reconciliation, not a failure.
    pub fn delete(&mut self, shift_index: usize) -> Result<(), EditorError> {
        let shift = self
            .shifts
            .get(shift_index)
            .ok_or(EditorError::ShiftIndex(shift_index))?;
        if let Some(id) = shift.id.clone() {
            match self.store.delete(&id) {
                Ok(()) => {}
                Err(err) if err.is_not_found() => {
                    warn!(id = %id, "deleting a shift the store no longer has");
                }
                Err(err) => return Err(err.into()),
            }
        }
        self.shifts.remove(shift_index);
        Ok(())
    }

    fn commit_move(
        &mut self,
        shift_index: usize,
        start: u16,
        end: u16,
        row: usize,
    ) -> Result<(), EditorError> {
        // Row indices come from the render the user gestured on, which
        // was built from this same working set.
        let target = {
            let order = layout::row_order(&self.workers, &self.shifts);
            order
                .get(row)
                .ok_or(EditorError::RowOutOfRange(row))?
                .name
                .clone()
        };
        let previous = self
            .shifts
            .get(shift_index)
            .ok_or(EditorError::ShiftIndex(shift_index))?;
        let mut candidate = previous.clone();
        candidate.name = target;
        candidate.start = start;
        candidate.end = end;
        let saved = self.store.save(candidate)?;
        self.shifts[shift_index] = saved;
        Ok(())
    }

    fn commit_resize(
        &mut self,
        shift_index: usize,
        start: u16,
        end: u16,
    ) -> Result<(), EditorError> {
        let previous = self
            .shifts
            .get(shift_index)
            .ok_or(EditorError::ShiftIndex(shift_index))?;
        let mut candidate = previous.clone();
        candidate.start = start;
        candidate.end = end;
        let saved = self.store.save(candidate)?;
        self.shifts[shift_index] = saved;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::gesture::GestureOutcome;

    const DAY: &str = "2026-08-25";

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

    struct Fixture {
        _dir: tempfile::TempDir,
        roster: RosterStore,
        store: ShiftStore,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().expect("tempdir");
            let roster = RosterStore::new(dir.path());
            let store = ShiftStore::new(dir.path());
            roster.upsert(worker("Alice", &["Dispatch"])).unwrap();
            roster.upsert(worker("Bob", &["Driver"])).unwrap();
            Self {
                _dir: dir,
                roster,
                store,
            }
        }

        fn editor(&self) -> DayGridEditor {
            DayGridEditor::open(
                self.roster.clone(),
                self.store.clone(),
                DAY,
                ["Warehouse".to_string()],
            )
            .unwrap()
        }

        fn seed_shift(&self, name: &str, start: u16, end: u16) -> Shift {
            self.store
                .save(Shift {
                    id: None,
                    name: name.to_string(),
                    date: DAY.to_string(),
                    role: "Dispatch".to_string(),
                    start,
                    end,
                    notes: None,
                })
                .unwrap()
        }
    }

    #[test]
    fn test_open_loads_only_the_viewed_day() {
        let fx = Fixture::new();
        fx.seed_shift("Alice", 540, 600);
        fx.store
            .save(Shift {
                id: None,
                name: "Bob".to_string(),
                date: "2026-08-26".to_string(),
                role: "Driver".to_string(),
                start: 480,
                end: 960,
                notes: None,
            })
            .unwrap();

        let editor = fx.editor();
        assert_eq!(editor.shifts().len(), 1);
        assert_eq!(editor.shifts()[0].name, "Alice");
    }

    #[test]
    fn test_vocabulary_merges_seed_and_roster_tags() {
        let fx = Fixture::new();
        let editor = fx.editor();
        // Seed first, then roster tags in roster order.
        assert_eq!(editor.abilities(), ["Warehouse", "Dispatch", "Driver"]);
    }

    #[test]
    fn test_session_abilities_survive_reload_but_not_reopen() {
        let fx = Fixture::new();
        let mut editor = fx.editor();

        assert!(editor.add_ability("Forklift"));
        assert!(!editor.add_ability("Forklift"));
        editor.reload().unwrap();
        assert!(editor.abilities().contains(&"Forklift".to_string()));

        let fresh = fx.editor();
        assert!(!fresh.abilities().contains(&"Forklift".to_string()));
    }

    #[test]
    fn test_seed_dialog_maps_row_to_sorted_worker() {
        let fx = Fixture::new();
        fx.seed_shift("Bob", 300, 360);
        let editor = fx.editor();

        // Bob has the earliest shift, so row 0 is Bob, row 1 Alice.
        let form = editor.seed_dialog(0, 540, 600).unwrap();
        assert_eq!(form.worker, "Bob");
        assert_eq!(form.mode, DialogMode::New);
        assert_eq!(form.start_text, "09:00");
        assert_eq!(form.end_text, "10:00");

        assert_eq!(editor.seed_dialog(1, 540, 600).unwrap().worker, "Alice");
        assert!(matches!(
            editor.seed_dialog(5, 540, 600),
            Err(EditorError::RowOutOfRange(5))
        ));
    }

    #[test]
    fn test_edit_dialog_prefills_from_the_shift() {
        let fx = Fixture::new();
        fx.seed_shift("Alice", 540, 615);
        let editor = fx.editor();

        let form = editor.edit_dialog(0).unwrap();
        assert_eq!(form.mode, DialogMode::Edit(0));
        assert_eq!(form.worker, "Alice");
        assert_eq!(form.role, "Dispatch");
        assert_eq!(form.start_text, "09:00");
        assert_eq!(form.end_text, "10:15");
        assert_eq!(form.notes, "");
    }

    #[test]
    fn test_submit_new_appends_and_persists() {
        let fx = Fixture::new();
        let mut editor = fx.editor();

        let saved = editor
            .submit(&ShiftForm {
                mode: DialogMode::New,
                worker: "Alice".to_string(),
                role: "Dispatch".to_string(),
                start_text: "0930".to_string(),
                end_text: "17:30".to_string(),
                notes: "  cover for Bob  ".to_string(),
            })
            .unwrap();

        assert!(saved.id.is_some());
        assert_eq!(saved.start, 570);
        assert_eq!(saved.end, 1050);
        assert_eq!(saved.notes.as_deref(), Some("cover for Bob"));
        assert_eq!(editor.shifts().len(), 1);
        assert_eq!(fx.store.list(Some(DAY)).unwrap().len(), 1);
    }

    #[test]
    fn test_submit_edit_updates_by_index() {
        let fx = Fixture::new();
        fx.seed_shift("Alice", 540, 600);
        fx.seed_shift("Alice", 720, 780);
        let mut editor = fx.editor();

        let mut form = editor.edit_dialog(1).unwrap();
        form.end_text = "14:00".to_string();
        let saved = editor.submit(&form).unwrap();

        assert_eq!(editor.shifts().len(), 2);
        assert_eq!(editor.shifts()[1].end, 840);
        assert_eq!(editor.shifts()[0].end, 600);

        let stored = fx.store.list(Some(DAY)).unwrap();
        let stored_match = stored.iter().find(|s| s.id == saved.id).unwrap();
        assert_eq!(stored_match.end, 840);
    }

    #[test]
    fn test_submit_validation_failures_change_nothing() {
        let fx = Fixture::new();
        fx.seed_shift("Alice", 540, 600);
        let mut editor = fx.editor();

        let cases = [
            ShiftForm {
                mode: DialogMode::New,
                worker: "Nobody".to_string(),
                role: String::new(),
                start_text: "09:00".to_string(),
                end_text: "10:00".to_string(),
                notes: String::new(),
            },
            ShiftForm {
                mode: DialogMode::New,
                worker: "Alice".to_string(),
                role: String::new(),
                start_text: "quarter past".to_string(),
                end_text: "10:00".to_string(),
                notes: String::new(),
            },
            ShiftForm {
                mode: DialogMode::New,
                worker: "Alice".to_string(),
                role: String::new(),
                start_text: "10:00".to_string(),
                end_text: "10:00".to_string(),
                notes: String::new(),
            },
        ];

        for form in &cases {
            let err = editor.submit(form).unwrap_err();
            assert!(err.is_validation(), "expected validation error: {err}");
        }
        assert_eq!(editor.shifts().len(), 1);
        assert_eq!(fx.store.list(Some(DAY)).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_removes_locally_and_in_store() {
        let fx = Fixture::new();
        fx.seed_shift("Alice", 540, 600);
        let mut editor = fx.editor();

        editor.delete(0).unwrap();
        assert!(editor.shifts().is_empty());
        assert!(fx.store.list(Some(DAY)).unwrap().is_empty());
        assert!(matches!(editor.delete(0), Err(EditorError::ShiftIndex(0))));
    }

    #[test]
    fn test_delete_reconciles_when_store_already_lost_it() {
        let fx = Fixture::new();
        let saved = fx.seed_shift("Alice", 540, 600);
        let mut editor = fx.editor();

        // Deleted out from under the editor.
        fx.store.delete(saved.id.as_deref().unwrap()).unwrap();
        editor.delete(0).unwrap();
        assert!(editor.shifts().is_empty());
    }

    #[test]
    fn test_move_commit_reassigns_worker_by_row() {
        let fx = Fixture::new();
        fx.seed_shift("Alice", 540, 600);
        let mut editor = fx.editor();

        // Alice has the only shift: row 0 Alice, row 1 Bob.
        let effect = editor
            .apply_gesture(GestureOutcome::Move {
                shift_index: 0,
                start: 600,
                end: 660,
                row: 1,
            })
            .unwrap();

        assert_eq!(effect, GestureEffect::Committed);
        assert_eq!(editor.shifts()[0].name, "Bob");
        assert_eq!(editor.shifts()[0].start, 600);

        let stored = fx.store.list(Some(DAY)).unwrap();
        assert_eq!(stored[0].name, "Bob");
    }

    #[test]
    fn test_resize_commit_persists_new_span() {
        let fx = Fixture::new();
        fx.seed_shift("Alice", 540, 600);
        let mut editor = fx.editor();

        editor
            .apply_gesture(GestureOutcome::Resize {
                shift_index: 0,
                start: 540,
                end: 720,
            })
            .unwrap();

        assert_eq!(editor.shifts()[0].end, 720);
        assert_eq!(fx.store.list(Some(DAY)).unwrap()[0].end, 720);
    }

    #[test]
    fn test_click_and_create_gestures_become_dialogs() {
        let fx = Fixture::new();
        fx.seed_shift("Alice", 540, 600);
        let mut editor = fx.editor();

        match editor
            .apply_gesture(GestureOutcome::Edit { shift_index: 0 })
            .unwrap()
        {
            GestureEffect::Dialog(form) => assert_eq!(form.mode, DialogMode::Edit(0)),
            other => panic!("expected dialog, got {other:?}"),
        }

        match editor
            .apply_gesture(GestureOutcome::Create {
                row: 0,
                start: 480,
                end: 540,
            })
            .unwrap()
        {
            GestureEffect::Dialog(form) => {
                assert_eq!(form.mode, DialogMode::New);
                assert_eq!(form.worker, "Alice");
            }
            other => panic!("expected dialog, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_store_write_leaves_working_set_alone() {
        let fx = Fixture::new();
        fx.seed_shift("Alice", 540, 600);
        let mut editor = fx.editor();

        // Make the shifts file unwritable by turning it into a directory.
        let path = fx._dir.path().join(crate::store::SHIFTS_FILE);
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let err = editor
            .apply_gesture(GestureOutcome::Resize {
                shift_index: 0,
                start: 540,
                end: 720,
            })
            .unwrap_err();
        assert!(!err.is_validation());
        assert_eq!(editor.shifts()[0].end, 600);
    }
}
