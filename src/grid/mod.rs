//! The day grid: layout, pointer gestures, and the editing view-model.
//!
//! Everything in here is toolkit-independent. Layout is a pure function of
//! the roster and the day's shifts, the gesture tracker consumes abstracted
//! pointer events, and the editor owns the in-memory working set a frontend
//! renders. The web layer's only jobs are translating DOM events and
//! painting the layout snapshot.

pub mod editor;
pub mod gesture;
pub mod layout;

pub use editor::{DayGridEditor, DialogMode, EditorError, GestureEffect, ShiftForm};
pub use gesture::{Feedback, GestureOutcome, GestureTracker, GridMetrics, ResizeEdge};
pub use layout::{GridLayout, GridRow, PtoOverlay, ShiftBlock};

/// Gesture snap step, in minutes.
pub const SNAP_STEP: u16 = 15;

/// Pointer travel under this many pixels in both axes counts as a click.
pub const CLICK_TOLERANCE_PX: f64 = 4.0;
