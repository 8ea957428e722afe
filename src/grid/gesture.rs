//! Pointer state machine for the day grid.
//!
//! Exactly one gesture is live at a time: pointer-down on an empty hour
//! cell starts a create drag, on a block body a move, on an edge handle a
//! resize. The tracker consumes abstracted pointer events in grid-local
//! pixel coordinates (the web layer translates DOM events; tests drive it
//! directly), emits per-move [`Feedback`], and resolves to a
//! [`GestureOutcome`] on release.

use crate::util::DAY_MINUTES;

use super::{CLICK_TOLERANCE_PX, SNAP_STEP};

/// Pixel geometry of the rendered grid at gesture time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    /// Full 24h row width, px. Must be positive.
    pub row_width: f64,
    /// One worker row's height, px. Must be positive.
    pub row_height: f64,
    /// Worker row count at pointer-down.
    pub rows: usize,
}

impl GridMetrics {
    pub fn px_per_minute(&self) -> f64 {
        self.row_width / DAY_MINUTES as f64
    }
}

/// Which edge of a block a resize grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Start,
    End,
}

/// What the view should do after a pointer move.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    /// No gesture is live.
    None,
    /// Create in progress: redraw with this provisional whole-hour span.
    CreatePreview { row: usize, start: u16, end: u16 },
    /// Resize in progress: redraw with the grabbed block's span adjusted.
    ResizePreview {
        shift_index: usize,
        start: u16,
        end: u16,
    },
    /// Move in progress: offset the grabbed block's preview clone. Deltas
    /// are already snapped and clamped, so the preview shows exactly what
    /// release would commit.
    MovePreview {
        shift_index: usize,
        delta_minutes: i32,
        delta_rows: i32,
    },
}

/// What completed when the pointer was released.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// No gesture was live.
    None,
    /// Open the dialog in new mode, seeded with the dragged span.
    Create { row: usize, start: u16, end: u16 },
    /// The press never traveled: open the edit dialog instead.
    Edit { shift_index: usize },
    /// Commit and persist a move.
    Move {
        shift_index: usize,
        start: u16,
        end: u16,
        row: usize,
    },
    /// Commit and persist a resize.
    Resize {
        shift_index: usize,
        start: u16,
        end: u16,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Idle,
    Creating {
        row: usize,
        anchor_hour: u16,
    },
    Moving {
        shift_index: usize,
        start: u16,
        end: u16,
        row: usize,
        press_x: f64,
        press_y: f64,
    },
    Resizing {
        shift_index: usize,
        edge: ResizeEdge,
        start: u16,
        end: u16,
    },
}

/// Owner of the single live interaction record.
#[derive(Debug)]
pub struct GestureTracker {
    gesture: Gesture,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureTracker {
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    /// Pointer-down on an empty hour cell. Ignored while a gesture is live.
    pub fn press_cell(&mut self, row: usize, hour: u16) {
        if self.is_idle() {
            self.gesture = Gesture::Creating {
                row,
                anchor_hour: hour.min(23),
            };
        }
    }

    /// Pointer-down on a block body. `start`/`end`/`row` are the block's
    /// values at press time. Ignored while a gesture is live.
    pub fn press_block(
        &mut self,
        shift_index: usize,
        row: usize,
        start: u16,
        end: u16,
        x: f64,
        y: f64,
    ) {
        if self.is_idle() {
            self.gesture = Gesture::Moving {
                shift_index,
                start,
                end,
                row,
                press_x: x,
                press_y: y,
            };
        }
    }

    /// Pointer-down on a block's edge handle. Ignored while a gesture is live.
    pub fn press_handle(&mut self, shift_index: usize, edge: ResizeEdge, start: u16, end: u16) {
        if self.is_idle() {
            self.gesture = Gesture::Resizing {
                shift_index,
                edge,
                start,
                end,
            };
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, metrics: &GridMetrics) -> Feedback {
        match self.gesture {
            Gesture::Idle => Feedback::None,
            Gesture::Creating { row, anchor_hour } => {
                let (start, end) = create_span(anchor_hour, hour_at(x, metrics));
                Feedback::CreatePreview { row, start, end }
            }
            Gesture::Moving {
                shift_index,
                start,
                end,
                row,
                press_x,
                press_y,
            } => {
                let (new_start, _, new_row) =
                    moved_position(start, end, row, x - press_x, y - press_y, metrics);
                Feedback::MovePreview {
                    shift_index,
                    delta_minutes: new_start as i32 - start as i32,
                    delta_rows: new_row as i32 - row as i32,
                }
            }
            Gesture::Resizing {
                shift_index,
                edge,
                start,
                end,
            } => {
                let (new_start, new_end) =
                    resized_span(edge, start, end, snapped_minutes(x, metrics));
                Feedback::ResizePreview {
                    shift_index,
                    start: new_start,
                    end: new_end,
                }
            }
        }
    }

    /// Pointer-up at the final position. Clears the interaction record.
    pub fn release(&mut self, x: f64, y: f64, metrics: &GridMetrics) -> GestureOutcome {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => GestureOutcome::None,
            Gesture::Creating { row, anchor_hour } => {
                let (start, end) = create_span(anchor_hour, hour_at(x, metrics));
                GestureOutcome::Create { row, start, end }
            }
            Gesture::Moving {
                shift_index,
                start,
                end,
                row,
                press_x,
                press_y,
            } => {
                let dx = x - press_x;
                let dy = y - press_y;
                if dx.abs() < CLICK_TOLERANCE_PX && dy.abs() < CLICK_TOLERANCE_PX {
                    return GestureOutcome::Edit { shift_index };
                }
                let (new_start, new_end, new_row) =
                    moved_position(start, end, row, dx, dy, metrics);
                GestureOutcome::Move {
                    shift_index,
                    start: new_start,
                    end: new_end,
                    row: new_row,
                }
            }
            Gesture::Resizing {
                shift_index,
                edge,
                start,
                end,
            } => {
                let (new_start, new_end) =
                    resized_span(edge, start, end, snapped_minutes(x, metrics));
                GestureOutcome::Resize {
                    shift_index,
                    start: new_start,
                    end: new_end,
                }
            }
        }
    }
}

/// Hour cell under an x coordinate, clamped to the 24 columns.
fn hour_at(x: f64, metrics: &GridMetrics) -> u16 {
    let cell = (x / (metrics.row_width / 24.0)).floor();
    cell.clamp(0.0, 23.0) as u16
}

/// Whole-hour span from the anchor cell to the cursor cell, inclusive.
/// A drag that never leaves the anchor cell spans one hour.
fn create_span(anchor_hour: u16, cursor_hour: u16) -> (u16, u16) {
    let (lo, hi) = if cursor_hour < anchor_hour {
        (cursor_hour, anchor_hour)
    } else {
        (anchor_hour, cursor_hour)
    };
    (lo * 60, (hi + 1) * 60)
}

/// Horizontal pixels as minutes on the snap grid. Works for absolute
/// cursor positions and for deltas alike.
fn snapped_minutes(px: f64, metrics: &GridMetrics) -> i32 {
    let minutes = px / metrics.px_per_minute();
    ((minutes / SNAP_STEP as f64).round() * SNAP_STEP as f64) as i32
}

/// Apply a move delta: minutes snapped to the step grid, rows rounded to
/// the nearest row, both clamped so the span stays inside the day and the
/// row inside the roster. Duration is preserved.
fn moved_position(
    start: u16,
    end: u16,
    row: usize,
    dx: f64,
    dy: f64,
    metrics: &GridMetrics,
) -> (u16, u16, usize) {
    let duration = end.saturating_sub(start).min(DAY_MINUTES) as i32;
    // snapped_minutes saturates on absurd deltas, so the adds must too.
    let new_start = (start as i32)
        .saturating_add(snapped_minutes(dx, metrics))
        .clamp(0, DAY_MINUTES as i32 - duration);

    let delta_rows = (dy / metrics.row_height).round() as i32;
    let last_row = metrics.rows.saturating_sub(1) as i32;
    let new_row = (row as i32).saturating_add(delta_rows).clamp(0, last_row) as usize;

    (new_start as u16, (new_start + duration) as u16, new_row)
}

/// Adjust one edge, leaving the other fixed. The result keeps at least
/// one snap step of width and stays inside the day.
fn resized_span(edge: ResizeEdge, start: u16, end: u16, cursor_minute: i32) -> (u16, u16) {
    match edge {
        ResizeEdge::Start => {
            let max_start = (end as i32 - SNAP_STEP as i32).max(0);
            let new_start = cursor_minute.clamp(0, max_start);
            (new_start as u16, end)
        }
        ResizeEdge::End => {
            let min_end = (start as i32 + SNAP_STEP as i32).min(DAY_MINUTES as i32);
            let new_end = cursor_minute.clamp(min_end, DAY_MINUTES as i32);
            (start, new_end as u16)
        }
    }
}
