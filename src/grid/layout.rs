//! Pure day-grid layout.
//!
//! `build_layout` rebuilds the complete visual model from scratch on every
//! call; there is no incremental patching. Geometry is expressed as
//! fractions of the 24h row width so the frontend can scale freely.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{Shift, Worker};
use crate::util::{format_clock, DAY_MINUTES};

/// Fixed role palette. Lookup is exact; anything else gets [`FALLBACK_COLOR`].
const ROLE_COLORS: &[(&str, &str)] = &[
    ("Dispatch", "#4e79a7"),
    ("Driver", "#f28e2b"),
    ("Warehouse", "#59a14f"),
    ("Office", "#e15759"),
    ("Support", "#b07aa1"),
    ("Training", "#edc948"),
];

pub const FALLBACK_COLOR: &str = "#9aa0a6";

pub fn role_color(role: &str) -> &'static str {
    ROLE_COLORS
        .iter()
        .find(|(name, _)| *name == role)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

/// Complete visual model for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayout {
    pub date: String,
    pub rows: Vec<GridRow>,
}

/// One worker row, in render order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub worker: String,
    pub row: usize,
    pub blocks: Vec<ShiftBlock>,
    /// Present exactly once when the worker's PTO list contains the
    /// viewed day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pto: Option<PtoOverlay>,
}

/// One shift as a positioned block. `left` and `width` are fractions of
/// the row width; `shift_index` indexes the working set the layout was
/// built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftBlock {
    pub shift_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub left: f64,
    pub width: f64,
    pub color: String,
    pub label: String,
}

/// Full-width translucent band over a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PtoOverlay {
    pub label: String,
    pub left: f64,
    pub width: f64,
}

impl PtoOverlay {
    fn full_width() -> Self {
        Self {
            label: "PTO".to_string(),
            left: 0.0,
            width: 1.0,
        }
    }
}

/// Sort key sentinel for workers with no shift on the viewed day; later
/// than any real start, so shiftless workers sink to the bottom.
const NO_SHIFT: u16 = u16::MAX;

fn earliest_start(name: &str, shifts: &[Shift]) -> u16 {
    shifts
        .iter()
        .filter(|s| s.name == name)
        .map(|s| s.start)
        .min()
        .unwrap_or(NO_SHIFT)
}

/// Row order for the day: earliest shift start first, shiftless workers
/// last, ties broken by case-insensitive name, ascending. Deterministic
/// for a given roster and working set.
pub fn row_order<'a>(workers: &'a [Worker], shifts: &[Shift]) -> Vec<&'a Worker> {
    let mut ordered: Vec<&Worker> = workers.iter().collect();
    ordered.sort_by(|a, b| {
        earliest_start(&a.name, shifts)
            .cmp(&earliest_start(&b.name, shifts))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    ordered
}

/// Build the visual model for `date`.
///
/// `shifts` is the day's working set, already narrowed to `date`; its
/// indices become `shift_index` on the blocks. Shifts whose worker is
/// missing from the roster get no block (and a warning); their records
/// are left alone.
pub fn build_layout(date: &str, workers: &[Worker], shifts: &[Shift]) -> GridLayout {
    for shift in shifts {
        if !workers.iter().any(|w| w.name == shift.name) {
            warn!(
                worker = %shift.name,
                id = ?shift.id,
                "shift references unknown worker; not rendered"
            );
        }
    }

    let rows = row_order(workers, shifts)
        .into_iter()
        .enumerate()
        .map(|(row, worker)| {
            let blocks = shifts
                .iter()
                .enumerate()
                .filter(|(_, s)| s.name == worker.name)
                .map(|(shift_index, s)| block_for(shift_index, s))
                .collect();
            let pto = worker
                .pto
                .iter()
                .any(|day| day == date)
                .then(PtoOverlay::full_width);
            GridRow {
                worker: worker.name.clone(),
                row,
                blocks,
                pto,
            }
        })
        .collect();

    GridLayout {
        date: date.to_string(),
        rows,
    }
}

fn block_for(shift_index: usize, shift: &Shift) -> ShiftBlock {
    ShiftBlock {
        shift_index,
        id: shift.id.clone(),
        left: shift.start as f64 / DAY_MINUTES as f64,
        width: shift.duration_minutes() as f64 / DAY_MINUTES as f64,
        color: role_color(&shift.role).to_string(),
        label: format!(
            "{} {}-{}",
            shift.role,
            format_clock(shift.start),
            format_clock(shift.end)
        ),
    }
}
