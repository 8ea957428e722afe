//! ShiftDesk: shift scheduling for small teams.
//!
//! One administrator, one day on screen at a time. Workers live in a
//! JSON roster, shifts in a JSON schedule; the grid module turns both
//! into a drawable day layout and runs the drag/resize/click editing
//! model. An optional chat assistant can change the schedule through
//! its own access and tells the app to reload with a literal `OK`.

pub mod api;
pub mod assistant;
pub mod config;
pub mod grid;
pub mod state;
pub mod store;
pub mod types;
pub mod util;
