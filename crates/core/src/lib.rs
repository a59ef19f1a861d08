//! Domain rules for the Taskdeck productivity service.
//!
//! Everything here is pure: no I/O, no database, no clock reads. Callers pass
//! in "today" or "now" explicitly so the rules stay deterministic under test.

pub mod calendar;
pub mod due_date;
pub mod error;
pub mod fields;
pub mod identity;
pub mod levels;
pub mod progress;
pub mod themes;
pub mod types;
