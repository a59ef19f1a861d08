//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create DTOs carrying already-validated values for inserts
//! - Update DTOs (all `Option` fields) for partial updates, where `None`
//!   always means "leave unchanged"

pub mod checklist;
pub mod goal;
pub mod settings;
pub mod task;
pub mod user;
