//! Checklist items shared by tasks (subtasks) and goals (subgoals).
//!
//! Both child tables have the same shape; queries alias the foreign key
//! column to `parent_id` so one row type serves both.

use sqlx::FromRow;
use taskdeck_core::types::{DbId, Timestamp};

/// A subtask or subgoal row.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ChecklistItem {
    pub id: DbId,
    pub parent_id: DbId,
    pub position: i32,
    pub title: String,
    pub completed: bool,
    pub created_at: Timestamp,
}

/// DTO for appending a checklist item. The title is already trimmed.
#[derive(Debug, Clone)]
pub struct NewChecklistItem {
    pub title: String,
    pub completed: bool,
}

impl NewChecklistItem {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }
}

/// DTO for updating a checklist item. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateChecklistItem {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Outcome of a mutation addressed to one item of a parent's checklist.
#[derive(Debug)]
pub enum ChecklistChange<T> {
    /// The parent task or goal does not exist.
    ParentNotFound,
    /// The parent exists but has no item with the given id.
    ItemNotFound,
    /// The mutation was applied; carries the reloaded parent.
    Applied(T),
}
