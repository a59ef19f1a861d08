//! Task entity model and DTOs.

use chrono::NaiveDate;
use sqlx::FromRow;
use taskdeck_core::levels::Level;
use taskdeck_core::progress::{task_progress, Checklist, SubitemCounts};
use taskdeck_core::types::{DbId, Timestamp};

use crate::models::checklist::{ChecklistItem, NewChecklistItem};
use crate::models::user::OwnerInfo;

/// A row from the `tasks` table joined with its owner's public fields.
#[derive(Debug, Clone, FromRow)]
pub struct Task {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub due_date: NaiveDate,
    pub priority: String,
    pub urgency: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub owner_username: Option<String>,
    pub owner_email: Option<String>,
}

/// A task together with its ordered subtasks.
#[derive(Debug, Clone)]
pub struct TaskWithSubtasks {
    pub task: Task,
    pub subtasks: Vec<ChecklistItem>,
}

impl TaskWithSubtasks {
    pub fn owner(&self) -> OwnerInfo {
        OwnerInfo {
            id: self.task.user_id,
            username: self.task.owner_username.clone(),
            email: self.task.owner_email.clone(),
        }
    }
}

impl Checklist for TaskWithSubtasks {
    fn is_completed(&self) -> bool {
        self.task.completed
    }

    fn subitem_counts(&self) -> SubitemCounts {
        SubitemCounts::from_flags(self.subtasks.iter().map(|s| s.completed))
    }

    fn progress(&self) -> f64 {
        task_progress(self.task.completed, self.subitem_counts())
    }
}

/// DTO for creating a task. Defaults (due date, levels) are already resolved.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub due_date: NaiveDate,
    pub priority: Level,
    pub urgency: Level,
    pub subtasks: Vec<NewChecklistItem>,
}

/// DTO for partially updating a task. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Level>,
    pub urgency: Option<Level>,
}
