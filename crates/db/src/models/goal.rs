//! Goal entity model and DTOs.

use sqlx::FromRow;
use taskdeck_core::progress::{goal_progress, Checklist, SubitemCounts};
use taskdeck_core::types::{DbId, Timestamp};

use crate::models::checklist::{ChecklistItem, NewChecklistItem};
use crate::models::user::OwnerInfo;

/// A row from the `goals` table joined with its owner's public fields.
#[derive(Debug, Clone, FromRow)]
pub struct Goal {
    pub id: DbId,
    pub user_id: DbId,
    pub aim: String,
    pub description: String,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub owner_username: Option<String>,
    pub owner_email: Option<String>,
}

/// A goal together with its ordered subgoals.
#[derive(Debug, Clone)]
pub struct GoalWithSubgoals {
    pub goal: Goal,
    pub subgoals: Vec<ChecklistItem>,
}

impl GoalWithSubgoals {
    pub fn owner(&self) -> OwnerInfo {
        OwnerInfo {
            id: self.goal.user_id,
            username: self.goal.owner_username.clone(),
            email: self.goal.owner_email.clone(),
        }
    }
}

impl Checklist for GoalWithSubgoals {
    fn is_completed(&self) -> bool {
        self.goal.completed
    }

    fn subitem_counts(&self) -> SubitemCounts {
        SubitemCounts::from_flags(self.subgoals.iter().map(|s| s.completed))
    }

    /// Subgoals only; the goal's own flag never moves the bar.
    fn progress(&self) -> f64 {
        goal_progress(self.subitem_counts())
    }
}

/// DTO for creating a goal.
#[derive(Debug, Clone)]
pub struct CreateGoal {
    pub user_id: DbId,
    pub aim: String,
    pub description: String,
    pub completed: bool,
    pub subgoals: Vec<NewChecklistItem>,
}

/// DTO for partially updating a goal. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateGoal {
    pub aim: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}
