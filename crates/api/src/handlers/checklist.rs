//! Request and response shapes shared by subtasks and subgoals.

use serde::{Deserialize, Serialize};
use taskdeck_core::error::CoreError;
use taskdeck_core::fields::{required_title, updated_title};
use taskdeck_core::types::{DbId, Timestamp};
use taskdeck_db::models::checklist::{ChecklistItem, NewChecklistItem, UpdateChecklistItem};

/// A subtask or subgoal as the client sees it.
#[derive(Debug, Serialize)]
pub struct ChecklistItemResponse {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

impl From<&ChecklistItem> for ChecklistItemResponse {
    fn from(item: &ChecklistItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            completed: item.completed,
            created_at: item.created_at,
        }
    }
}

pub fn item_responses(items: &[ChecklistItem]) -> Vec<ChecklistItemResponse> {
    items.iter().map(ChecklistItemResponse::from).collect()
}

/// An entry of the initial `SubTasks` / `subGoals` list on create.
#[derive(Debug, Deserialize)]
pub struct SubItemInput {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Body of `POST .../subtasks` and `POST .../subgoals`.
#[derive(Debug, Deserialize)]
pub struct AddSubItemRequest {
    pub title: Option<String>,
}

/// Body of `PUT .../subtasks/{id}` and `PUT .../subgoals/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubItemRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Validate the initial subitems of a new task or goal.
pub fn new_items(inputs: Option<Vec<SubItemInput>>) -> Result<Vec<NewChecklistItem>, CoreError> {
    inputs
        .unwrap_or_default()
        .into_iter()
        .map(|input| {
            Ok(NewChecklistItem {
                title: required_title("title", input.title.as_deref())?,
                completed: input.completed.unwrap_or(false),
            })
        })
        .collect()
}

impl AddSubItemRequest {
    pub fn validate(&self) -> Result<NewChecklistItem, CoreError> {
        required_title("title", self.title.as_deref()).map(NewChecklistItem::titled)
    }
}

impl UpdateSubItemRequest {
    pub fn validate(&self) -> Result<UpdateChecklistItem, CoreError> {
        Ok(UpdateChecklistItem {
            title: updated_title("title", self.title.as_deref())?,
            completed: self.completed,
        })
    }
}
