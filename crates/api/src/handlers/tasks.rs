//! Handlers for the `/tasks` resource and its subtasks.
//!
//! Field names on the wire follow the client's established contract
//! (`Task_Title`, `Due_Date`, `SubTasks`, ...).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskdeck_core::calendar::{calendar_day, month_grid};
use taskdeck_core::due_date::{local_midnight, resolve_create_due_date, resolve_update_due_date};
use taskdeck_core::error::CoreError;
use taskdeck_core::fields::{required_text, required_title, updated_text, updated_title};
use taskdeck_core::levels::Level;
use taskdeck_core::progress::{Checklist, ProgressSummary, Status};
use taskdeck_core::types::{DbId, Timestamp};
use taskdeck_db::models::checklist::ChecklistChange;
use taskdeck_db::models::task::{CreateTask, TaskWithSubtasks, UpdateTask};
use taskdeck_db::models::user::OwnerInfo;
use taskdeck_db::repositories::TaskRepo;

use super::checklist::{
    item_responses, new_items, AddSubItemRequest, ChecklistItemResponse, SubItemInput,
    UpdateSubItemRequest,
};
use super::{ensure_owner_exists, local_today};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A task as returned by every task endpoint.
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub user: OwnerInfo,
    #[serde(rename = "Task_Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Task_Completed")]
    pub completed: bool,
    /// Local midnight of the due day, with offset.
    #[serde(rename = "Due_Date")]
    pub due_date: DateTime<FixedOffset>,
    #[serde(rename = "Priority")]
    pub priority: String,
    #[serde(rename = "Urgency")]
    pub urgency: String,
    #[serde(rename = "SubTasks")]
    pub subtasks: Vec<ChecklistItemResponse>,
    pub progress: f64,
    pub status: Status,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
}

impl From<&TaskWithSubtasks> for TaskResponse {
    fn from(t: &TaskWithSubtasks) -> Self {
        Self {
            id: t.task.id,
            user: t.owner(),
            title: t.task.title.clone(),
            description: t.task.description.clone(),
            completed: t.task.completed,
            due_date: local_midnight(t.task.due_date),
            priority: t.task.priority.clone(),
            urgency: t.task.urgency.clone(),
            subtasks: item_responses(&t.subtasks),
            progress: t.progress(),
            status: t.status(),
            created_at: t.task.created_at,
            updated_at: t.task.updated_at,
        }
    }
}

/// Request body for `POST /tasks`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<DbId>,
    #[serde(rename = "Task_Title")]
    pub title: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Task_Completed")]
    pub completed: Option<bool>,
    /// Kept loose so a malformed date on update can be ignored instead of
    /// failing deserialization of the whole body.
    #[serde(rename = "Due_Date")]
    pub due_date: Option<Value>,
    #[serde(rename = "Priority")]
    pub priority: Option<String>,
    #[serde(rename = "Urgency")]
    pub urgency: Option<String>,
    #[serde(rename = "SubTasks")]
    pub subtasks: Option<Vec<SubItemInput>>,
}

/// Request body for `PUT /tasks/{id}`. Absent and `null` fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(rename = "Task_Title")]
    pub title: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Task_Completed")]
    pub completed: Option<bool>,
    #[serde(rename = "Due_Date")]
    pub due_date: Option<Value>,
    #[serde(rename = "Priority")]
    pub priority: Option<String>,
    #[serde(rename = "Urgency")]
    pub urgency: Option<String>,
}

/// Query string of `GET /tasks`.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<DbId>,
}

/// Query string of `GET /tasks/user/{userId}/calendar`.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// One cell of the month grid.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCellResponse {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub tasks: Vec<TaskResponse>,
}

impl CreateTaskRequest {
    /// Validate the body and resolve every default against `today`.
    pub fn validate(self, today: NaiveDate) -> Result<CreateTask, CoreError> {
        let user_id = self
            .user_id
            .ok_or_else(|| CoreError::validation("userId is required"))?;
        let title = required_title("Task_Title", self.title.as_deref())?;
        let description = required_text("Description", self.description.as_deref())?;

        let due_text = match &self.due_date {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.as_str()),
            Some(_) => return Err(CoreError::validation("Due_Date must be a date string")),
        };
        let due_date = resolve_create_due_date(due_text, today)?;

        Ok(CreateTask {
            user_id,
            title,
            description,
            completed: self.completed.unwrap_or(false),
            due_date,
            priority: Level::resolve_for_create("Priority", self.priority.as_deref())?,
            urgency: Level::resolve_for_create("Urgency", self.urgency.as_deref())?,
            subtasks: new_items(self.subtasks)?,
        })
    }
}

impl UpdateTaskRequest {
    pub fn validate(&self) -> Result<UpdateTask, CoreError> {
        let due_date = match &self.due_date {
            Some(Value::String(s)) => resolve_update_due_date(Some(s)),
            _ => None,
        };

        Ok(UpdateTask {
            title: updated_title("Task_Title", self.title.as_deref())?,
            description: updated_text("Description", self.description.as_deref())?,
            completed: self.completed,
            due_date,
            priority: Level::resolve_for_update("Priority", self.priority.as_deref())?,
            urgency: Level::resolve_for_update("Urgency", self.urgency.as_deref())?,
        })
    }
}

fn task_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Task",
        id,
    })
}

fn subtask_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Subtask",
        id,
    })
}

fn to_responses(tasks: &[TaskWithSubtasks]) -> Vec<TaskResponse> {
    tasks.iter().map(TaskResponse::from).collect()
}

// ---------------------------------------------------------------------------
// Task handlers
// ---------------------------------------------------------------------------

/// GET /tasks?userId=
///
/// List every task, or only one user's tasks when `userId` is given.
pub async fn list_tasks(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListTasksQuery>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    let tasks = TaskRepo::list(&state.pool, query.user_id).await?;
    Ok(Json(to_responses(&tasks)))
}

/// POST /tasks
///
/// Create a task for an existing user. Returns 201 with the created task.
pub async fn create_task(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<TaskResponse>)> {
    let input = input.validate(local_today())?;
    ensure_owner_exists(&state.pool, input.user_id).await?;

    let task = TaskRepo::create(&state.pool, &input).await?;

    tracing::info!(
        task_id = task.task.id,
        user_id = input.user_id,
        due_date = %task.task.due_date,
        "Task created",
    );

    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

/// GET /tasks/user/{userId}
pub async fn list_tasks_by_owner(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    ensure_owner_exists(&state.pool, user_id).await?;
    let tasks = TaskRepo::list_by_owner(&state.pool, user_id).await?;
    Ok(Json(to_responses(&tasks)))
}

/// GET /tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<TaskResponse>> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| task_not_found(id))?;
    Ok(Json(TaskResponse::from(&task)))
}

/// PUT /tasks/{id}
///
/// Partial update. An unparseable `Due_Date` is ignored, not rejected.
pub async fn update_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTaskRequest>,
) -> AppResult<Json<TaskResponse>> {
    let update = input.validate()?;
    if input.due_date.is_some() && update.due_date.is_none() {
        tracing::debug!(task_id = id, "Ignoring unparseable Due_Date on update");
    }

    let task = TaskRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| task_not_found(id))?;

    tracing::info!(task_id = id, "Task updated");

    Ok(Json(TaskResponse::from(&task)))
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !TaskRepo::delete(&state.pool, id).await? {
        return Err(task_not_found(id));
    }

    tracing::info!(task_id = id, "Task deleted");

    Ok(Json(MessageResponse::new("Task deleted")))
}

// ---------------------------------------------------------------------------
// Subtask handlers
// ---------------------------------------------------------------------------

/// POST /tasks/{taskId}/subtasks
///
/// Append a subtask. Returns 201 with the updated task.
pub async fn add_subtask(
    State(state): State<AppState>,
    AppPath(task_id): AppPath<DbId>,
    AppJson(input): AppJson<AddSubItemRequest>,
) -> AppResult<(StatusCode, Json<TaskResponse>)> {
    let item = input.validate()?;
    let task = TaskRepo::add_subtask(&state.pool, task_id, &item)
        .await?
        .ok_or_else(|| task_not_found(task_id))?;

    tracing::info!(task_id, subtasks = task.subtasks.len(), "Subtask added");

    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

/// PUT /tasks/{taskId}/subtasks/{subTaskId}
pub async fn update_subtask(
    State(state): State<AppState>,
    AppPath((task_id, subtask_id)): AppPath<(DbId, DbId)>,
    AppJson(input): AppJson<UpdateSubItemRequest>,
) -> AppResult<Json<TaskResponse>> {
    let update = input.validate()?;
    match TaskRepo::update_subtask(&state.pool, task_id, subtask_id, &update).await? {
        ChecklistChange::ParentNotFound => Err(task_not_found(task_id)),
        ChecklistChange::ItemNotFound => Err(subtask_not_found(subtask_id)),
        ChecklistChange::Applied(task) => {
            tracing::info!(task_id, subtask_id, "Subtask updated");
            Ok(Json(TaskResponse::from(&task)))
        }
    }
}

/// DELETE /tasks/{taskId}/subtasks/{subTaskId}
///
/// Removes the subtask with that id; siblings keep their order.
pub async fn delete_subtask(
    State(state): State<AppState>,
    AppPath((task_id, subtask_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<TaskResponse>> {
    match TaskRepo::delete_subtask(&state.pool, task_id, subtask_id).await? {
        ChecklistChange::ParentNotFound => Err(task_not_found(task_id)),
        ChecklistChange::ItemNotFound => Err(subtask_not_found(subtask_id)),
        ChecklistChange::Applied(task) => {
            tracing::info!(task_id, subtask_id, "Subtask deleted");
            Ok(Json(TaskResponse::from(&task)))
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregate views
// ---------------------------------------------------------------------------

/// GET /tasks/user/{userId}/stats
pub async fn task_stats(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<Json<ProgressSummary>> {
    ensure_owner_exists(&state.pool, user_id).await?;
    let tasks = TaskRepo::list_by_owner(&state.pool, user_id).await?;
    Ok(Json(ProgressSummary::from_items(&tasks)))
}

/// GET /tasks/user/{userId}/calendar?year=&month=
///
/// Month grid of the user's tasks keyed by due day. Defaults to the
/// current local month.
pub async fn task_calendar(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
    AppQuery(query): AppQuery<CalendarQuery>,
) -> AppResult<Json<Vec<CalendarCellResponse>>> {
    let today = local_today();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    ensure_owner_exists(&state.pool, user_id).await?;
    let tasks = TaskRepo::list_by_owner(&state.pool, user_id).await?;

    let grid = month_grid(
        year,
        month,
        tasks.iter().map(|t| {
            (
                calendar_day(Some(t.task.due_date), t.task.created_at),
                TaskResponse::from(t),
            )
        }),
    )?;

    Ok(Json(
        grid.into_iter()
            .map(|cell| CalendarCellResponse {
                date: cell.date,
                is_current_month: cell.is_current_month,
                tasks: cell.items,
            })
            .collect(),
    ))
}
