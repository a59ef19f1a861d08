//! Handlers for the `/goals` resource and its subgoals.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use taskdeck_core::error::CoreError;
use taskdeck_core::fields::{required_text, required_title, updated_text, updated_title};
use taskdeck_core::progress::{Checklist, ProgressSummary, Status};
use taskdeck_core::types::{DbId, Timestamp};
use taskdeck_db::models::checklist::ChecklistChange;
use taskdeck_db::models::goal::{CreateGoal, GoalWithSubgoals, UpdateGoal};
use taskdeck_db::models::user::OwnerInfo;
use taskdeck_db::repositories::GoalRepo;

use super::checklist::{
    item_responses, new_items, AddSubItemRequest, ChecklistItemResponse, SubItemInput,
    UpdateSubItemRequest,
};
use super::ensure_owner_exists;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A goal as returned by every goal endpoint.
#[derive(Debug, Serialize)]
pub struct GoalResponse {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub user: OwnerInfo,
    #[serde(rename = "Goal_Aim")]
    pub aim: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Goal_Completed")]
    pub completed: bool,
    #[serde(rename = "subGoals")]
    pub subgoals: Vec<ChecklistItemResponse>,
    /// Share of completed subgoals; the goal's own flag does not count.
    pub progress: f64,
    pub status: Status,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
}

impl From<&GoalWithSubgoals> for GoalResponse {
    fn from(g: &GoalWithSubgoals) -> Self {
        Self {
            id: g.goal.id,
            user: g.owner(),
            aim: g.goal.aim.clone(),
            description: g.goal.description.clone(),
            completed: g.goal.completed,
            subgoals: item_responses(&g.subgoals),
            progress: g.progress(),
            status: g.status(),
            created_at: g.goal.created_at,
            updated_at: g.goal.updated_at,
        }
    }
}

/// Request body for `POST /goals`.
#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<DbId>,
    #[serde(rename = "Goal_Aim")]
    pub aim: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Goal_Completed")]
    pub completed: Option<bool>,
    #[serde(rename = "subGoals")]
    pub subgoals: Option<Vec<SubItemInput>>,
}

/// Request body for `PUT /goals/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateGoalRequest {
    #[serde(rename = "Goal_Aim")]
    pub aim: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Goal_Completed")]
    pub completed: Option<bool>,
}

/// Query string of `GET /goals`.
#[derive(Debug, Deserialize)]
pub struct ListGoalsQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<DbId>,
}

impl CreateGoalRequest {
    pub fn validate(self) -> Result<CreateGoal, CoreError> {
        let user_id = self
            .user_id
            .ok_or_else(|| CoreError::validation("userId is required"))?;
        Ok(CreateGoal {
            user_id,
            aim: required_title("Goal_Aim", self.aim.as_deref())?,
            description: required_text("Description", self.description.as_deref())?,
            completed: self.completed.unwrap_or(false),
            subgoals: new_items(self.subgoals)?,
        })
    }
}

impl UpdateGoalRequest {
    pub fn validate(&self) -> Result<UpdateGoal, CoreError> {
        Ok(UpdateGoal {
            aim: updated_title("Goal_Aim", self.aim.as_deref())?,
            description: updated_text("Description", self.description.as_deref())?,
            completed: self.completed,
        })
    }
}

fn goal_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Goal",
        id,
    })
}

fn subgoal_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Subgoal",
        id,
    })
}

fn to_responses(goals: &[GoalWithSubgoals]) -> Vec<GoalResponse> {
    goals.iter().map(GoalResponse::from).collect()
}

// ---------------------------------------------------------------------------
// Goal handlers
// ---------------------------------------------------------------------------

/// GET /goals?userId=
pub async fn list_goals(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListGoalsQuery>,
) -> AppResult<Json<Vec<GoalResponse>>> {
    let goals = GoalRepo::list(&state.pool, query.user_id).await?;
    Ok(Json(to_responses(&goals)))
}

/// POST /goals
pub async fn create_goal(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateGoalRequest>,
) -> AppResult<(StatusCode, Json<GoalResponse>)> {
    let input = input.validate()?;
    ensure_owner_exists(&state.pool, input.user_id).await?;

    let goal = GoalRepo::create(&state.pool, &input).await?;

    tracing::info!(goal_id = goal.goal.id, user_id = input.user_id, "Goal created");

    Ok((StatusCode::CREATED, Json(GoalResponse::from(&goal))))
}

/// GET /goals/user/{userId}
pub async fn list_goals_by_owner(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<Json<Vec<GoalResponse>>> {
    ensure_owner_exists(&state.pool, user_id).await?;
    let goals = GoalRepo::list_by_owner(&state.pool, user_id).await?;
    Ok(Json(to_responses(&goals)))
}

/// GET /goals/{id}
pub async fn get_goal(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<GoalResponse>> {
    let goal = GoalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| goal_not_found(id))?;
    Ok(Json(GoalResponse::from(&goal)))
}

/// PUT /goals/{id}
pub async fn update_goal(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateGoalRequest>,
) -> AppResult<Json<GoalResponse>> {
    let update = input.validate()?;
    let goal = GoalRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| goal_not_found(id))?;

    tracing::info!(goal_id = id, "Goal updated");

    Ok(Json(GoalResponse::from(&goal)))
}

/// DELETE /goals/{id}
pub async fn delete_goal(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !GoalRepo::delete(&state.pool, id).await? {
        return Err(goal_not_found(id));
    }

    tracing::info!(goal_id = id, "Goal deleted");

    Ok(Json(MessageResponse::new("Goal deleted")))
}

// ---------------------------------------------------------------------------
// Subgoal handlers
// ---------------------------------------------------------------------------

/// POST /goals/{goalId}/subgoals
pub async fn add_subgoal(
    State(state): State<AppState>,
    AppPath(goal_id): AppPath<DbId>,
    AppJson(input): AppJson<AddSubItemRequest>,
) -> AppResult<(StatusCode, Json<GoalResponse>)> {
    let item = input.validate()?;
    let goal = GoalRepo::add_subgoal(&state.pool, goal_id, &item)
        .await?
        .ok_or_else(|| goal_not_found(goal_id))?;

    tracing::info!(goal_id, subgoals = goal.subgoals.len(), "Subgoal added");

    Ok((StatusCode::CREATED, Json(GoalResponse::from(&goal))))
}

/// PUT /goals/{goalId}/subgoals/{subGoalId}
pub async fn update_subgoal(
    State(state): State<AppState>,
    AppPath((goal_id, subgoal_id)): AppPath<(DbId, DbId)>,
    AppJson(input): AppJson<UpdateSubItemRequest>,
) -> AppResult<Json<GoalResponse>> {
    let update = input.validate()?;
    match GoalRepo::update_subgoal(&state.pool, goal_id, subgoal_id, &update).await? {
        ChecklistChange::ParentNotFound => Err(goal_not_found(goal_id)),
        ChecklistChange::ItemNotFound => Err(subgoal_not_found(subgoal_id)),
        ChecklistChange::Applied(goal) => {
            tracing::info!(goal_id, subgoal_id, "Subgoal updated");
            Ok(Json(GoalResponse::from(&goal)))
        }
    }
}

/// DELETE /goals/{goalId}/subgoals/{subGoalId}
pub async fn delete_subgoal(
    State(state): State<AppState>,
    AppPath((goal_id, subgoal_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<GoalResponse>> {
    match GoalRepo::delete_subgoal(&state.pool, goal_id, subgoal_id).await? {
        ChecklistChange::ParentNotFound => Err(goal_not_found(goal_id)),
        ChecklistChange::ItemNotFound => Err(subgoal_not_found(subgoal_id)),
        ChecklistChange::Applied(goal) => {
            tracing::info!(goal_id, subgoal_id, "Subgoal deleted");
            Ok(Json(GoalResponse::from(&goal)))
        }
    }
}

/// GET /goals/user/{userId}/stats
pub async fn goal_stats(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<Json<ProgressSummary>> {
    ensure_owner_exists(&state.pool, user_id).await?;
    let goals = GoalRepo::list_by_owner(&state.pool, user_id).await?;
    Ok(Json(ProgressSummary::from_items(&goals)))
}
