use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::goals;
use crate::state::AppState;

/// Goal routes mounted at `/goals`.
///
/// ```text
/// GET    /                                   -> list_goals (?userId=)
/// POST   /                                   -> create_goal
/// GET    /user/{userId}                      -> list_goals_by_owner
/// GET    /user/{userId}/stats                -> goal_stats
/// GET    /{id}                               -> get_goal
/// PUT    /{id}                               -> update_goal
/// DELETE /{id}                               -> delete_goal
/// POST   /{goalId}/subgoals                  -> add_subgoal
/// PUT    /{goalId}/subgoals/{subGoalId}      -> update_subgoal
/// DELETE /{goalId}/subgoals/{subGoalId}      -> delete_subgoal
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(goals::list_goals).post(goals::create_goal))
        .route("/user/{user_id}", get(goals::list_goals_by_owner))
        .route("/user/{user_id}/stats", get(goals::goal_stats))
        .route(
            "/{id}",
            get(goals::get_goal)
                .put(goals::update_goal)
                .delete(goals::delete_goal),
        )
        .route("/{id}/subgoals", post(goals::add_subgoal))
        .route(
            "/{id}/subgoals/{subgoal_id}",
            put(goals::update_subgoal).delete(goals::delete_subgoal),
        )
}
