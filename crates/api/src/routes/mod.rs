pub mod auth;
pub mod goals;
pub mod health;
pub mod settings;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree. Everything is mounted at the root,
/// which is where the web client expects it.
///
/// ```text
/// /health                                          service + database health
///
/// /register                                        create user
/// /login                                           authenticate
///
/// /tasks                                           list (?userId=), create
/// /tasks/user/{userId}                             list by owner
/// /tasks/user/{userId}/stats                       progress summary
/// /tasks/user/{userId}/calendar                    month grid (?year=&month=)
/// /tasks/{id}                                      get, update, delete
/// /tasks/{taskId}/subtasks                         add subtask
/// /tasks/{taskId}/subtasks/{subTaskId}             update, delete subtask
///
/// /goals                                           list (?userId=), create
/// /goals/user/{userId}                             list by owner
/// /goals/user/{userId}/stats                       progress summary
/// /goals/{id}                                      get, update, delete
/// /goals/{goalId}/subgoals                         add subgoal
/// /goals/{goalId}/subgoals/{subGoalId}             update, delete subgoal
///
/// /settings                                        save theme
/// /settings/themes                                 available themes
/// /settings/{userId}                               get theme
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .nest("/tasks", tasks::router())
        .nest("/goals", goals::router())
        .nest("/settings", settings::router())
}
