use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Task routes mounted at `/tasks`.
///
/// ```text
/// GET    /                                   -> list_tasks (?userId=)
/// POST   /                                   -> create_task
/// GET    /user/{userId}                      -> list_tasks_by_owner
/// GET    /user/{userId}/stats                -> task_stats
/// GET    /user/{userId}/calendar             -> task_calendar (?year=&month=)
/// GET    /{id}                               -> get_task
/// PUT    /{id}                               -> update_task
/// DELETE /{id}                               -> delete_task
/// POST   /{taskId}/subtasks                  -> add_subtask
/// PUT    /{taskId}/subtasks/{subTaskId}      -> update_subtask
/// DELETE /{taskId}/subtasks/{subTaskId}      -> delete_subtask
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list_tasks).post(tasks::create_task))
        .route("/user/{user_id}", get(tasks::list_tasks_by_owner))
        .route("/user/{user_id}/stats", get(tasks::task_stats))
        .route("/user/{user_id}/calendar", get(tasks::task_calendar))
        .route(
            "/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/{id}/subtasks", post(tasks::add_subtask))
        .route(
            "/{id}/subtasks/{subtask_id}",
            put(tasks::update_subtask).delete(tasks::delete_subtask),
        )
}
