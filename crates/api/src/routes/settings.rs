use axum::routing::{get, post};
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Settings routes mounted at `/settings`.
///
/// ```text
/// POST /              -> save_settings
/// GET  /themes        -> list_themes
/// GET  /{userId}      -> get_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(settings::save_settings))
        .route("/themes", get(settings::list_themes))
        .route("/{user_id}", get(settings::get_settings))
}
