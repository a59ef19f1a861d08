//! Handlers for per-user UI settings (currently just the theme).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use taskdeck_core::error::CoreError;
use taskdeck_core::fields::required_title;
use taskdeck_core::themes::{validate_theme, AVAILABLE_THEMES, DEFAULT_THEME};
use taskdeck_core::types::DbId;
use taskdeck_db::repositories::SettingsRepo;

use super::ensure_owner_exists;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

/// Settings as the client sees them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub user_id: DbId,
    pub theme: String,
}

/// Request body for `POST /settings`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingsRequest {
    pub user_id: Option<DbId>,
    pub theme: Option<String>,
}

/// Response of `GET /settings/themes`.
#[derive(Debug, Serialize)]
pub struct ThemesResponse {
    pub themes: &'static [&'static str],
    pub default: &'static str,
}

/// GET /settings/{userId}
///
/// A user who never saved settings gets the default theme, not a 404.
pub async fn get_settings(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<Json<SettingsResponse>> {
    ensure_owner_exists(&state.pool, user_id).await?;

    let theme = SettingsRepo::find_by_user(&state.pool, user_id)
        .await?
        .map(|s| s.theme)
        .unwrap_or_else(|| DEFAULT_THEME.to_string());

    Ok(Json(SettingsResponse { user_id, theme }))
}

/// POST /settings
///
/// Create or overwrite the user's theme. Saving the same theme twice is a no-op.
pub async fn save_settings(
    State(state): State<AppState>,
    AppJson(input): AppJson<SaveSettingsRequest>,
) -> AppResult<Json<SettingsResponse>> {
    let user_id = input
        .user_id
        .ok_or_else(|| CoreError::validation("userId is required"))?;
    let theme = required_title("theme", input.theme.as_deref())?;
    validate_theme(&theme)?;

    ensure_owner_exists(&state.pool, user_id).await?;
    let settings = SettingsRepo::upsert_theme(&state.pool, user_id, &theme).await?;

    tracing::info!(user_id, theme = %settings.theme, "User settings saved");

    Ok(Json(SettingsResponse {
        user_id: settings.user_id,
        theme: settings.theme,
    }))
}

/// GET /settings/themes
pub async fn list_themes() -> Json<ThemesResponse> {
    Json(ThemesResponse {
        themes: AVAILABLE_THEMES,
        default: DEFAULT_THEME,
    })
}
