//! Repository for the `user_settings` table.

use sqlx::PgPool;
use taskdeck_core::types::DbId;

use crate::models::settings::UserSettings;

const COLUMNS: &str = "id, user_id, theme, created_at, updated_at";

/// Provides lookup and upsert for per-user settings.
pub struct SettingsRepo;

impl SettingsRepo {
    /// Find the settings row for a user, if one was ever saved.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_settings WHERE user_id = $1");
        sqlx::query_as::<_, UserSettings>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Create the settings row or overwrite its theme.
    pub async fn upsert_theme(
        pool: &PgPool,
        user_id: DbId,
        theme: &str,
    ) -> Result<UserSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_settings (user_id, theme)
             VALUES ($1, $2)
             ON CONFLICT (user_id) DO UPDATE SET theme = EXCLUDED.theme
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSettings>(&query)
            .bind(user_id)
            .bind(theme)
            .fetch_one(pool)
            .await
    }
}
