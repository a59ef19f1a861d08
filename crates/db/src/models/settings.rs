//! Per-user UI settings.

use sqlx::FromRow;
use taskdeck_core::types::{DbId, Timestamp};

/// A row from the `user_settings` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserSettings {
    pub id: DbId,
    pub user_id: DbId,
    pub theme: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
