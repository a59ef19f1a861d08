//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use taskdeck_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

/// Owner fields embedded in task and goal responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerInfo {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub username: Option<String>,
    pub email: Option<String>,
}

/// DTO for creating a new user. Identifiers are already normalized.
#[derive(Debug)]
pub struct CreateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: String,
}
