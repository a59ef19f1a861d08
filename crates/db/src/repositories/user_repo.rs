//! Repository for the `users` table.

use sqlx::PgPool;
use taskdeck_core::types::DbId;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, role, created_at, updated_at";

/// Provides create and lookup operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Unique violations surface as `sqlx::Error::Database` on the
    /// `uq_users_username` / `uq_users_email` indexes.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Whether a user with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email. Emails are stored lower-cased, so the input is
    /// lower-cased before comparison.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email.to_lowercase())
            .fetch_optional(pool)
            .await
    }

    /// Resolve a login identifier.
    ///
    /// A username match takes precedence; only when no user has that
    /// username is the identifier tried as an email.
    pub async fn find_by_identifier(
        pool: &PgPool,
        identifier: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        if let Some(user) = Self::find_by_username(pool, identifier).await? {
            return Ok(Some(user));
        }
        Self::find_by_email(pool, identifier).await
    }

    /// Whether any user already holds the given username or email.
    pub async fn identity_taken(
        pool: &PgPool,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM users
                WHERE ($1::TEXT IS NOT NULL AND username = $1)
                   OR ($2::TEXT IS NOT NULL AND email = $2)
             )",
        )
        .bind(username)
        .bind(email)
        .fetch_one(pool)
        .await
    }
}
