//! Handlers for registration and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use taskdeck_core::error::CoreError;
use taskdeck_core::identity::{login_identifier, prepare_registration};
use taskdeck_db::models::user::{CreateUser, UserResponse};
use taskdeck_db::repositories::UserRepo;

use crate::auth::password::{hash_password, verify_against_decoy, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /register`. At least one identifier is required.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /login`.
///
/// The identifier may arrive as `identifier`, `username` or `email`; it is
/// matched against usernames first, then emails.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body returned by both register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /register
///
/// Create a user. Returns 201 with the public user fields (never the hash).
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let password = input.password.as_deref().unwrap_or_default();
    let identity = prepare_registration(input.username.as_deref(), input.email.as_deref(), password)?;

    if UserRepo::identity_taken(
        &state.pool,
        identity.username.as_deref(),
        identity.email.as_deref(),
    )
    .await?
    {
        return Err(AppError::Core(CoreError::DuplicateIdentity(
            "This Username or Email already exists".into(),
        )));
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent registration can still win the race; the unique index
    // then surfaces as DUPLICATE_IDENTITY through the sqlx error mapping.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: identity.username,
            email: identity.email,
            password_hash,
            role: identity.role.as_str().to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully",
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /login
///
/// Authenticate by username or email plus password. Every failure is the
/// same 401 so the response never tells which half was wrong.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let password = input.password.as_deref().unwrap_or_default();

    let identifier = login_identifier(
        input.identifier.as_deref(),
        input.username.as_deref(),
        input.email.as_deref(),
    );
    let user = match identifier {
        Some(identifier) => UserRepo::find_by_identifier(&state.pool, &identifier).await?,
        None => None,
    };

    let Some(user) = user else {
        verify_against_decoy(password);
        tracing::debug!("Login rejected: unknown identifier");
        return Err(AppError::Core(CoreError::InvalidCredentials));
    };

    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::InvalidCredentials));
    }

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        message: "Login successful",
        user: UserResponse::from(&user),
    }))
}
