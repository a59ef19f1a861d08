//! Liveness and database reachability.
//!
//! Mounted at the root next to the resource routers. Load balancers key off
//! the status code: 200 while the store answers, 503 once it stops.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Name reported in the health payload.
pub const SERVICE_NAME: &str = "taskdeck";

/// Overall service condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    /// The process is up but PostgreSQL did not answer.
    Degraded,
}

impl HealthStatus {
    pub fn from_db(db_healthy: bool) -> Self {
        if db_healthy {
            HealthStatus::Ok
        } else {
            HealthStatus::Degraded
        }
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            HealthStatus::Ok => StatusCode::OK,
            HealthStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub status: HealthStatus,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_healthy = match taskdeck_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };
    let status = HealthStatus::from_db(db_healthy);

    (
        status.status_code(),
        Json(HealthResponse {
            service: SERVICE_NAME,
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
