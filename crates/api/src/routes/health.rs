//! Liveness endpoint used by the web client and deploy checks.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Path of the liveness endpoint, outside the versioned `/api/v1` tree.
pub const HEALTH_ROUTE: &str = "/api/health";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"OK"` while the database answers, `"DEGRADED"` otherwise.
    pub status: &'static str,
    pub message: &'static str,
    /// `"connected"` or `"unreachable"`.
    pub database: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    fn from_db(db_reachable: bool) -> (StatusCode, Self) {
        let version = env!("CARGO_PKG_VERSION");
        if db_reachable {
            (
                StatusCode::OK,
                Self {
                    status: "OK",
                    message: "Server is running",
                    database: "connected",
                    version,
                },
            )
        } else {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Self {
                    status: "DEGRADED",
                    message: "Server is running but the database is unreachable",
                    database: "unreachable",
                    version,
                },
            )
        }
    }
}

/// GET /api/health
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let reachable = match cinelog_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the database");
            false
        }
    };
    let (status, body) = HealthResponse::from_db(reachable);
    (status, Json(body))
}

pub fn router() -> Router<AppState> {
    Router::new().route(HEALTH_ROUTE, get(health))
}
