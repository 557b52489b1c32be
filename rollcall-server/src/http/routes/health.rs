//! Health check endpoint
//!
//! Reports uptime, environment, and a live pool ping. Read-only; the
//! ping is bounded by the pool's acquire timeout, so this never hangs
//! past that.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use rollcall_core::Environment;
use serde::Serialize;

use crate::db::pool::ping;
use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    /// Seconds since process start
    pub uptime: u64,
    pub environment: Environment,
    pub database: &'static str,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let (status_code, status, database) = match ping(state.pool()).await {
        Ok(()) => (StatusCode::OK, "ok", "connected"),
        Err(err) => {
            tracing::warn!(error = %err, "health ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "disconnected")
        }
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            timestamp: Utc::now(),
            uptime: state.uptime_secs(),
            environment: state.config.environment,
            database,
        }),
    )
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
