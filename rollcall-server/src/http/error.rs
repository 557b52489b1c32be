//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status
//! codes. How much database detail reaches the client is decided when
//! the error is built (from the configured environment), not here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Request body could not be read as a submission (400)
    UnreadableBody { message: String },

    /// Database error (500, logged; 503 when the pool timed out)
    Database { source: DbError, expose_detail: bool },
}

impl ApiError {
    /// Wrap a repository error, recording whether its detail may be
    /// shown to the client.
    pub fn database(source: DbError, expose_detail: bool) -> Self {
        Self::Database {
            source,
            expose_detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => {
                let mut body = json!({ "error": e.to_string() });
                if let ValidationError::Missing(fields) = e {
                    body["missing"] = json!(fields);
                }
                (StatusCode::BAD_REQUEST, body)
            }
            Self::UnreadableBody { message } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("unreadable request body: {}", message) }),
            ),
            Self::Database {
                source,
                expose_detail,
            } => {
                tracing::error!(error = %source, "database error");
                if source.is_pool_exhausted() {
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        json!({ "error": "no database connection available, try again shortly" }),
                    )
                } else if *expose_detail {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": source.to_string() }),
                    )
                } else {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": "an internal error occurred" }),
                    )
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
