//! HTTP server layer
//!
//! Axum server with:
//! - Static form page via ServeDir
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extract;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{run_server, AppState};
