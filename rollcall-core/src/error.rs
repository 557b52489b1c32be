//! Structured error types for rollcall-core.
//!
//! Uses `thiserror` for composable errors. The server binary wraps these
//! in `anyhow` at the edge; library consumers get structured variants.

use thiserror::Error;

/// Errors raised while assembling configuration at startup.
///
/// All of these are fatal: the process cannot come up with a broken
/// config, so `main` exits non-zero on any variant.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable is present but unusable
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}
