//! rollcall-core: shared configuration for the rollcall service
//!
//! The server crate consumes `Config` at startup; nothing here does I/O
//! beyond reading environment variables once.

pub mod config;
pub mod error;

pub use config::{Config, DatabaseConfig, Environment};
pub use error::ConfigError;
