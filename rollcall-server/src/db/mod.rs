//! Database layer - connection pool, schema, repositories
//!
//! # Design Principles
//!
//! - Bounded connection pool with an acquire timeout - no unbounded
//!   wait queue behind a small pool
//! - Parameterized queries only
//! - Connections return to the pool when the query future resolves,
//!   including on error paths

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{connect_with_retry, ping};
pub use repos::{DbError, UserRepo};
