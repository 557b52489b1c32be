//! rollcall-server: HTTP intake service
//!
//! Serves the submission form, accepts validated user entries
//! (name, age, city), persists them through a bounded Postgres pool,
//! and exposes a paginated listing plus a health probe.

pub mod db;
pub mod http;
pub mod models;
