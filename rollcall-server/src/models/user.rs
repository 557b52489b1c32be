//! User record validation
//!
//! `NewUser::parse` is the single gate between raw form input and the
//! database: pure, synchronous, no I/O. The storage schema only enforces
//! NOT NULL; every other bound lives here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::validation::{MissingFields, ValidationError};

/// Maximum length for name and city, in characters
const MAX_TEXT_LEN: usize = 100;

/// Inclusive age bounds
const MIN_AGE: i32 = 0;
const MAX_AGE: i32 = 120;

/// A persisted user record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub city: String,
    pub created_at: DateTime<Utc>,
}

/// A validated, normalized submission ready for insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub age: i32,
    pub city: String,
}

impl NewUser {
    /// Validate and normalize raw submission fields.
    ///
    /// # Rules
    /// - All three fields required; absence or pre-trim emptiness is
    ///   reported per-field via `Missing`
    /// - `name`/`city` are trimmed, then truncated to 100 characters
    /// - `age` must parse as an integer in 0..=120
    /// - Post-trim emptiness (whitespace-only input) is `InvalidName` /
    ///   `InvalidCity`
    pub fn parse(
        name: Option<&str>,
        age: Option<&str>,
        city: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let missing = MissingFields {
            name: name.map_or(true, str::is_empty),
            age: age.map_or(true, str::is_empty),
            city: city.map_or(true, str::is_empty),
        };
        if missing.any() {
            return Err(ValidationError::Missing(missing));
        }

        // Defaults are unreachable past the missing check
        let name = normalize(name.unwrap_or_default());
        let city = normalize(city.unwrap_or_default());

        let age_raw = age.unwrap_or_default().trim();
        let age: i32 = age_raw.parse().map_err(|_| ValidationError::InvalidAge {
            value: age_raw.to_owned(),
        })?;
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ValidationError::InvalidAge {
                value: age_raw.to_owned(),
            });
        }

        // Truncation makes the upper bound unreachable; the checks stay
        // as a safeguard against the normalization changing.
        if name.is_empty() || name.chars().count() > MAX_TEXT_LEN {
            return Err(ValidationError::InvalidName);
        }
        if city.is_empty() || city.chars().count() > MAX_TEXT_LEN {
            return Err(ValidationError::InvalidCity);
        }

        Ok(Self { name, age, city })
    }
}

/// Trim and truncate to the 100-character bound (char-boundary safe).
fn normalize(s: &str) -> String {
    s.trim().chars().take(MAX_TEXT_LEN).collect()
}
