//! Validation error types

use serde::Serialize;
use std::fmt;

/// Which of the three submission fields were absent or empty.
///
/// Serialized into the 400 body so clients can flag exactly the fields
/// that need filling in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MissingFields {
    pub name: bool,
    pub age: bool,
    pub city: bool,
}

impl MissingFields {
    pub fn any(&self) -> bool {
        self.name || self.age || self.city
    }
}

/// Validation error for submitted records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields absent or empty before trimming
    Missing(MissingFields),

    /// Age not parseable as an integer, or outside 0..=120
    InvalidAge { value: String },

    /// Name empty after trimming or over the length bound
    InvalidName,

    /// City empty after trimming or over the length bound
    InvalidCity,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(fields) => {
                let mut absent = Vec::new();
                if fields.name {
                    absent.push("name");
                }
                if fields.age {
                    absent.push("age");
                }
                if fields.city {
                    absent.push("city");
                }
                write!(f, "missing required field(s): {}", absent.join(", "))
            }
            Self::InvalidAge { value } => {
                write!(f, "age '{}' must be an integer between 0 and 120", value)
            }
            Self::InvalidName => write!(f, "name must be 1-100 characters"),
            Self::InvalidCity => write!(f, "city must be 1-100 characters"),
        }
    }
}

impl std::error::Error for ValidationError {}
