//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod pagination;
pub mod user;
pub mod validation;

pub use pagination::{PageMeta, Paginated, Pagination, PaginationParams};
pub use user::{NewUser, User};
pub use validation::{MissingFields, ValidationError};
