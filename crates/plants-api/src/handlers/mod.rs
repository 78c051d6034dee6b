//! API request handlers.

pub mod collections;
pub mod data;
pub mod health;
pub mod lists;

pub use collections::*;
pub use data::*;
pub use health::*;
pub use lists::*;

use crate::error::ApiError;

/// Unwraps a required body field.
pub(crate) fn require(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("{} is required", field)))
}
