//! Field validation rules shared by every entity.
//!
//! Each rule is a plain function over the value, so entities compose them in
//! their constructors and setters and the rules can be tested on their own.

use thiserror::Error;

/// A field value was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be a non-empty string")]
    Empty { field: &'static str },

    #[error("{field} must be a positive integer (got {value})")]
    NotPositive { field: &'static str, value: i64 },

    #[error("gender must be 'Male', 'Female', or 'Other' (got '{0}')")]
    InvalidGender(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reject empty text. Whitespace counts as content; values are stored verbatim.
pub fn non_empty(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

/// Reject zero and negative integers.
pub fn positive(field: &'static str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(())
}
