//! Core error types for the rebate desk.
//!
//! Every failure a user can see falls into one of three groups: transport
//! failures (no response), application failures (a response with
//! `success: false`), and client-side validation failures caught before any
//! request is sent. All three share this enum so callers can surface them the
//! same way.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the rebate client.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered but refused the operation.
    #[error("{0}")]
    Api(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("You must sign in first")]
    Unauthenticated,

    #[error("Already signed in as {0}")]
    AlreadyAuthenticated(String),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Failed to (de)serialize data: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for user input and data parsing.
///
/// The display strings are shown to the operator verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Full name is required.")]
    MissingFullName,

    /// A numeric-looking field holds text that is not a number.
    #[error("{} must be a number", .0.replace('_', " "))]
    NotANumber(String),

    #[error("Record {record_id} has a non-numeric {field}: '{value}'")]
    MalformedAmount {
        record_id: i64,
        field: String,
        value: String,
    },

    #[error("Select at least one application")]
    EmptySelection,

    #[error("A delete code is required")]
    MissingDeleteCode,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// === From implementations for common error types ===

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Session(err.to_string())
    }
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_number_message_uses_field_words() {
        let err = ValidationError::NotANumber("building_sqft".to_string());
        assert_eq!(err.to_string(), "building sqft must be a number");
    }

    #[test]
    fn test_validation_error_displays_without_prefix() {
        let err: Error = ValidationError::MissingFullName.into();
        assert_eq!(err.to_string(), "Full name is required.");
    }
}
