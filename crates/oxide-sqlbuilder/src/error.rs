//! Error types for statement building.

use thiserror::Error;

/// Errors raised while building or validating a statement.
///
/// Rendering never produces an error: a tree that fails validation still
/// renders to text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlBuilderError {
    /// A conversion rule received an input shape it does not accept.
    #[error("unsupported input for {rule} conversion: {input}")]
    UnsupportedInput {
        /// The conversion rule that rejected the input.
        rule: &'static str,
        /// The kind of input that was rejected.
        input: &'static str,
    },

    /// A structural or referential rule was violated.
    #[error("validation error: {0}")]
    Validation(String),
}

impl SqlBuilderError {
    /// Creates a validation error with the given reason.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    /// Returns the human-readable reason of a validation error.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Validation(reason) => Some(reason),
            Self::UnsupportedInput { .. } => None,
        }
    }
}

/// Result type alias for builder operations.
pub type Result<T> = std::result::Result<T, SqlBuilderError>;
