use std::fmt;

use serde::Serialize;

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending form key.
    pub field: String,
    /// Human-readable reason, phrased to follow the field name.
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { field: field.into(), reason: reason.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

/// Errors produced by the `superheroes-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// One or more form fields were missing, malformed, or not allowed.
    #[error("validation failed: {}", join(.errors))]
    Validation { errors: Vec<FieldError> },
}

impl CoreError {
    /// Human-readable messages, one per rejected field.
    #[must_use]
    pub fn details(&self) -> Vec<String> {
        match self {
            CoreError::Validation { errors } => errors.iter().map(ToString::to_string).collect(),
        }
    }
}

fn join(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
