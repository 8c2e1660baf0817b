//! Core error types used across the workspace

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Malformed input in field '{field}': {value:?}")]
    MalformedInput { field: String, value: String },
}

impl CoreError {
    pub fn malformed(field: impl Into<String>, value: impl Into<String>) -> Self {
        CoreError::MalformedInput {
            field: field.into(),
            value: value.into(),
        }
    }
}
