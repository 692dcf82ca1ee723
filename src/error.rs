// src/error.rs

use thiserror::Error;

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Everything the engine can refuse to do.
#[derive(Error, Debug)]
pub enum SimError {
    /// Malformed or out-of-range input (parameters or run configuration).
    #[error("Invalid value for `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Statistics requested over zero observations.
    #[error("No observations to aggregate for {context}")]
    EmptyInput { context: String },

    /// The caller abandoned the batch before it finished.
    #[error("Simulation batch cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Create a validation error.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Create an empty input error.
    pub fn empty_input(context: impl Into<String>) -> Self {
        Self::EmptyInput {
            context: context.into(),
        }
    }
}
