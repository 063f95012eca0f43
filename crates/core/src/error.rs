use thiserror::Error;

/// Error types for the Tasklens core
///
/// The filter engine itself is total and never produces one of these.
/// They arise at the boundary, when text or legacy records are turned
/// into the canonical model.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A record field carried a value that cannot be mapped to the model
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// Text did not name a known enum variant
    #[error("invalid {kind} '{value}'. Valid values: {expected}")]
    ParseEnum {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Error serializing tasks for export
    #[error("Failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Error writing CSV records
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl CoreError {
    /// Build an `InvalidField` error.
    pub fn invalid_field(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CoreError::InvalidField {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
