//! Error types for codification, learning and inference

use thiserror::Error;

/// Errors that can occur while fitting, learning or advising
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Value was never seen when the codebook was fitted
    #[error("unknown category {value:?} in column {column:?}")]
    UnknownCategory { column: String, value: String },

    /// No label is attached to the code in this column
    #[error("unknown code {code} in column {column:?}")]
    UnknownCode { column: String, code: usize },

    /// Structurally impossible setup (zero arity, ragged table, absent column, ...)
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Feature vector does not match the tree's variable count
    #[error("feature vector has {actual} values, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Inference record lacks a predictor cell
    #[error("record has no value for column {column:?}")]
    MissingField { column: String },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdvisorError {
    /// Whether this error only concerns a single inference record.
    ///
    /// Record failures are reported and skipped; everything else is fatal.
    pub fn is_record_failure(&self) -> bool {
        matches!(
            self,
            Self::UnknownCategory { .. } | Self::UnknownCode { .. } | Self::MissingField { .. }
        )
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}

/// Result type for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_failures() {
        let unknown = AdvisorError::UnknownCategory {
            column: "color".into(),
            value: "green".into(),
        };
        assert!(unknown.is_record_failure());
        assert!(AdvisorError::UnknownCode {
            column: "color".into(),
            code: 7
        }
        .is_record_failure());
        assert!(!AdvisorError::config("arity 0").is_record_failure());
    }

    #[test]
    fn test_error_messages() {
        let err = AdvisorError::UnknownCode {
            column: "advies".into(),
            code: 3,
        };
        assert_eq!(err.to_string(), "unknown code 3 in column \"advies\"");
        assert_eq!(
            AdvisorError::config("no predictors").to_string(),
            "invalid configuration: no predictors"
        );
    }
}
