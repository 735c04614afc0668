//! Error types for analyze and encode operations.

use crate::value::Value;
use thiserror::Error;

/// Error type for one-hot operations.
///
/// `UsageFault` is a programming error and should not be retried.
/// `UnknownFeatureValue` and `NonNumericValue` are data errors scoped to a
/// single row; the encoder stays usable and sibling rows are unaffected.
#[derive(Debug, Error)]
pub enum OneHotError {
    /// Operation called in the wrong lifecycle state.
    #[error("Usage fault: {0}")]
    UsageFault(String),

    /// Encode-time lookup miss for a value never seen during analysis.
    #[error("Unknown feature value {value} at column {column}")]
    UnknownFeatureValue { column: usize, value: Value },

    /// A non-categorical column carried a non-numeric value at encode time.
    #[error("Non-numeric value {value} at non-categorical column {column}")]
    NonNumericValue { column: usize, value: Value },

    /// Every receiving end of a row feed has been dropped.
    #[error("Row feed closed")]
    FeedClosed,

    /// The upstream row source failed.
    #[error("Row source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl OneHotError {
    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        OneHotError::UsageFault(msg.into())
    }

    /// Returns `true` if the error only concerns the row that produced it.
    pub fn is_row_scoped(&self) -> bool {
        matches!(
            self,
            OneHotError::UnknownFeatureValue { .. } | OneHotError::NonNumericValue { .. }
        )
    }

    /// Column of the offending value, for row-scoped errors.
    pub fn column(&self) -> Option<usize> {
        match self {
            OneHotError::UnknownFeatureValue { column, .. }
            | OneHotError::NonNumericValue { column, .. } => Some(*column),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_usage_fault() {
        let err = OneHotError::usage("analysis already closed");
        assert!(err.to_string().contains("Usage fault"));
        assert!(err.to_string().contains("already closed"));
    }

    #[test]
    fn test_error_display_unknown_feature_value() {
        let err = OneHotError::UnknownFeatureValue {
            column: 3,
            value: Value::from("z"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Unknown feature value z"));
        assert!(msg.contains("column 3"));
    }

    #[test]
    fn test_error_display_non_numeric() {
        let err = OneHotError::NonNumericValue {
            column: 1,
            value: Value::from(true),
        };
        assert!(err.to_string().contains("Non-numeric value true"));
    }

    #[test]
    fn test_row_scoped_classification() {
        let unknown = OneHotError::UnknownFeatureValue {
            column: 0,
            value: Value::from("a"),
        };
        assert!(unknown.is_row_scoped());
        assert_eq!(unknown.column(), Some(0));

        assert!(!OneHotError::FeedClosed.is_row_scoped());
        assert_eq!(OneHotError::usage("x").column(), None);
    }

    #[test]
    fn test_error_from_source() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        let err = OneHotError::Source(Box::new(io));
        assert!(err.to_string().contains("truncated"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_is_std_error() {
        let err = OneHotError::FeedClosed;
        let _: &dyn std::error::Error = &err;
    }
}
