//! Custom error types for the cleaning pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Every failure
//! is fatal for a run: nothing is written once an error has been raised.
//!
//! Errors are serializable so they can be embedded in JSON output alongside
//! cleaning reports.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// Input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input could not be parsed as CSV.
    #[error("Failed to parse CSV '{}': {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    /// Column was not found in the table.
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    /// Two headers collapsed to the same name after normalization.
    #[error("Column '{original}' normalizes to '{name}', which is already taken")]
    DuplicateColumn { name: String, original: String },

    /// A column had a different type than the operation requires.
    #[error("Column '{column}' is {actual}, expected {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::Parse { .. } => "PARSE_ERROR",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::DuplicateColumn { .. } => "DUPLICATE_COLUMN",
            Self::ColumnType { .. } => "COLUMN_TYPE",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error comes from a missing column.
    pub fn is_missing_column(&self) -> bool {
        match self {
            Self::ColumnNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_missing_column(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            CleaningError::FileNotFound(PathBuf::from("elements.csv")).error_code(),
            "FILE_NOT_FOUND"
        );
        assert_eq!(
            CleaningError::ColumnNotFound("Goal".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
    }

    #[test]
    fn test_file_not_found_message() {
        let error = CleaningError::FileNotFound(PathBuf::from("missing.csv"));
        assert_eq!(error.to_string(), "Input file not found: missing.csv");
    }

    #[test]
    fn test_is_missing_column() {
        assert!(CleaningError::ColumnNotFound("Array".to_string()).is_missing_column());
        assert!(
            CleaningError::ColumnNotFound("Array".to_string())
                .with_context("Discarding columns")
                .is_missing_column()
        );
        assert!(!CleaningError::FileNotFound(PathBuf::from("a.csv")).is_missing_column());
    }

    #[test]
    fn test_error_serialization() {
        let error = CleaningError::ColumnNotFound("Goal1".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("Goal1"));
    }

    #[test]
    fn test_with_context() {
        let error = CleaningError::DuplicateColumn {
            name: "Goal".to_string(),
            original: "Go-al".to_string(),
        }
        .with_context("Normalizing column names");
        assert!(error.to_string().contains("Normalizing column names"));
        assert_eq!(error.error_code(), "DUPLICATE_COLUMN");
    }
}
