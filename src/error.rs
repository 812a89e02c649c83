//! Error types for calidad.

use std::path::PathBuf;

/// Result type alias for calidad operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in calidad operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The path where the error occurred, if known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Arrow error during data processing.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet error during file operations.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Empty dataset error.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Schema mismatch between batches.
    #[error("Schema mismatch: {message}")]
    SchemaMismatch {
        /// Description of the schema mismatch.
        message: String,
    },

    /// Unsupported file format.
    #[error("Unsupported format: {format}")]
    UnsupportedFormat {
        /// The unsupported format name or extension.
        format: String,
    },

    /// Input rejected before any check ran (non-tabular or zero-row data).
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of why the input was rejected.
        message: String,
    },

    /// Format error (report serialization, etc.).
    #[error("Format error: {0}")]
    Format(String),
}

impl Error {
    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io(io_err, "/path/to/file");
        assert!(err.to_string().contains("/path/to/file"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_empty_dataset() {
        let err = Error::EmptyDataset;
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_schema_mismatch() {
        let err = Error::schema_mismatch("expected Int64, got Utf8");
        assert!(err.to_string().contains("expected Int64, got Utf8"));
    }

    #[test]
    fn test_unsupported_format() {
        let err = Error::unsupported_format("xlsx");
        assert!(err.to_string().contains("xlsx"));
    }

    #[test]
    fn test_invalid_input() {
        let err = Error::invalid_input("dataset has no rows");
        assert!(err.to_string().contains("dataset has no rows"));
    }

    #[test]
    fn test_format_error() {
        let err = Error::Format("bad report JSON".to_string());
        assert!(err.to_string().contains("bad report JSON"));
    }
}
