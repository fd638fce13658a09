//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Taxonomy
//!
//! - **InvalidPath**: the analysis root exists but is not a directory
//!   (fatal to the analyze call)
//! - **NotFound**: unknown protocol name passed to compare/migrate
//!   (fatal to that call only)
//! - **Io/Json/Config**: ambient system errors
//!
//! Per-file read failures during a scan are intentionally NOT errors:
//! unreadable or binary files are skipped and the scan continues.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Invalid path: {path} exists but is not a directory")]
    InvalidPath { path: PathBuf },

    #[error("Unknown protocol: {name}")]
    NotFound { name: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl AnalyzerError {
    /// Create an InvalidPath error
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create a NotFound error for an unregistered protocol name
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_display() {
        let err = AnalyzerError::invalid_path("/tmp/some-file.txt");
        assert_eq!(
            err.to_string(),
            "Invalid path: /tmp/some-file.txt exists but is not a directory"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = AnalyzerError::not_found("carrier-pigeon");
        assert_eq!(err.to_string(), "Unknown protocol: carrier-pigeon");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AnalyzerError = io.into();
        assert!(matches!(err, AnalyzerError::Io(_)));
    }
}
