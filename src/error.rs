//! Error types for script search operations.
//!
//! This module defines [`SearchError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SearchError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `SearchError::Other`) for unexpected errors
//! - Per-script extraction errors are recoverable; see
//!   [`SearchError::is_extraction_failure`]

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for script search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The script directory does not exist or is not a directory.
    #[error("Script directory not found: {path}")]
    ScriptDirNotFound { path: PathBuf },

    /// File name glob could not be compiled.
    #[error("Invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Keyword list was empty or contained an empty keyword.
    #[error("Invalid keyword: {message}")]
    InvalidKeyword { message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A script's leading docstring could not be parsed.
    #[error("Malformed source in {path} (line {line}): {message}")]
    MalformedSource {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// External command could not be spawned or exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// External command did not finish before its deadline.
    #[error("Command timed out after {timeout_secs}s: {command}")]
    CommandTimedOut { command: String, timeout_secs: u64 },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SearchError {
    /// Whether this error came from extracting one script's text.
    ///
    /// These are the errors a scan may skip over in lenient mode.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            Self::MalformedSource { .. }
                | Self::CommandFailed { .. }
                | Self::CommandTimedOut { .. }
                | Self::Io(_)
        )
    }
}

/// Result type alias for script search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
