use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - a document was produced, possibly with warnings
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (input missing, output not writable, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Fatal application errors for notice generation.
///
/// Only conditions that abort the whole run live here. Per-package
/// problems (unparsable manifests, failed lookups, corrupt cache lines)
/// are carried as diagnostics instead so one bad package never sinks
/// the document.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum NoticeError {
    #[error("Input not found: {path}\n\n💡 Hint: {suggestion}")]
    InputNotFound { path: PathBuf, suggestion: String },

    #[error("Unsupported input: {path}\nReason: {reason}\n\n💡 Hint: Pass a project directory, a package archive (.zip/.whl/.jar/.tar.gz), a .txt identifier list, or a single pkg: identifier")]
    UnsupportedInput { path: PathBuf, reason: String },

    #[error("Failed to open archive: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the archive is complete and in a supported format")]
    ArchiveUnreadable { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid package identifier: {identifier}\nReason: {reason}\n\n💡 Hint: Identifiers use the pkg:type/name@version form, e.g. pkg:npm/lodash@4.17.21")]
    InvalidIdentifier { identifier: String, reason: String },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
