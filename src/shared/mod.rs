/// Shared utilities - error types, result alias, and security checks
/// used across all layers.
pub mod error;
pub mod result;
pub mod security;

pub use error::{ExitCode, NoticeError};
pub use result::Result;
