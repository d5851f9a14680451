use crate::shared::Result;

/// OutputPresenter port for delivering the rendered document.
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where the rendered notice document is written.
pub trait OutputPresenter {
    /// Write the rendered document to the output destination.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - File permissions prevent writing
    /// - Disk space is insufficient
    fn present(&self, content: &[u8]) -> Result<()>;
}
