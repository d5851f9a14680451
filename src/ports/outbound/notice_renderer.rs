use crate::notice_generation::domain::NoticeDocument;
use crate::shared::Result;

/// NoticeRenderer port for turning the assembled document into one
/// output encoding (plain text, HTML, or JSON).
///
/// Rendering is pure: for a fixed document, every implementation must
/// produce byte-identical output across invocations.
pub trait NoticeRenderer {
    /// Render the document into its final byte form.
    ///
    /// # Errors
    /// Returns an error only if serialization itself fails; a document
    /// with zero sections still renders.
    fn render(&self, document: &NoticeDocument) -> Result<Vec<u8>>;
}
