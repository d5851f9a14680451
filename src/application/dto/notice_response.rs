use crate::notice_generation::domain::{Diagnostic, NoticeDocument};

/// NoticeResponse - Internal response DTO from the notice generation
/// use case
///
/// This DTO carries the assembled document plus everything that went
/// wrong along the way, so the caller can render the document and
/// summarize the diagnostics independently.
#[derive(Debug)]
pub struct NoticeResponse {
    /// The assembled document, in canonical order
    pub document: NoticeDocument,
    /// Per-package and per-input problems collected across all phases
    pub diagnostics: Vec<Diagnostic>,
    /// Cache lookups answered without a backend call
    pub cache_hits: usize,
    /// Cache lookups that fell through to the backend
    pub cache_misses: usize,
}

impl NoticeResponse {
    pub fn new(
        document: NoticeDocument,
        diagnostics: Vec<Diagnostic>,
        cache_hits: usize,
        cache_misses: usize,
    ) -> Self {
        Self {
            document,
            diagnostics,
            cache_hits,
            cache_misses,
        }
    }
}
