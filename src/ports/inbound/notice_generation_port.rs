use crate::application::dto::{NoticeRequest, NoticeResponse};
use crate::shared::Result;
use async_trait::async_trait;

/// NoticeGenerationPort - Inbound port for the notice generation use case
///
/// This port defines the interface that external adapters (CLI, API,
/// etc.) use to trigger notice generation. It represents the
/// application's public API.
#[async_trait(?Send)]
pub trait NoticeGenerationPort {
    /// Run the full pipeline for one input: discovery, resolution,
    /// and assembly of the notice document.
    ///
    /// # Errors
    /// Returns an error only for fatal conditions (input not found or
    /// unreadable, unsupported input). Per-package problems surface as
    /// diagnostics on the response instead.
    async fn generate_notices(&self, request: NoticeRequest) -> Result<NoticeResponse>;
}
