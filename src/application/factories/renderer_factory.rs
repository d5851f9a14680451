use crate::adapters::outbound::renderers::{
    HtmlNoticeRenderer, JsonNoticeRenderer, TextNoticeRenderer,
};
use crate::application::dto::OutputEncoding;
use crate::ports::outbound::NoticeRenderer;

/// Factory for creating notice renderers
///
/// This factory encapsulates the creation logic for different renderer
/// implementations, following the Factory Pattern. It belongs in the
/// application layer as it orchestrates the selection of infrastructure
/// adapters based on application needs.
pub struct RendererFactory;

impl RendererFactory {
    /// Creates a renderer instance for the specified output encoding
    ///
    /// # Examples
    /// ```
    /// use oss_notices::application::dto::OutputEncoding;
    /// use oss_notices::application::factories::RendererFactory;
    ///
    /// let renderer = RendererFactory::create(OutputEncoding::Text);
    /// ```
    pub fn create(encoding: OutputEncoding) -> Box<dyn NoticeRenderer> {
        match encoding {
            OutputEncoding::Text => Box::new(TextNoticeRenderer::new()),
            OutputEncoding::Html => Box::new(HtmlNoticeRenderer::new()),
            OutputEncoding::Json => Box::new(JsonNoticeRenderer::new()),
        }
    }

    /// Returns the progress message for the specified output encoding
    pub fn progress_message(encoding: OutputEncoding) -> &'static str {
        match encoding {
            OutputEncoding::Text => "📝 Rendering plain-text notices...",
            OutputEncoding::Html => "📝 Rendering HTML notices...",
            OutputEncoding::Json => "📝 Rendering JSON notices...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_renderer_for_each_encoding() {
        for encoding in [
            OutputEncoding::Text,
            OutputEncoding::Html,
            OutputEncoding::Json,
        ] {
            let renderer = RendererFactory::create(encoding);
            assert!(std::mem::size_of_val(&renderer) > 0);
        }
    }

    #[test]
    fn test_progress_messages() {
        assert_eq!(
            RendererFactory::progress_message(OutputEncoding::Text),
            "📝 Rendering plain-text notices..."
        );
        assert_eq!(
            RendererFactory::progress_message(OutputEncoding::Json),
            "📝 Rendering JSON notices..."
        );
    }
}
