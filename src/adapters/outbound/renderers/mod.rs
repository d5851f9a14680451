/// Renderer adapters - text, HTML, and JSON implementations of the
/// NoticeRenderer port
pub mod html_renderer;
pub mod json_renderer;
pub mod text_renderer;

pub use html_renderer::HtmlNoticeRenderer;
pub use json_renderer::JsonNoticeRenderer;
pub use text_renderer::TextNoticeRenderer;
