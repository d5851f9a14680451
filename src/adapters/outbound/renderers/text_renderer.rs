use crate::notice_generation::domain::{NoticeDocument, ResolvedRecord};
use crate::ports::outbound::NoticeRenderer;
use crate::shared::Result;

/// Section banner width for the plain-text layout
const BANNER_WIDTH: usize = 78;

/// Shown in place of attribution content for failed sections
const UNRESOLVED_PLACEHOLDER: &str =
    "License information could not be resolved for this package.";

/// TextNoticeRenderer adapter for plain-text notice documents
///
/// This adapter implements the NoticeRenderer port for the default
/// output format: a header block followed by one banner-delimited
/// section per package.
pub struct TextNoticeRenderer;

impl TextNoticeRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_header(output: &mut String, document: &NoticeDocument) {
        let metadata = document.metadata();
        let counts = metadata.counts();
        output.push_str("THIRD-PARTY SOFTWARE NOTICES\n\n");
        output.push_str(&format!(
            "Generated by {} {} at {}\n",
            metadata.tool_name(),
            metadata.tool_version(),
            metadata.generated_at()
        ));
        output.push_str(&format!("Input: {}\n", metadata.input_description()));
        output.push_str(&format!(
            "Packages: {} ({} resolved, {} partial, {} failed)\n",
            counts.total(),
            counts.resolved,
            counts.partial,
            counts.failed
        ));
    }

    fn render_section(output: &mut String, record: &ResolvedRecord) {
        let banner = "=".repeat(BANNER_WIDTH);
        output.push('\n');
        output.push_str(&banner);
        output.push('\n');
        output.push_str(&format!(
            "{} {} ({})\n",
            record.name(),
            record.version(),
            record.ecosystem()
        ));
        output.push_str(&banner);
        output.push('\n');

        if record.is_failed() {
            output.push_str(UNRESOLVED_PLACEHOLDER);
            output.push('\n');
            if let Some(reason) = record.failure_reason() {
                output.push_str(&format!("Reason: {}\n", reason));
            }
            return;
        }

        let attribution = record.attribution();
        if let Some(expression) = attribution.license_expression() {
            output.push_str(&format!("License: {}\n", expression));
        }
        if let Some(homepage) = attribution.homepage() {
            output.push_str(&format!("Homepage: {}\n", homepage));
        }
        for statement in attribution.copyright_statements() {
            output.push_str(statement);
            output.push('\n');
        }
        for text in attribution.license_texts() {
            output.push('\n');
            output.push_str(text.trim_end());
            output.push('\n');
        }
        if let Some(notice) = attribution.notice_text() {
            output.push_str("\nNOTICE:\n");
            output.push_str(notice.trim_end());
            output.push('\n');
        }
    }
}

impl Default for TextNoticeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeRenderer for TextNoticeRenderer {
    fn render(&self, document: &NoticeDocument) -> Result<Vec<u8>> {
        let mut output = String::new();
        Self::render_header(&mut output, document);

        if document.is_empty() {
            output.push_str("\nNo third-party packages were found.\n");
            return Ok(output.into_bytes());
        }

        for record in document.sections() {
            Self::render_section(&mut output, record);
        }

        Ok(output.into_bytes())
    }
}
