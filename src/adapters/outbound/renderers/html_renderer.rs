use crate::notice_generation::domain::{NoticeDocument, ResolvedRecord};
use crate::ports::outbound::NoticeRenderer;
use crate::shared::Result;

/// Shown in place of attribution content for failed sections
const UNRESOLVED_PLACEHOLDER: &str =
    "License information could not be resolved for this package.";

/// Group heading for packages whose resolution failed
const UNRESOLVED_GROUP: &str = "Unresolved";

/// Group heading for resolved packages without a license expression
const UNKNOWN_LICENSE_GROUP: &str = "Unknown license";

/// HtmlNoticeRenderer adapter for self-contained HTML notice documents
///
/// This adapter implements the NoticeRenderer port for HTML output:
/// one page with a license-keyed index of in-page anchors, followed by
/// the package sections grouped under their license heading. All
/// attribution content is escaped; no external assets.
pub struct HtmlNoticeRenderer;

impl HtmlNoticeRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Escapes text for safe embedding in HTML element and attribute
    /// context
    fn escape(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                _ => escaped.push(c),
            }
        }
        escaped
    }

    /// Anchor id for a section, keyed on the document-order index so it
    /// stays stable no matter which group the section lands in
    fn anchor(index: usize) -> String {
        format!("pkg-{}", index)
    }

    fn group_label(record: &ResolvedRecord) -> &str {
        if record.is_failed() {
            UNRESOLVED_GROUP
        } else {
            record
                .attribution()
                .license_expression()
                .unwrap_or(UNKNOWN_LICENSE_GROUP)
        }
    }

    /// Buckets sections by license label. Labels sort alphabetically
    /// with the unresolved bucket last; members keep the document's
    /// canonical order.
    fn license_groups(document: &NoticeDocument) -> Vec<(&str, Vec<usize>)> {
        let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
        for (index, record) in document.sections().iter().enumerate() {
            let label = Self::group_label(record);
            match groups.iter_mut().find(|(existing, _)| *existing == label) {
                Some((_, members)) => members.push(index),
                None => groups.push((label, vec![index])),
            }
        }
        groups.sort_by(|(a, _), (b, _)| a.cmp(b));
        if let Some(position) = groups.iter().position(|(label, _)| *label == UNRESOLVED_GROUP) {
            let unresolved = groups.remove(position);
            groups.push(unresolved);
        }
        groups
    }

    fn render_head(output: &mut String, document: &NoticeDocument) {
        let metadata = document.metadata();
        output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        output.push_str("<meta charset=\"utf-8\">\n");
        output.push_str("<title>Third-Party Software Notices</title>\n");
        output.push_str("<style>\n");
        output.push_str("body { font-family: sans-serif; margin: 2em auto; max-width: 50em; }\n");
        output.push_str("pre { white-space: pre-wrap; background: #f6f6f6; padding: 1em; }\n");
        output.push_str("section { border-top: 1px solid #ccc; padding-top: 1em; }\n");
        output.push_str(".failed { color: #a33; }\n");
        output.push_str("</style>\n</head>\n<body>\n");
        output.push_str("<h1>Third-Party Software Notices</h1>\n");
        output.push_str(&format!(
            "<p>Generated by {} {} at {}<br>Input: {}</p>\n",
            Self::escape(metadata.tool_name()),
            Self::escape(metadata.tool_version()),
            Self::escape(metadata.generated_at()),
            Self::escape(metadata.input_description())
        ));
    }

    fn render_index(
        output: &mut String,
        document: &NoticeDocument,
        groups: &[(&str, Vec<usize>)],
    ) {
        output.push_str("<ul>\n");
        for (label, members) in groups {
            output.push_str(&format!("<li>{}\n<ul>\n", Self::escape(label)));
            for &index in members {
                let record = &document.sections()[index];
                output.push_str(&format!(
                    "<li><a href=\"#{}\">{} {}</a> ({})</li>\n",
                    Self::anchor(index),
                    Self::escape(record.name()),
                    Self::escape(record.version()),
                    record.ecosystem()
                ));
            }
            output.push_str("</ul>\n</li>\n");
        }
        output.push_str("</ul>\n");
    }

    fn render_section(output: &mut String, index: usize, record: &ResolvedRecord) {
        output.push_str(&format!("<section id=\"{}\">\n", Self::anchor(index)));
        output.push_str(&format!(
            "<h3>{} {} ({})</h3>\n",
            Self::escape(record.name()),
            Self::escape(record.version()),
            record.ecosystem()
        ));

        if record.is_failed() {
            output.push_str(&format!(
                "<p class=\"failed\">{}</p>\n",
                Self::escape(UNRESOLVED_PLACEHOLDER)
            ));
            if let Some(reason) = record.failure_reason() {
                output.push_str(&format!(
                    "<p class=\"failed\">Reason: {}</p>\n",
                    Self::escape(reason)
                ));
            }
            output.push_str("</section>\n");
            return;
        }

        let attribution = record.attribution();
        if let Some(expression) = attribution.license_expression() {
            output.push_str(&format!(
                "<p>License: {}</p>\n",
                Self::escape(expression)
            ));
        }
        if let Some(homepage) = attribution.homepage() {
            output.push_str(&format!(
                "<p>Homepage: {}</p>\n",
                Self::escape(homepage)
            ));
        }
        for statement in attribution.copyright_statements() {
            output.push_str(&format!("<p>{}</p>\n", Self::escape(statement)));
        }
        for text in attribution.license_texts() {
            output.push_str(&format!("<pre>{}</pre>\n", Self::escape(text)));
        }
        if let Some(notice) = attribution.notice_text() {
            output.push_str(&format!(
                "<h4>NOTICE</h4>\n<pre>{}</pre>\n",
                Self::escape(notice)
            ));
        }
        output.push_str("</section>\n");
    }
}

impl Default for HtmlNoticeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeRenderer for HtmlNoticeRenderer {
    fn render(&self, document: &NoticeDocument) -> Result<Vec<u8>> {
        let mut output = String::new();
        Self::render_head(&mut output, document);

        if document.is_empty() {
            output.push_str("<p>No third-party packages were found.</p>\n");
        } else {
            let groups = Self::license_groups(document);
            Self::render_index(&mut output, document, &groups);
            for (label, members) in &groups {
                output.push_str(&format!("<h2>{}</h2>\n", Self::escape(label)));
                for &index in members {
                    Self::render_section(&mut output, index, &document.sections()[index]);
                }
            }
        }

        output.push_str("</body>\n</html>\n");
        Ok(output.into_bytes())
    }
}
