use crate::notice_generation::domain::{NoticeDocument, ResolutionStatus, ResolvedRecord};
use crate::ports::outbound::NoticeRenderer;
use crate::shared::Result;
use serde::Serialize;

#[derive(Serialize)]
struct JsonDocument<'a> {
    metadata: JsonMetadata<'a>,
    packages: Vec<JsonPackage<'a>>,
}

#[derive(Serialize)]
struct JsonMetadata<'a> {
    generated_at: &'a str,
    tool_name: &'a str,
    tool_version: &'a str,
    input: &'a str,
    total_packages: usize,
    status_counts: JsonStatusCounts,
}

#[derive(Serialize)]
struct JsonStatusCounts {
    resolved: usize,
    partial: usize,
    failed: usize,
}

// The attribution fields serialize as null/[] rather than disappearing,
// so a failed package keeps the same shape as a resolved one.
#[derive(Serialize)]
struct JsonPackage<'a> {
    name: &'a str,
    version: &'a str,
    ecosystem: &'a str,
    status: ResolutionStatus,
    license_expression: Option<&'a str>,
    license_texts: &'a [String],
    copyright_statements: &'a [String],
    notice_text: Option<&'a str>,
    homepage: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure_reason: Option<&'a str>,
}

impl<'a> JsonPackage<'a> {
    fn from_record(record: &'a ResolvedRecord) -> Self {
        let attribution = record.attribution();
        Self {
            name: record.name(),
            version: record.version(),
            ecosystem: record.ecosystem().as_str(),
            status: record.status(),
            license_expression: attribution.license_expression(),
            license_texts: attribution.license_texts(),
            copyright_statements: attribution.copyright_statements(),
            notice_text: attribution.notice_text(),
            homepage: attribution.homepage(),
            failure_reason: record.failure_reason(),
        }
    }
}

/// JsonNoticeRenderer adapter for machine-readable notice documents
///
/// This adapter implements the NoticeRenderer port for JSON output.
/// Key order is fixed by the serialization structs, so the output is
/// byte-stable for a given document.
pub struct JsonNoticeRenderer;

impl JsonNoticeRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonNoticeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeRenderer for JsonNoticeRenderer {
    fn render(&self, document: &NoticeDocument) -> Result<Vec<u8>> {
        let metadata = document.metadata();
        let counts = metadata.counts();
        let json_document = JsonDocument {
            metadata: JsonMetadata {
                generated_at: metadata.generated_at(),
                tool_name: metadata.tool_name(),
                tool_version: metadata.tool_version(),
                input: metadata.input_description(),
                total_packages: counts.total(),
                status_counts: JsonStatusCounts {
                    resolved: counts.resolved,
                    partial: counts.partial,
                    failed: counts.failed,
                },
            },
            packages: document
                .sections()
                .iter()
                .map(JsonPackage::from_record)
                .collect(),
        };

        let mut bytes = serde_json::to_vec_pretty(&json_document)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice_generation::domain::{
        AttributionData, DocumentMetadata, Ecosystem, StatusCounts,
    };
    use chrono::{DateTime, Utc};

    fn now() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    fn document() -> NoticeDocument {
        let resolved = ResolvedRecord::from_attribution(
            "lodash".to_string(),
            "4.17.21".to_string(),
            Ecosystem::Npm,
            AttributionData::new(
                Some("MIT".to_string()),
                vec!["MIT License".to_string()],
                vec![],
                None,
                Some("https://lodash.com/".to_string()),
            ),
            now(),
        );
        let failed = ResolvedRecord::failed(
            "ghost".to_string(),
            "9.9.9".to_string(),
            Ecosystem::PyPi,
            "Package not found in the pypi registry".to_string(),
            now(),
        );
        NoticeDocument::new(
            DocumentMetadata::new(
                "2024-06-01T12:00:00Z".to_string(),
                "oss-notices".to_string(),
                "0.4.0".to_string(),
                "identifier list deps.txt".to_string(),
                StatusCounts {
                    resolved: 1,
                    partial: 0,
                    failed: 1,
                },
            ),
            vec![resolved, failed],
        )
    }

    #[test]
    fn test_render_structure() {
        let bytes = JsonNoticeRenderer::new().render(&document()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["metadata"]["tool_name"], "oss-notices");
        assert_eq!(value["metadata"]["total_packages"], 2);
        assert_eq!(value["metadata"]["status_counts"]["resolved"], 1);
        assert_eq!(value["metadata"]["status_counts"]["failed"], 1);

        let packages = value["packages"].as_array().unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0]["name"], "lodash");
        assert_eq!(packages[0]["status"], "resolved");
        assert_eq!(packages[0]["license_expression"], "MIT");
        assert_eq!(packages[1]["status"], "failed");
        assert_eq!(
            packages[1]["failure_reason"],
            "Package not found in the pypi registry"
        );
    }

    #[test]
    fn test_failed_package_keeps_empty_text_fields() {
        let bytes = JsonNoticeRenderer::new().render(&document()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let failed = &value["packages"][1];
        assert!(failed["license_expression"].is_null());
        assert_eq!(failed["license_texts"], serde_json::json!([]));
        assert_eq!(failed["copyright_statements"], serde_json::json!([]));
        assert!(failed["notice_text"].is_null());
        // failure_reason stays opt-in for resolved packages
        assert!(value["packages"][0].get("failure_reason").is_none());
    }

    #[test]
    fn test_output_ends_with_newline_and_is_stable() {
        let renderer = JsonNoticeRenderer::new();
        let first = renderer.render(&document()).unwrap();
        let second = renderer.render(&document()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.last(), Some(&b'\n'));
    }
}
