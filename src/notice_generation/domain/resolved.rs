use crate::notice_generation::domain::Ecosystem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resolution outcome for one package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStatus {
    /// A license was identified and at least one attribution artifact
    /// (text, copyright, or notice) came with it
    Resolved,
    /// Some attribution data was found but the set is incomplete
    Partial,
    /// Nothing usable was found, or the lookup itself failed
    Failed,
}

impl std::fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            ResolutionStatus::Resolved => "resolved",
            ResolutionStatus::Partial => "partial",
            ResolutionStatus::Failed => "failed",
        };
        write!(f, "{}", tag)
    }
}

/// The attribution artifacts a lookup can produce for a package.
/// All fields are optional; what was found determines the record's
/// [`ResolutionStatus`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributionData {
    license_expression: Option<String>,
    license_texts: Vec<String>,
    copyright_statements: Vec<String>,
    notice_text: Option<String>,
    homepage: Option<String>,
}

impl AttributionData {
    pub fn new(
        license_expression: Option<String>,
        license_texts: Vec<String>,
        mut copyright_statements: Vec<String>,
        notice_text: Option<String>,
        homepage: Option<String>,
    ) -> Self {
        // Registries repeat copyright lines across files; keep the
        // first occurrence of each
        let mut seen = std::collections::HashSet::new();
        copyright_statements.retain(|statement| seen.insert(statement.clone()));
        Self {
            license_expression,
            license_texts,
            copyright_statements,
            notice_text,
            homepage,
        }
    }

    pub fn license_expression(&self) -> Option<&str> {
        self.license_expression.as_deref()
    }

    pub fn license_texts(&self) -> &[String] {
        &self.license_texts
    }

    pub fn copyright_statements(&self) -> &[String] {
        &self.copyright_statements
    }

    pub fn notice_text(&self) -> Option<&str> {
        self.notice_text.as_deref()
    }

    pub fn homepage(&self) -> Option<&str> {
        self.homepage.as_deref()
    }

    /// True when no attribution artifact of any kind is present.
    /// A homepage alone does not count; it attributes nothing.
    pub fn is_empty(&self) -> bool {
        self.license_expression.is_none()
            && self.license_texts.is_empty()
            && self.copyright_statements.is_empty()
            && self.notice_text.is_none()
    }

    fn classify(&self) -> ResolutionStatus {
        if self.is_empty() {
            return ResolutionStatus::Failed;
        }
        let has_artifact = !self.license_texts.is_empty()
            || !self.copyright_statements.is_empty()
            || self.notice_text.is_some();
        if self.license_expression.is_some() && has_artifact {
            ResolutionStatus::Resolved
        } else {
            ResolutionStatus::Partial
        }
    }
}

/// Everything known about one package after resolution: identity,
/// attribution data, and how the resolution went.
///
/// Records are what the cache persists and what renderers consume, so
/// they carry their own copy of the identity fields rather than
/// borrowing from the discovery-side reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    name: String,
    version: String,
    ecosystem: Ecosystem,
    attribution: AttributionData,
    status: ResolutionStatus,
    failure_reason: Option<String>,
    resolved_at: DateTime<Utc>,
}

impl ResolvedRecord {
    /// Build a record from lookup results. The status is derived from
    /// what the attribution data actually contains.
    pub fn from_attribution(
        name: String,
        version: String,
        ecosystem: Ecosystem,
        attribution: AttributionData,
        resolved_at: DateTime<Utc>,
    ) -> Self {
        let status = attribution.classify();
        let failure_reason = match status {
            ResolutionStatus::Failed => Some("no license metadata available".to_string()),
            _ => None,
        };
        Self {
            name,
            version,
            ecosystem,
            attribution,
            status,
            failure_reason,
            resolved_at,
        }
    }

    /// Build a failed record for a lookup that errored out.
    pub fn failed(
        name: String,
        version: String,
        ecosystem: Ecosystem,
        reason: String,
        resolved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            version,
            ecosystem,
            attribution: AttributionData::default(),
            status: ResolutionStatus::Failed,
            failure_reason: Some(reason),
            resolved_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    pub fn attribution(&self) -> &AttributionData {
        &self.attribution
    }

    pub fn status(&self) -> ResolutionStatus {
        self.status
    }

    pub fn is_failed(&self) -> bool {
        self.status == ResolutionStatus::Failed
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    pub fn resolved_at(&self) -> DateTime<Utc> {
        self.resolved_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_full_attribution_is_resolved() {
        let data = AttributionData::new(
            Some("MIT".to_string()),
            vec!["MIT License text".to_string()],
            vec!["Copyright (c) 2024 Example".to_string()],
            None,
            Some("https://example.com".to_string()),
        );
        let record = ResolvedRecord::from_attribution(
            "lodash".to_string(),
            "4.17.21".to_string(),
            Ecosystem::Npm,
            data,
            now(),
        );
        assert_eq!(record.status(), ResolutionStatus::Resolved);
        assert_eq!(record.failure_reason(), None);
        assert_eq!(record.attribution().license_expression(), Some("MIT"));
    }

    #[test]
    fn test_license_id_only_is_partial() {
        let data = AttributionData::new(Some("Apache-2.0".to_string()), vec![], vec![], None, None);
        let record = ResolvedRecord::from_attribution(
            "requests".to_string(),
            "2.31.0".to_string(),
            Ecosystem::PyPi,
            data,
            now(),
        );
        assert_eq!(record.status(), ResolutionStatus::Partial);
    }

    #[test]
    fn test_duplicate_copyright_statements_collapse_in_order() {
        let data = AttributionData::new(
            None,
            vec![],
            vec![
                "Copyright (c) 2020 B".to_string(),
                "Copyright (c) 2019 A".to_string(),
                "Copyright (c) 2020 B".to_string(),
            ],
            None,
            None,
        );
        assert_eq!(
            data.copyright_statements(),
            &[
                "Copyright (c) 2020 B".to_string(),
                "Copyright (c) 2019 A".to_string(),
            ]
        );
    }

    #[test]
    fn test_copyright_without_license_is_partial() {
        let data = AttributionData::new(
            None,
            vec![],
            vec!["Copyright (c) 2020".to_string()],
            None,
            None,
        );
        let record = ResolvedRecord::from_attribution(
            "leftpad".to_string(),
            "1.3.0".to_string(),
            Ecosystem::Npm,
            data,
            now(),
        );
        assert_eq!(record.status(), ResolutionStatus::Partial);
    }

    #[test]
    fn test_empty_attribution_is_failed() {
        let record = ResolvedRecord::from_attribution(
            "mystery".to_string(),
            "0.0.1".to_string(),
            Ecosystem::Cargo,
            AttributionData::default(),
            now(),
        );
        assert_eq!(record.status(), ResolutionStatus::Failed);
        assert_eq!(
            record.failure_reason(),
            Some("no license metadata available")
        );
    }

    #[test]
    fn test_homepage_alone_is_failed() {
        let data =
            AttributionData::new(None, vec![], vec![], None, Some("https://x.dev".to_string()));
        assert!(data.is_empty());
        let record = ResolvedRecord::from_attribution(
            "x".to_string(),
            "1.0.0".to_string(),
            Ecosystem::Npm,
            data,
            now(),
        );
        assert_eq!(record.status(), ResolutionStatus::Failed);
    }

    #[test]
    fn test_failed_record_carries_reason() {
        let record = ResolvedRecord::failed(
            "ghost".to_string(),
            "9.9.9".to_string(),
            Ecosystem::Npm,
            "package not found in registry".to_string(),
            now(),
        );
        assert!(record.is_failed());
        assert_eq!(
            record.failure_reason(),
            Some("package not found in registry")
        );
        assert!(record.attribution().is_empty());
    }

    #[test]
    fn test_record_serde_round_trip() {
        let data = AttributionData::new(
            Some("BSD-3-Clause".to_string()),
            vec!["license text".to_string()],
            vec![],
            Some("NOTICE body".to_string()),
            None,
        );
        let record = ResolvedRecord::from_attribution(
            "click".to_string(),
            "8.1.7".to_string(),
            Ecosystem::PyPi,
            data,
            now(),
        );
        let json = serde_json::to_string(&record).unwrap();
        let back: ResolvedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_status_serde_tags() {
        assert_eq!(
            serde_json::to_string(&ResolutionStatus::Partial).unwrap(),
            "\"partial\""
        );
        assert_eq!(
            serde_json::to_string(&ResolutionStatus::Failed).unwrap(),
            "\"failed\""
        );
    }
}
