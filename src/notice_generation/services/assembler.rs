use crate::notice_generation::domain::{
    DocumentMetadata, NoticeDocument, PackageRef, ResolutionStatus, ResolvedRecord, StatusCounts,
};
use chrono::{DateTime, SecondsFormat, Utc};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Assembles resolved records into the final notice document.
///
/// The assembler is where determinism is enforced: whatever order
/// discovery or the resolution pool produced, the document comes out
/// sorted by (name case-insensitive, version, ecosystem), so re-running
/// on an unchanged dependency set renders byte-identical output.
pub struct NoticeAssembler;

impl NoticeAssembler {
    /// Build a document from resolved (reference, record) pairs.
    ///
    /// Pairs are deduplicated by canonical key once more as a guard
    /// against callers that bypassed discovery's dedup; no pair is
    /// ever dropped for any other reason, failed resolutions included.
    pub fn assemble(
        pairs: Vec<(PackageRef, ResolvedRecord)>,
        input_description: &str,
        generated_at: DateTime<Utc>,
    ) -> NoticeDocument {
        let mut seen = HashSet::new();
        let mut sections: Vec<ResolvedRecord> = Vec::with_capacity(pairs.len());
        for (reference, record) in pairs {
            if seen.insert(reference.canonical_key()) {
                sections.push(record);
            }
        }

        sections.sort_by(compare_sections);

        let mut counts = StatusCounts::default();
        for record in &sections {
            match record.status() {
                ResolutionStatus::Resolved => counts.resolved += 1,
                ResolutionStatus::Partial => counts.partial += 1,
                ResolutionStatus::Failed => counts.failed += 1,
            }
        }

        let metadata = DocumentMetadata::new(
            generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
            input_description.to_string(),
            counts,
        );

        NoticeDocument::new(metadata, sections)
    }
}

fn compare_sections(a: &ResolvedRecord, b: &ResolvedRecord) -> Ordering {
    a.name()
        .to_lowercase()
        .cmp(&b.name().to_lowercase())
        .then_with(|| compare_versions(a.version(), b.version()))
        .then_with(|| a.ecosystem().as_str().cmp(b.ecosystem().as_str()))
}

/// Semantic-version-aware comparison with a lexical fallback for
/// versions semver cannot parse (calendar versions, Maven qualifiers).
fn compare_versions(a: &str, b: &str) -> Ordering {
    match (semver::Version::parse(a), semver::Version::parse(b)) {
        (Ok(va), Ok(vb)) => va.cmp(&vb),
        _ => a.cmp(b),
    }
}
