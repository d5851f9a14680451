use crate::notice_generation::domain::{
    CanonicalKey, Diagnostic, DiagnosticCategory, PackageRef, SourceLocator,
};
use crate::notice_generation::services::{identifier, ManifestKind};
use crate::ports::outbound::ArchiveReader;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_MANIFEST_SIZE};
use crate::shared::Result;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// What one discovery pass produced: references in first-seen order
/// plus the non-fatal problems encountered along the way.
#[derive(Debug, Default)]
pub struct DiscoveryOutcome {
    pub references: Vec<PackageRef>,
    pub diagnostics: Vec<Diagnostic>,
}

/// First-seen dedup by canonical key.
///
/// The first locator a key is discovered from is the one that survives
/// into diagnostics; later sightings of the same key are dropped.
#[derive(Debug, Default)]
struct RefCollector {
    seen: HashSet<CanonicalKey>,
    outcome: DiscoveryOutcome,
}

impl RefCollector {
    fn push(&mut self, reference: PackageRef) {
        if self.seen.insert(reference.canonical_key()) {
            self.outcome.references.push(reference);
        }
    }

    fn diagnostic(&mut self, category: DiagnosticCategory, subject: String, message: String) {
        self.outcome
            .diagnostics
            .push(Diagnostic::new(category, subject, message));
    }
}

/// Discovery service - walks directories, scans archives, and parses
/// identifier lists into package references.
///
/// Every mode is tolerant of per-item problems: one unparsable
/// manifest, one malformed identifier line, or one unreadable archive
/// entry becomes a diagnostic and the pass continues.
pub struct Discoverer;

impl Discoverer {
    /// Walk a directory tree for recognized manifest files.
    ///
    /// Entries are visited in file-name order so first-seen dedup is
    /// deterministic; depth is capped at 1 unless `recursive` is set.
    pub fn discover_directory(path: &Path, recursive: bool) -> Result<DiscoveryOutcome> {
        let mut collector = RefCollector::default();
        let max_depth = if recursive { usize::MAX } else { 1 };

        let walker = WalkDir::new(path)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_name().to_string_lossy() != "node_modules");

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    collector.diagnostic(
                        DiagnosticCategory::ManifestParse,
                        path.display().to_string(),
                        format!("Failed to walk directory entry: {}", e),
                    );
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            let Some(kind) = ManifestKind::recognize_file_name(&file_name) else {
                continue;
            };
            Self::ingest_manifest_file(&mut collector, entry.path(), kind);
        }

        Ok(collector.outcome)
    }

    /// Scan an already-opened archive for in-archive manifests.
    ///
    /// Unsupported internals simply yield zero references; only the
    /// caller's failure to open the archive at all is fatal.
    pub fn discover_archive(
        archive_path: &Path,
        reader: &mut dyn ArchiveReader,
    ) -> Result<DiscoveryOutcome> {
        let mut collector = RefCollector::default();

        let (entries, unreadable) =
            reader.read_matching(&|p| ManifestKind::recognize_entry_path(p).is_some())?;

        for entry_path in unreadable {
            collector.diagnostic(
                DiagnosticCategory::ArchiveEntry,
                format!("{}!{}", archive_path.display(), entry_path),
                "Entry could not be read".to_string(),
            );
        }

        for entry in entries {
            // The predicate above only admits recognizable paths
            let Some(kind) = ManifestKind::recognize_entry_path(&entry.path) else {
                continue;
            };
            let locator = SourceLocator::ArchiveEntry {
                archive: archive_path.to_path_buf(),
                entry: entry.path.clone(),
            };
            match kind.parse(&entry.bytes) {
                Ok(pairs) => {
                    Self::push_pairs(&mut collector, kind, pairs, &locator);
                }
                Err(e) => {
                    collector.diagnostic(
                        DiagnosticCategory::ManifestParse,
                        format!("{}!{}", archive_path.display(), entry.path),
                        e.to_string(),
                    );
                }
            }
        }

        Ok(collector.outcome)
    }

    /// Parse an identifier-list file: one `pkg:` identifier per line,
    /// blank lines and `#` comments skipped, malformed lines reported
    /// but never fatal.
    pub fn discover_identifier_list(path: &Path) -> Result<DiscoveryOutcome> {
        validate_regular_file(path, "identifier list")?;
        let metadata = fs::symlink_metadata(path)
            .map_err(|e| anyhow::anyhow!("Failed to read identifier list metadata: {}", e))?;
        validate_file_size(metadata.len(), path, MAX_MANIFEST_SIZE)?;
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read identifier list: {}", e))?;

        let mut collector = RefCollector::default();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let locator = SourceLocator::IdentifierList {
                path: path.to_path_buf(),
                line: index + 1,
            };
            match identifier::parse_identifier(line, locator) {
                Ok(reference) => collector.push(reference),
                Err(e) => {
                    collector.diagnostic(
                        DiagnosticCategory::Identifier,
                        format!("{}:{}", path.display(), index + 1),
                        e.to_string(),
                    );
                }
            }
        }

        Ok(collector.outcome)
    }

    /// Parse a single identifier passed directly on the command line.
    /// A malformed identifier here is fatal - there is nothing else to
    /// fall back to.
    pub fn discover_identifier(value: &str) -> Result<DiscoveryOutcome> {
        let reference = identifier::parse_identifier(value, SourceLocator::Direct)?;
        let mut collector = RefCollector::default();
        collector.push(reference);
        Ok(collector.outcome)
    }

    fn ingest_manifest_file(collector: &mut RefCollector, path: &Path, kind: ManifestKind) {
        let subject = path.display().to_string();

        if let Err(e) = validate_regular_file(path, "manifest") {
            collector.diagnostic(DiagnosticCategory::ManifestParse, subject, e.to_string());
            return;
        }
        let metadata = match fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                collector.diagnostic(
                    DiagnosticCategory::ManifestParse,
                    subject,
                    format!("Failed to read manifest metadata: {}", e),
                );
                return;
            }
        };
        if let Err(e) = validate_file_size(metadata.len(), path, MAX_MANIFEST_SIZE) {
            collector.diagnostic(DiagnosticCategory::ManifestParse, subject, e.to_string());
            return;
        }
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                collector.diagnostic(
                    DiagnosticCategory::ManifestParse,
                    subject,
                    format!("Failed to read manifest: {}", e),
                );
                return;
            }
        };

        match kind.parse(&bytes) {
            Ok(pairs) => {
                let locator = SourceLocator::Manifest {
                    path: path.to_path_buf(),
                };
                Self::push_pairs(collector, kind, pairs, &locator);
            }
            Err(e) => {
                collector.diagnostic(DiagnosticCategory::ManifestParse, subject, e.to_string());
            }
        }
    }

    fn push_pairs(
        collector: &mut RefCollector,
        kind: ManifestKind,
        pairs: Vec<(String, String)>,
        locator: &SourceLocator,
    ) {
        for (name, version) in pairs {
            match PackageRef::new(name.clone(), version, kind.ecosystem(), locator.clone()) {
                Ok(reference) => collector.push(reference),
                Err(e) => {
                    collector.diagnostic(
                        DiagnosticCategory::ManifestParse,
                        format!("{}", locator),
                        format!("Skipping entry '{}': {}", name, e),
                    );
                }
            }
        }
    }
}
