use crate::notice_generation::domain::{
    CanonicalKey, Diagnostic, DiagnosticCategory, ResolvedRecord,
};
use crate::shared::Result;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::NamedTempFile;

/// Version of the on-disk cache layout. A header mismatch discards the
/// whole file.
pub const CACHE_SCHEMA_VERSION: u32 = 1;

/// Declared version of the resolution logic. Entries written under a
/// different resolver version are treated as misses, never reused.
pub const RESOLVER_VERSION: &str = "1";

#[derive(Debug, Serialize, Deserialize)]
struct CacheHeader {
    schema: u32,
    resolver_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    key: String,
    resolver_version: String,
    record: ResolvedRecord,
}

/// Durable attribution cache, persisted as JSON Lines.
///
/// Line 1 is a header with the schema version; every further line is
/// one independent entry, so one corrupt line costs exactly one entry
/// rather than the whole file. In memory the entries live in a
/// `DashMap`: lookups and stores from concurrent resolution tasks do
/// not block each other, and same-key stores are last-writer-wins
/// (identical inputs produce identical records, so the order does not
/// matter).
///
/// Entries are never mutated in place; `store` replaces the whole
/// entry, and `flush` rewrites the whole file atomically.
pub struct ResolutionCache {
    path: PathBuf,
    entries: DashMap<String, CacheEntry>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl ResolutionCache {
    /// Load the cache from disk, or start empty if the file does not
    /// exist or its header does not match the current schema.
    ///
    /// Corrupt lines are skipped and reported as diagnostics; cache
    /// corruption is never fatal.
    pub fn load(path: &Path) -> (Self, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let entries = DashMap::new();

        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    Self::load_lines(path, &content, &entries, &mut diagnostics);
                }
                Err(e) => {
                    diagnostics.push(Diagnostic::new(
                        DiagnosticCategory::Cache,
                        path.display().to_string(),
                        format!("Cache file could not be read, starting fresh: {}", e),
                    ));
                }
            }
        }

        (
            Self {
                path: path.to_path_buf(),
                entries,
                hits: AtomicUsize::new(0),
                misses: AtomicUsize::new(0),
            },
            diagnostics,
        )
    }

    fn load_lines(
        path: &Path,
        content: &str,
        entries: &DashMap<String, CacheEntry>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let mut lines = content.lines().enumerate();

        let Some((_, header_line)) = lines.next() else {
            return;
        };
        match serde_json::from_str::<CacheHeader>(header_line) {
            Ok(header) if header.schema == CACHE_SCHEMA_VERSION => {}
            _ => {
                diagnostics.push(Diagnostic::new(
                    DiagnosticCategory::Cache,
                    path.display().to_string(),
                    "Cache schema mismatch, starting fresh".to_string(),
                ));
                return;
            }
        }

        for (index, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<CacheEntry>(line) {
                Ok(entry) => {
                    entries.insert(entry.key.clone(), entry);
                }
                Err(e) => {
                    diagnostics.push(Diagnostic::new(
                        DiagnosticCategory::Cache,
                        format!("{}:{}", path.display(), index + 1),
                        format!("Corrupt cache entry skipped: {}", e),
                    ));
                }
            }
        }
    }

    /// Look up a record. Entries written under a different resolver
    /// version count as misses so stale-schema records can never leak
    /// into output.
    pub fn lookup(&self, key: &CanonicalKey) -> Option<ResolvedRecord> {
        let found = self
            .entries
            .get(key.as_str())
            .filter(|entry| entry.resolver_version == RESOLVER_VERSION)
            .map(|entry| entry.record.clone());
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Insert or replace the entry for a key, tagged with the running
    /// resolver version. Negative (failed) records are stored too.
    pub fn store(&self, key: &CanonicalKey, record: ResolvedRecord) {
        self.entries.insert(
            key.as_str().to_string(),
            CacheEntry {
                key: key.as_str().to_string(),
                resolver_version: RESOLVER_VERSION.to_string(),
                record,
            },
        );
    }

    /// Persist all entries atomically: write header plus key-sorted
    /// entries to a temp file in the cache's directory, then rename it
    /// over the cache path. A crash mid-flush leaves the previous file
    /// intact.
    pub fn flush(&self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| anyhow::anyhow!("Failed to create cache temp file: {}", e))?;

        let header = CacheHeader {
            schema: CACHE_SCHEMA_VERSION,
            resolver_version: RESOLVER_VERSION.to_string(),
        };
        serde_json::to_writer(&mut tmp, &header)?;
        tmp.write_all(b"\n")?;

        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        for key in keys {
            if let Some(entry) = self.entries.get(&key) {
                serde_json::to_writer(&mut tmp, entry.value())?;
                tmp.write_all(b"\n")?;
            }
        }

        tmp.persist(&self.path)
            .map_err(|e| anyhow::anyhow!("Failed to persist cache file: {}", e))?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}
