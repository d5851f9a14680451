use crate::notice_generation::domain::{
    CanonicalKey, Diagnostic, DiagnosticCategory, PackageRef, ResolvedRecord,
};
use crate::ports::outbound::{LookupError, MetadataLookup};
use crate::resolve::cache::ResolutionCache;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Knobs for one resolution pass.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Maximum lookups in flight at once
    pub concurrency: usize,
    /// Wall-clock budget per lookup call
    pub timeout: Duration,
    /// Ignore cached records and look everything up again
    pub force_refresh: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            concurrency: 8,
            timeout: Duration::from_secs(30),
            force_refresh: false,
        }
    }
}

/// Cooperative cancellation handle. Setting it does not interrupt
/// lookups already in flight; tasks that have not started observe the
/// flag and finish as failed records instead of issuing calls.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything a resolution pass produced: one record per input
/// reference, in input order, plus per-package diagnostics.
#[derive(Debug)]
pub struct ResolutionOutcome {
    pub pairs: Vec<(PackageRef, ResolvedRecord)>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Drives attribution lookups for a batch of package references.
///
/// Distinct canonical keys resolve at most once per pass, concurrently
/// up to the configured limit; references sharing a key share the
/// resulting record. Every reference gets a record no matter what -
/// failures become failed records, never missing entries.
pub struct Resolver<'a, L: MetadataLookup> {
    lookup: &'a L,
    options: ResolveOptions,
    cancel: CancelFlag,
    capability_down: AtomicBool,
}

impl<'a, L: MetadataLookup> Resolver<'a, L> {
    pub fn new(lookup: &'a L, options: ResolveOptions, cancel: CancelFlag) -> Self {
        Self {
            lookup,
            options,
            cancel,
            capability_down: AtomicBool::new(false),
        }
    }

    /// Resolve a batch of references against the cache and the lookup
    /// capability.
    ///
    /// `on_progress` fires once per completed outbound resolution with
    /// (done, total); cache hits never reach it.
    ///
    /// Cache policy: fresh successes and package-local failures (not
    /// found, unusable metadata) are stored, so a known-missing package
    /// costs one lookup ever. Timeouts, capability outages, and
    /// cancellations are transient and never cached.
    pub async fn resolve_all(
        &self,
        refs: Vec<PackageRef>,
        cache: Option<&ResolutionCache>,
        on_progress: impl Fn(usize, usize),
    ) -> ResolutionOutcome {
        // Collapse to unique keys, first occurrence wins. Discovery
        // already dedups per input, but the resolver holds the line
        // regardless of who calls it.
        let mut unique: Vec<(CanonicalKey, PackageRef)> = Vec::new();
        let mut seen: HashMap<CanonicalKey, usize> = HashMap::new();
        for package_ref in &refs {
            let key = package_ref.canonical_key();
            if !seen.contains_key(&key) {
                seen.insert(key.clone(), unique.len());
                unique.push((key, package_ref.clone()));
            }
        }

        let mut records: HashMap<CanonicalKey, ResolvedRecord> = HashMap::new();
        let mut pending: Vec<(usize, CanonicalKey, PackageRef)> = Vec::new();

        for (index, (key, package_ref)) in unique.into_iter().enumerate() {
            let cached = if self.options.force_refresh {
                None
            } else {
                cache.and_then(|c| c.lookup(&key))
            };
            match cached {
                Some(record) => {
                    records.insert(key, record);
                }
                None => pending.push((index, key, package_ref)),
            }
        }

        let concurrency = self.options.concurrency.max(1);
        let total = pending.len();
        let mut done = 0usize;
        let mut task_results: Vec<(usize, CanonicalKey, ResolvedRecord, Option<Diagnostic>)> =
            stream::iter(pending)
                .map(|(index, key, package_ref)| async move {
                    let (record, diagnostic) = self.resolve_one(&package_ref, cache).await;
                    (index, key, record, diagnostic)
                })
                .buffer_unordered(concurrency)
                .inspect(|_| {
                    done += 1;
                    on_progress(done, total);
                })
                .collect()
                .await;

        // Completion order is nondeterministic; diagnostics follow
        // the input order instead.
        task_results.sort_by_key(|(index, _, _, _)| *index);

        let mut diagnostics = Vec::new();
        for (_, key, record, diagnostic) in task_results {
            records.insert(key, record);
            diagnostics.extend(diagnostic);
        }

        let pairs = refs
            .into_iter()
            .filter_map(|package_ref| {
                let record = records.get(&package_ref.canonical_key()).cloned()?;
                Some((package_ref, record))
            })
            .collect();

        ResolutionOutcome { pairs, diagnostics }
    }

    async fn resolve_one(
        &self,
        package_ref: &PackageRef,
        cache: Option<&ResolutionCache>,
    ) -> (ResolvedRecord, Option<Diagnostic>) {
        let identifier = package_ref.identifier();

        if self.cancel.is_cancelled() {
            return (
                self.failed_record(package_ref, "resolution cancelled".to_string()),
                Some(Diagnostic::new(
                    DiagnosticCategory::Cancelled,
                    identifier,
                    "Lookup skipped, run was cancelled".to_string(),
                )),
            );
        }

        if self.capability_down.load(Ordering::SeqCst) {
            return (
                self.failed_record(package_ref, "lookup capability unavailable".to_string()),
                Some(Diagnostic::new(
                    DiagnosticCategory::Lookup,
                    identifier,
                    "Lookup skipped, capability is unavailable".to_string(),
                )),
            );
        }

        let name = package_ref.normalized_name();
        let call = self
            .lookup
            .lookup(package_ref.ecosystem(), &name, package_ref.version());

        match tokio::time::timeout(self.options.timeout, call).await {
            Ok(Ok(attribution)) => {
                let record = ResolvedRecord::from_attribution(
                    package_ref.name().to_string(),
                    package_ref.version().to_string(),
                    package_ref.ecosystem(),
                    attribution,
                    chrono::Utc::now(),
                );
                if let Some(cache) = cache {
                    cache.store(&package_ref.canonical_key(), record.clone());
                }
                (record, None)
            }
            Ok(Err(error)) => {
                let record = self.failed_record(package_ref, error.to_string());
                if error.is_systemic() {
                    self.capability_down.store(true, Ordering::SeqCst);
                } else if let Some(cache) = cache {
                    // Package-local failures are real answers; cache
                    // them so reruns do not retry known-missing packages.
                    cache.store(&package_ref.canonical_key(), record.clone());
                }
                (
                    record,
                    Some(Diagnostic::new(
                        DiagnosticCategory::Lookup,
                        identifier,
                        error.to_string(),
                    )),
                )
            }
            Err(_) => {
                let reason = format!(
                    "lookup timed out after {}s",
                    self.options.timeout.as_secs()
                );
                (
                    self.failed_record(package_ref, reason.clone()),
                    Some(Diagnostic::new(
                        DiagnosticCategory::Lookup,
                        identifier,
                        reason,
                    )),
                )
            }
        }
    }

    fn failed_record(&self, package_ref: &PackageRef, reason: String) -> ResolvedRecord {
        ResolvedRecord::failed(
            package_ref.name().to_string(),
            package_ref.version().to_string(),
            package_ref.ecosystem(),
            reason,
            chrono::Utc::now(),
        )
    }
}
