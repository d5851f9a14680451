use crate::adapters::outbound::archive::open_archive;
use crate::application::dto::{NoticeRequest, NoticeResponse};
use crate::discovery::{Discoverer, DiscoveryOutcome, InputDescriptor};
use crate::notice_generation::domain::{Diagnostic, DiagnosticCategory};
use crate::notice_generation::services::NoticeAssembler;
use crate::ports::inbound::NoticeGenerationPort;
use crate::ports::outbound::{MetadataLookup, ProgressReporter};
use crate::resolve::{CancelFlag, ResolutionCache, ResolveOptions, Resolver};
use crate::shared::Result;
use async_trait::async_trait;

/// GenerateNoticesUseCase - Core use case for notice generation
///
/// This use case orchestrates the pipeline using generic dependency
/// injection for all infrastructure dependencies: classify the input,
/// discover package references, resolve them against the cache and the
/// lookup capability, and assemble the canonical document.
///
/// # Type Parameters
/// * `L` - MetadataLookup implementation
/// * `P` - ProgressReporter implementation
pub struct GenerateNoticesUseCase<L, P> {
    metadata_lookup: L,
    progress_reporter: P,
    cancel: CancelFlag,
}

impl<L, P> GenerateNoticesUseCase<L, P>
where
    L: MetadataLookup,
    P: ProgressReporter,
{
    /// Creates a new GenerateNoticesUseCase with injected dependencies
    pub fn new(metadata_lookup: L, progress_reporter: P, cancel: CancelFlag) -> Self {
        Self {
            metadata_lookup,
            progress_reporter,
            cancel,
        }
    }

    /// Executes the notice generation use case
    ///
    /// # Arguments
    /// * `request` - Notice generation request containing the input and
    ///   resolution options
    ///
    /// # Returns
    /// NoticeResponse containing the assembled document and the
    /// diagnostics collected across all phases
    pub async fn execute(&self, request: NoticeRequest) -> Result<NoticeResponse> {
        // Step 1: Classify the input
        let descriptor = InputDescriptor::classify(&request.input, request.recursive)?;

        // Step 2: Discover package references
        let discovery = self.discover_and_report(&descriptor)?;
        let mut diagnostics = discovery.diagnostics;

        // Step 3: Open the cache
        let cache = self.load_cache(&request, &mut diagnostics);

        // Step 4: Resolve attribution data
        let reference_count = discovery.references.len();
        let outcome = self
            .resolve_references(&request, discovery.references, cache.as_ref())
            .await;
        diagnostics.extend(outcome.diagnostics);

        // Step 5: Persist the cache
        let (cache_hits, cache_misses) = self.flush_cache(cache, &mut diagnostics);

        // Step 6: Assemble the document
        let document = NoticeAssembler::assemble(
            outcome.pairs,
            &descriptor.description(),
            chrono::Utc::now(),
        );

        let counts = document.metadata().counts();
        if self.cancel.is_cancelled() {
            self.progress_reporter
                .report_error("⚠️  Run cancelled; the document covers completed lookups only");
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Notice assembly complete: {} package(s) ({} resolved, {} partial, {} failed)",
            counts.total(),
            counts.resolved,
            counts.partial,
            counts.failed
        ));
        if reference_count == 0 {
            self.progress_reporter
                .report("No third-party packages were discovered");
        }

        Ok(NoticeResponse::new(
            document,
            diagnostics,
            cache_hits,
            cache_misses,
        ))
    }

    /// Runs the discovery mode selected by the input descriptor,
    /// reporting progress
    fn discover_and_report(&self, descriptor: &InputDescriptor) -> Result<DiscoveryOutcome> {
        self.progress_reporter
            .report(&format!("🔍 Scanning {}", descriptor.description()));

        let outcome = match descriptor {
            InputDescriptor::Directory { path, recursive } => {
                Discoverer::discover_directory(path, *recursive)?
            }
            InputDescriptor::Archive { path } => {
                let mut reader = open_archive(path)?;
                Discoverer::discover_archive(path, reader.as_mut())?
            }
            InputDescriptor::IdentifierList { path } => Discoverer::discover_identifier_list(path)?,
            InputDescriptor::Identifier { value } => Discoverer::discover_identifier(value)?,
        };

        self.progress_reporter.report(&format!(
            "✅ Discovered {} package reference(s)",
            outcome.references.len()
        ));

        Ok(outcome)
    }

    /// Opens the durable cache when enabled; load problems become
    /// diagnostics, never failures
    fn load_cache(
        &self,
        request: &NoticeRequest,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<ResolutionCache> {
        if !request.cache_enabled {
            return None;
        }
        let (cache, load_diagnostics) = ResolutionCache::load(&request.cache_path);
        for diagnostic in &load_diagnostics {
            self.progress_reporter
                .report_error(&format!("⚠️  {}", diagnostic));
        }
        diagnostics.extend(load_diagnostics);
        Some(cache)
    }

    /// Resolves all references through the bounded concurrent resolver
    async fn resolve_references(
        &self,
        request: &NoticeRequest,
        references: Vec<crate::notice_generation::domain::PackageRef>,
        cache: Option<&ResolutionCache>,
    ) -> crate::resolve::resolver::ResolutionOutcome {
        if !references.is_empty() {
            self.progress_reporter.report(&format!(
                "🔎 Resolving license information for {} package(s)...",
                references.len()
            ));
        }

        let options = ResolveOptions {
            concurrency: request.concurrency,
            timeout: request.timeout,
            force_refresh: request.force_refresh,
        };
        let resolver = Resolver::new(&self.metadata_lookup, options, self.cancel.clone());
        let reporter = &self.progress_reporter;
        resolver
            .resolve_all(references, cache, |done, total| {
                reporter.report_progress(done, total, None)
            })
            .await
    }

    /// Writes the cache back to disk and reports hit statistics
    fn flush_cache(
        &self,
        cache: Option<ResolutionCache>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> (usize, usize) {
        let Some(cache) = cache else {
            return (0, 0);
        };
        let stats = (cache.hits(), cache.misses());
        if let Err(e) = cache.flush() {
            let diagnostic = Diagnostic::new(
                DiagnosticCategory::Cache,
                "cache flush".to_string(),
                e.to_string(),
            );
            self.progress_reporter
                .report_error(&format!("⚠️  {}", diagnostic));
            diagnostics.push(diagnostic);
        }
        stats
    }
}

#[async_trait(?Send)]
impl<L, P> NoticeGenerationPort for GenerateNoticesUseCase<L, P>
where
    L: MetadataLookup,
    P: ProgressReporter,
{
    async fn generate_notices(&self, request: NoticeRequest) -> Result<NoticeResponse> {
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests;
