use super::*;
use crate::notice_generation::domain::{AttributionData, Ecosystem, ResolutionStatus};
use crate::ports::outbound::LookupError;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

struct StubLookup {
    replies: DashMap<String, AttributionData>,
    calls: AtomicUsize,
}

impl StubLookup {
    fn new() -> Self {
        Self {
            replies: DashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn with_reply(self, ecosystem: Ecosystem, name: &str, version: &str, data: AttributionData) -> Self {
        self.replies
            .insert(format!("{}:{}:{}", ecosystem.as_str(), name, version), data);
        self
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataLookup for StubLookup {
    async fn lookup(
        &self,
        ecosystem: Ecosystem,
        name: &str,
        version: &str,
    ) -> std::result::Result<AttributionData, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = format!("{}:{}:{}", ecosystem.as_str(), name, version);
        self.replies
            .get(&key)
            .map(|data| data.clone())
            .ok_or(LookupError::NotFound { ecosystem })
    }
}

struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, _message: &str) {}
    fn report_completion(&self, _message: &str) {}
}

fn mit() -> AttributionData {
    AttributionData::new(
        Some("MIT".to_string()),
        vec!["MIT License".to_string()],
        vec![],
        None,
        None,
    )
}

fn request_without_cache(input: &str) -> NoticeRequest {
    let mut request = NoticeRequest::new(input.to_string());
    request.cache_enabled = false;
    request
}

#[tokio::test]
async fn test_single_identifier_end_to_end() {
    let lookup =
        StubLookup::new().with_reply(Ecosystem::Npm, "lodash", "4.17.21", mit());
    let use_case = GenerateNoticesUseCase::new(lookup, SilentReporter, CancelFlag::new());

    let response = use_case
        .execute(request_without_cache("pkg:npm/lodash@4.17.21"))
        .await
        .unwrap();

    assert_eq!(response.document.sections().len(), 1);
    let section = &response.document.sections()[0];
    assert_eq!(section.name(), "lodash");
    assert_eq!(section.status(), ResolutionStatus::Resolved);
    assert!(response.diagnostics.is_empty());
    assert_eq!(
        response.document.metadata().input_description(),
        "identifier pkg:npm/lodash@4.17.21"
    );
}

#[tokio::test]
async fn test_directory_input_sorts_sections() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("requirements.txt"),
        "zope==5.0.0\nclick==8.1.7\n",
    )
    .unwrap();

    let lookup = StubLookup::new()
        .with_reply(Ecosystem::PyPi, "zope", "5.0.0", mit())
        .with_reply(Ecosystem::PyPi, "click", "8.1.7", mit());
    let use_case = GenerateNoticesUseCase::new(lookup, SilentReporter, CancelFlag::new());

    let response = use_case
        .execute(request_without_cache(&dir.path().to_string_lossy()))
        .await
        .unwrap();

    let names: Vec<&str> = response
        .document
        .sections()
        .iter()
        .map(|s| s.name())
        .collect();
    assert_eq!(names, vec!["click", "zope"]);
}

#[tokio::test]
async fn test_failed_lookup_still_yields_a_section() {
    let lookup = StubLookup::new();
    let use_case = GenerateNoticesUseCase::new(lookup, SilentReporter, CancelFlag::new());

    let response = use_case
        .execute(request_without_cache("pkg:npm/ghost@9.9.9"))
        .await
        .unwrap();

    assert_eq!(response.document.sections().len(), 1);
    assert!(response.document.sections()[0].is_failed());
    assert_eq!(response.diagnostics.len(), 1);
    assert_eq!(response.diagnostics[0].category(), DiagnosticCategory::Lookup);
}

#[tokio::test]
async fn test_empty_directory_is_success_with_empty_document() {
    let dir = TempDir::new().unwrap();
    let use_case =
        GenerateNoticesUseCase::new(StubLookup::new(), SilentReporter, CancelFlag::new());

    let response = use_case
        .execute(request_without_cache(&dir.path().to_string_lossy()))
        .await
        .unwrap();

    assert!(response.document.is_empty());
    assert!(response.diagnostics.is_empty());
}

#[tokio::test]
async fn test_missing_input_is_fatal() {
    let use_case =
        GenerateNoticesUseCase::new(StubLookup::new(), SilentReporter, CancelFlag::new());

    let result = use_case
        .execute(request_without_cache("/nonexistent/project"))
        .await;

    assert!(result.is_err());
    assert!(format!("{}", result.unwrap_err()).contains("Input not found"));
}

#[tokio::test]
async fn test_second_run_is_answered_from_cache() {
    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.jsonl");

    let lookup =
        StubLookup::new().with_reply(Ecosystem::Cargo, "serde", "1.0.200", mit());
    let use_case = GenerateNoticesUseCase::new(lookup, SilentReporter, CancelFlag::new());

    let mut request = NoticeRequest::new("pkg:cargo/serde@1.0.200".to_string());
    request.cache_path = cache_path.clone();

    let first = use_case.execute(request.clone()).await.unwrap();
    assert_eq!(first.cache_misses, 1);
    assert_eq!(use_case.metadata_lookup.call_count(), 1);
    assert!(cache_path.exists());

    let second = use_case.execute(request).await.unwrap();
    assert_eq!(second.cache_hits, 1);
    assert_eq!(use_case.metadata_lookup.call_count(), 1);
    assert_eq!(second.document.sections().len(), 1);
    assert!(!second.document.sections()[0].is_failed());
}

#[tokio::test]
async fn test_force_refresh_hits_backend_again() {
    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.jsonl");

    let lookup =
        StubLookup::new().with_reply(Ecosystem::Cargo, "serde", "1.0.200", mit());
    let use_case = GenerateNoticesUseCase::new(lookup, SilentReporter, CancelFlag::new());

    let mut request = NoticeRequest::new("pkg:cargo/serde@1.0.200".to_string());
    request.cache_path = cache_path;

    use_case.execute(request.clone()).await.unwrap();
    request.force_refresh = true;
    use_case.execute(request).await.unwrap();

    assert_eq!(use_case.metadata_lookup.call_count(), 2);
}

#[tokio::test]
async fn test_cancelled_run_marks_sections_failed() {
    let lookup =
        StubLookup::new().with_reply(Ecosystem::Npm, "lodash", "4.17.21", mit());
    let cancel = CancelFlag::new();
    cancel.cancel();
    let use_case = GenerateNoticesUseCase::new(lookup, SilentReporter, cancel);

    let response = use_case
        .execute(request_without_cache("pkg:npm/lodash@4.17.21"))
        .await
        .unwrap();

    assert!(response.document.sections()[0].is_failed());
    assert!(response
        .diagnostics
        .iter()
        .any(|d| d.category() == DiagnosticCategory::Cancelled));
    assert_eq!(use_case.metadata_lookup.call_count(), 0);
}
