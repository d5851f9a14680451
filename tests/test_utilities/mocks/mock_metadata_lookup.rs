use oss_notices::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock MetadataLookup for testing
///
/// Replies are keyed by `ecosystem:name:version`. Unknown packages get
/// a NotFound error, matching what a real registry would report. Clones
/// share state, so a test can keep a handle for call counting after
/// moving the mock into a use case.
#[derive(Clone)]
pub struct MockMetadataLookup {
    inner: Arc<Inner>,
}

struct Inner {
    replies: Mutex<HashMap<String, AttributionData>>,
    calls: AtomicUsize,
    unavailable: bool,
}

impl MockMetadataLookup {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                replies: Mutex::new(HashMap::new()),
                calls: AtomicUsize::new(0),
                unavailable: false,
            }),
        }
    }

    /// Every lookup fails as if the registry were unreachable.
    pub fn with_unavailable() -> Self {
        Self {
            inner: Arc::new(Inner {
                replies: Mutex::new(HashMap::new()),
                calls: AtomicUsize::new(0),
                unavailable: true,
            }),
        }
    }

    pub fn with_license(
        self,
        ecosystem: Ecosystem,
        name: &str,
        version: &str,
        license: &str,
    ) -> Self {
        self.with_attribution(
            ecosystem,
            name,
            version,
            AttributionData::new(
                Some(license.to_string()),
                vec![format!("{} license text", license)],
                vec![],
                None,
                None,
            ),
        )
    }

    pub fn with_attribution(
        self,
        ecosystem: Ecosystem,
        name: &str,
        version: &str,
        data: AttributionData,
    ) -> Self {
        self.inner
            .replies
            .lock()
            .unwrap()
            .insert(format!("{}:{}:{}", ecosystem.as_str(), name, version), data);
        self
    }

    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockMetadataLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MetadataLookup for MockMetadataLookup {
    async fn lookup(
        &self,
        ecosystem: Ecosystem,
        name: &str,
        version: &str,
    ) -> std::result::Result<AttributionData, LookupError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.unavailable {
            return Err(LookupError::Unavailable {
                details: "mock registry unreachable".to_string(),
            });
        }
        let key = format!("{}:{}:{}", ecosystem.as_str(), name, version);
        self.inner
            .replies
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or(LookupError::NotFound { ecosystem })
    }
}
