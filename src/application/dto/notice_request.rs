use std::path::PathBuf;
use std::time::Duration;

/// NoticeRequest - Internal request DTO for the notice generation use
/// case
///
/// This DTO represents the internal request structure used within the
/// application layer. Rendering and output destination are not part of
/// it; they are applied to the response by the caller.
#[derive(Debug, Clone)]
pub struct NoticeRequest {
    /// The raw input argument: a directory, archive, identifier-list
    /// file, or pkg: identifier
    pub input: String,
    /// Whether directory scans descend into subdirectories
    pub recursive: bool,
    /// Whether the durable cache is consulted and written
    pub cache_enabled: bool,
    /// Re-resolve everything, overwriting cached entries
    pub force_refresh: bool,
    /// Location of the cache file
    pub cache_path: PathBuf,
    /// Maximum lookups in flight at once
    pub concurrency: usize,
    /// Wall-clock budget per lookup call
    pub timeout: Duration,
}

impl NoticeRequest {
    pub fn new(input: String) -> Self {
        Self {
            input,
            recursive: false,
            cache_enabled: true,
            force_refresh: false,
            cache_path: PathBuf::from(".oss-notices.cache.jsonl"),
            concurrency: 8,
            timeout: Duration::from_secs(30),
        }
    }
}
