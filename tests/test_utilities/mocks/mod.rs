/// Mock implementations for testing
mod mock_metadata_lookup;
mod mock_progress_reporter;

pub use mock_metadata_lookup::MockMetadataLookup;
pub use mock_progress_reporter::MockProgressReporter;
