/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console,
/// archives, etc.).
pub mod archive_reader;
pub mod metadata_lookup;
pub mod notice_renderer;
pub mod output_presenter;
pub mod progress_reporter;

pub use archive_reader::{ArchiveEntry, ArchiveReader};
pub use metadata_lookup::{LookupError, MetadataLookup};
pub use notice_renderer::NoticeRenderer;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
