//! oss-notices - third-party attribution notice assembly
//!
//! This library discovers third-party packages in a project directory,
//! package archive, or identifier list, resolves license and copyright
//! information for each of them, and assembles a deterministic notice
//! document in plain text, HTML, or JSON.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`notice_generation`): Pure business logic and domain models
//! - **Discovery** (`discovery`): Input classification and package reference extraction
//! - **Resolution** (`resolve`): The durable cache and the bounded concurrent resolver
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use oss_notices::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let metadata_lookup = RegistryMetadataLookup::new()?;
//! let progress_reporter = StderrProgressReporter::new(Verbosity::Normal);
//!
//! // Create use case
//! let use_case = GenerateNoticesUseCase::new(
//!     metadata_lookup,
//!     progress_reporter,
//!     CancelFlag::new(),
//! );
//!
//! // Execute
//! let request = NoticeRequest::new("./my-project".to_string());
//! let response = use_case.execute(request).await?;
//!
//! // Render output
//! let renderer = TextNoticeRenderer::new();
//! let output = renderer.render(&response.document)?;
//! println!("{}", String::from_utf8_lossy(&output));
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod discovery;
pub mod notice_generation;
pub mod ports;
pub mod resolve;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{StderrProgressReporter, Verbosity};
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::network::RegistryMetadataLookup;
    pub use crate::adapters::outbound::renderers::{
        HtmlNoticeRenderer, JsonNoticeRenderer, TextNoticeRenderer,
    };
    pub use crate::application::dto::{NoticeRequest, NoticeResponse, OutputEncoding};
    pub use crate::application::use_cases::GenerateNoticesUseCase;
    pub use crate::discovery::{Discoverer, InputDescriptor};
    pub use crate::notice_generation::domain::{
        AttributionData, Diagnostic, DiagnosticCategory, Ecosystem, NoticeDocument, PackageRef,
        ResolutionStatus, ResolvedRecord,
    };
    pub use crate::notice_generation::services::NoticeAssembler;
    pub use crate::ports::outbound::{
        ArchiveEntry, ArchiveReader, LookupError, MetadataLookup, NoticeRenderer, OutputPresenter,
        ProgressReporter,
    };
    pub use crate::resolve::{CancelFlag, ResolutionCache, ResolveOptions, Resolver};
    pub use crate::shared::Result;
}
