pub mod diagnostics;
pub mod document;
pub mod ecosystem;
pub mod package_ref;
pub mod resolved;

pub use diagnostics::{Diagnostic, DiagnosticCategory};
pub use document::{DocumentMetadata, NoticeDocument, StatusCounts};
pub use ecosystem::Ecosystem;
pub use package_ref::{CanonicalKey, PackageRef, SourceLocator};
pub use resolved::{AttributionData, ResolutionStatus, ResolvedRecord};
