use crate::notice_generation::domain::{AttributionData, Ecosystem};
use async_trait::async_trait;
use thiserror::Error;

/// Why a metadata lookup failed for one package.
///
/// The resolver uses [`LookupError::is_systemic`] to decide whether the
/// failure is local to one package or means the capability itself is
/// down, in which case it stops issuing further lookups for the run.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Package not found in the {ecosystem} registry")]
    NotFound { ecosystem: Ecosystem },

    #[error("No lookup backend for the {0} ecosystem")]
    UnsupportedEcosystem(Ecosystem),

    #[error("Registry returned unusable metadata: {details}")]
    InvalidMetadata { details: String },

    #[error("Lookup capability unavailable: {details}")]
    Unavailable { details: String },
}

impl LookupError {
    /// True when the failure affects every subsequent lookup, not just
    /// this package.
    pub fn is_systemic(&self) -> bool {
        matches!(self, LookupError::Unavailable { .. })
    }
}

/// MetadataLookup port - the pluggable capability that turns a package
/// identity into attribution data.
///
/// Implementations are typically network-backed registry clients; the
/// resolver treats every call as a blocking external operation and
/// wraps it in its own timeout, so implementations do not need one.
///
/// # Async Support
/// Lookups for distinct packages run concurrently in a bounded pool.
/// Implementations must be `Send + Sync`.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Fetch attribution data for one package version.
    ///
    /// # Arguments
    /// * `ecosystem` - which registry to consult
    /// * `name` - normalized package name
    /// * `version` - exact version string
    ///
    /// # Errors
    /// Returns a [`LookupError`] describing whether the failure is
    /// package-local (not found, bad metadata) or systemic
    /// (capability unavailable).
    async fn lookup(
        &self,
        ecosystem: Ecosystem,
        name: &str,
        version: &str,
    ) -> Result<AttributionData, LookupError>;
}
