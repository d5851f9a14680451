use crate::notice_generation::domain::Ecosystem;
use crate::shared::Result;
use std::path::PathBuf;

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// Maximum length for package versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// Where a package reference was discovered. Carried for diagnostics
/// only; it never participates in identity or ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocator {
    /// A manifest file found while walking a directory tree
    Manifest { path: PathBuf },
    /// A manifest entry inside a package archive
    ArchiveEntry { archive: PathBuf, entry: String },
    /// A line in an identifier-list file
    IdentifierList { path: PathBuf, line: usize },
    /// A single identifier passed directly on the command line
    Direct,
}

impl std::fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceLocator::Manifest { path } => write!(f, "{}", path.display()),
            SourceLocator::ArchiveEntry { archive, entry } => {
                write!(f, "{}!{}", archive.display(), entry)
            }
            SourceLocator::IdentifierList { path, line } => {
                write!(f, "{}:{}", path.display(), line)
            }
            SourceLocator::Direct => write!(f, "<command line>"),
        }
    }
}

/// Canonical identity of a package: `ecosystem:normalized_name:version`.
///
/// Every dedup decision, cache lookup, and in-flight guard keys on this
/// string, so two spellings of the same package can never produce two
/// sections or two outbound lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub fn new(ecosystem: Ecosystem, normalized_name: &str, version: &str) -> Self {
        Self(format!("{}:{}:{}", ecosystem.as_str(), normalized_name, version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A discovered package reference: raw name, version, ecosystem, and the
/// location it was discovered from.
///
/// The raw name is preserved for display; identity always goes through
/// [`CanonicalKey`] which applies the ecosystem's normalization rules.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageRef {
    name: String,
    version: String,
    ecosystem: Ecosystem,
    source: SourceLocator,
}

impl PackageRef {
    pub fn new(
        name: String,
        version: String,
        ecosystem: Ecosystem,
        source: SourceLocator,
    ) -> Result<Self> {
        validate_name(&name)?;
        validate_version(&version)?;
        Ok(Self {
            name,
            version,
            ecosystem,
            source,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    pub fn source(&self) -> &SourceLocator {
        &self.source
    }

    pub fn normalized_name(&self) -> String {
        self.ecosystem.normalize_name(&self.name)
    }

    pub fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::new(self.ecosystem, &self.normalized_name(), &self.version)
    }

    /// The purl-style identifier for this reference,
    /// e.g. `pkg:npm/lodash@4.17.21`.
    pub fn identifier(&self) -> String {
        format!("pkg:{}/{}@{}", self.ecosystem.as_str(), self.name, self.version)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("Package name cannot be empty");
    }

    // Security: Length limit to prevent DoS
    if name.len() > MAX_PACKAGE_NAME_LENGTH {
        anyhow::bail!(
            "Package name is too long ({} bytes). Maximum allowed: {} bytes",
            name.len(),
            MAX_PACKAGE_NAME_LENGTH
        );
    }

    // Security: Validate characters. The set covers npm scopes (@scope/name),
    // Maven coordinates (group:artifact), and PEP 508 extras (name[extra]).
    if !name.chars().all(|c| {
        c.is_alphanumeric()
            || c == '-'
            || c == '_'
            || c == '.'
            || c == '@'
            || c == '/'
            || c == ':'
            || c == '['
            || c == ']'
    }) {
        anyhow::bail!(
            "Package name contains invalid characters. Only alphanumeric, hyphens, underscores, dots, scopes, and coordinates are allowed."
        );
    }

    Ok(())
}

fn validate_version(version: &str) -> Result<()> {
    if version.is_empty() {
        anyhow::bail!("Package version cannot be empty");
    }

    // Security: Length limit to prevent DoS
    if version.len() > MAX_VERSION_LENGTH {
        anyhow::bail!(
            "Package version is too long ({} bytes). Maximum allowed: {} bytes",
            version.len(),
            MAX_VERSION_LENGTH
        );
    }

    // Security: Validate characters
    if !version.chars().all(|c| {
        c.is_alphanumeric() || c == '.' || c == '-' || c == '+' || c == '_'
    }) {
        anyhow::bail!(
            "Package version contains invalid characters. Only alphanumeric, dots, hyphens, plus, and underscores are allowed."
        );
    }

    Ok(())
}
