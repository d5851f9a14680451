/// What kind of problem a diagnostic reports. Categories drive the
/// end-of-run summary grouping, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// A manifest was recognized but could not be parsed
    ManifestParse,
    /// An identifier line or argument was malformed
    Identifier,
    /// An archive entry could not be read or decoded
    ArchiveEntry,
    /// A metadata lookup failed for one package
    Lookup,
    /// A cache line was corrupt or the cache file could not be used
    Cache,
    /// A reference was never resolved because the run was cancelled
    Cancelled,
}

impl DiagnosticCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCategory::ManifestParse => "manifest",
            DiagnosticCategory::Identifier => "identifier",
            DiagnosticCategory::ArchiveEntry => "archive",
            DiagnosticCategory::Lookup => "lookup",
            DiagnosticCategory::Cache => "cache",
            DiagnosticCategory::Cancelled => "cancelled",
        }
    }
}

/// One non-fatal problem encountered during a run.
///
/// Diagnostics never abort generation; they are collected, attached to
/// the response, and printed to stderr after the document is written.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    category: DiagnosticCategory,
    subject: String,
    message: String,
}

impl Diagnostic {
    pub fn new(category: DiagnosticCategory, subject: String, message: String) -> Self {
        Self {
            category,
            subject,
            message,
        }
    }

    pub fn category(&self) -> DiagnosticCategory {
        self.category
    }

    /// What the diagnostic is about: a file path, an archive entry,
    /// or a package identifier.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.category.as_str(),
            self.subject,
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(
            DiagnosticCategory::ManifestParse,
            "/proj/package-lock.json".to_string(),
            "invalid JSON at line 3".to_string(),
        );
        assert_eq!(
            format!("{}", diag),
            "[manifest] /proj/package-lock.json: invalid JSON at line 3"
        );
    }

    #[test]
    fn test_category_tags() {
        assert_eq!(DiagnosticCategory::Lookup.as_str(), "lookup");
        assert_eq!(DiagnosticCategory::Cache.as_str(), "cache");
        assert_eq!(DiagnosticCategory::Identifier.as_str(), "identifier");
        assert_eq!(DiagnosticCategory::ArchiveEntry.as_str(), "archive");
        assert_eq!(DiagnosticCategory::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn test_diagnostic_accessors() {
        let diag = Diagnostic::new(
            DiagnosticCategory::Lookup,
            "pkg:npm/ghost@1.0.0".to_string(),
            "package not found in registry".to_string(),
        );
        assert_eq!(diag.category(), DiagnosticCategory::Lookup);
        assert_eq!(diag.subject(), "pkg:npm/ghost@1.0.0");
        assert_eq!(diag.message(), "package not found in registry");
    }
}
