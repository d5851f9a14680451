use serde::{Deserialize, Serialize};

/// Package ecosystems the discovery and resolution pipeline understands.
///
/// The set is closed on purpose: every recognizer, registry endpoint, and
/// normalization rule is tied to one of these variants, so adding an
/// ecosystem is a deliberate code change rather than a string that appears
/// at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Npm,
    PyPi,
    Cargo,
    Maven,
}

impl Ecosystem {
    /// Stable lowercase tag used in canonical keys, purl identifiers,
    /// and rendered output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::PyPi => "pypi",
            Ecosystem::Cargo => "cargo",
            Ecosystem::Maven => "maven",
        }
    }

    /// Parse a purl type tag. Unknown tags are rejected rather than
    /// passed through so a typo cannot create a phantom ecosystem.
    pub fn from_purl_type(tag: &str) -> Option<Self> {
        match tag {
            "npm" => Some(Ecosystem::Npm),
            "pypi" => Some(Ecosystem::PyPi),
            "cargo" => Some(Ecosystem::Cargo),
            "maven" => Some(Ecosystem::Maven),
            _ => None,
        }
    }

    /// Normalize a raw package name into its canonical form for this
    /// ecosystem. Two spellings that a registry treats as the same
    /// package must normalize to the same string.
    ///
    /// - npm: names are lowercased (the registry is case-insensitive)
    /// - PyPI: PEP 503 rules - lowercase, runs of `-`, `_`, `.`
    ///   collapse to a single `-`
    /// - cargo, maven: names are taken as-is
    pub fn normalize_name(&self, raw: &str) -> String {
        match self {
            Ecosystem::Npm => raw.to_lowercase(),
            Ecosystem::PyPi => {
                let lowered = raw.to_lowercase();
                let mut out = String::with_capacity(lowered.len());
                let mut prev_sep = false;
                for c in lowered.chars() {
                    if c == '-' || c == '_' || c == '.' {
                        if !prev_sep {
                            out.push('-');
                        }
                        prev_sep = true;
                    } else {
                        out.push(c);
                        prev_sep = false;
                    }
                }
                out
            }
            Ecosystem::Cargo | Ecosystem::Maven => raw.to_string(),
        }
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
