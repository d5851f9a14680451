use crate::notice_generation::domain::{Ecosystem, PackageRef, SourceLocator};
use crate::shared::error::NoticeError;
use crate::shared::Result;

/// Parse a `pkg:type/name@version` identifier into a package reference.
///
/// This is the subset of the purl grammar the pipeline accepts: a type
/// tag from the supported ecosystems, an optional namespace segment
/// that is folded into the name (`pkg:npm/@scope/pkg@1.0.0`,
/// `pkg:maven/group/artifact@1.0` becomes `group:artifact`), and a
/// mandatory version. Qualifiers and subpaths are rejected.
pub fn parse_identifier(value: &str, source: SourceLocator) -> Result<PackageRef> {
    let invalid = |reason: &str| -> anyhow::Error {
        NoticeError::InvalidIdentifier {
            identifier: value.to_string(),
            reason: reason.to_string(),
        }
        .into()
    };

    let rest = value
        .trim()
        .strip_prefix("pkg:")
        .ok_or_else(|| invalid("Identifier must start with 'pkg:'"))?;

    if rest.contains('?') || rest.contains('#') {
        return Err(invalid("Qualifiers and subpaths are not supported"));
    }

    let (type_tag, remainder) = rest
        .split_once('/')
        .ok_or_else(|| invalid("Missing '/' after the package type"))?;

    let ecosystem = Ecosystem::from_purl_type(type_tag)
        .ok_or_else(|| invalid("Unsupported package type"))?;

    // The version is everything after the last '@'. Splitting from the
    // right keeps npm scope markers ('@scope/...') out of the way.
    let (raw_name, version) = remainder
        .rsplit_once('@')
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| invalid("Missing version (expected name@version)"))?;

    if version.is_empty() {
        return Err(invalid("Missing version (expected name@version)"));
    }

    let name = fold_namespace(ecosystem, raw_name)?;
    PackageRef::new(name, version.to_string(), ecosystem, source)
}

/// Fold an optional purl namespace segment into the ecosystem's native
/// name form: npm keeps `@scope/name`, Maven joins as `group:artifact`,
/// PyPI and Cargo have no namespaces.
fn fold_namespace(ecosystem: Ecosystem, raw_name: &str) -> Result<String> {
    match raw_name.split_once('/') {
        None => Ok(raw_name.to_string()),
        Some((namespace, name)) => match ecosystem {
            Ecosystem::Npm => {
                if namespace.starts_with('@') {
                    Ok(format!("{}/{}", namespace, name))
                } else {
                    Ok(format!("@{}/{}", namespace, name))
                }
            }
            Ecosystem::Maven => Ok(format!("{}:{}", namespace, name)),
            Ecosystem::PyPi | Ecosystem::Cargo => Err(NoticeError::InvalidIdentifier {
                identifier: raw_name.to_string(),
                reason: format!("{} packages do not have namespaces", ecosystem),
            }
            .into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: &str) -> Result<PackageRef> {
        parse_identifier(value, SourceLocator::Direct)
    }

    #[test]
    fn test_parse_simple_identifier() {
        let pkg = parse("pkg:npm/lodash@4.17.21").unwrap();
        assert_eq!(pkg.name(), "lodash");
        assert_eq!(pkg.version(), "4.17.21");
        assert_eq!(pkg.ecosystem(), Ecosystem::Npm);
    }

    #[test]
    fn test_parse_scoped_npm_identifier() {
        let pkg = parse("pkg:npm/@types/node@20.1.0").unwrap();
        assert_eq!(pkg.name(), "@types/node");
        assert_eq!(pkg.version(), "20.1.0");
    }

    #[test]
    fn test_parse_npm_namespace_without_at() {
        // Canonical purl form omits the '@' from the namespace segment
        let pkg = parse("pkg:npm/babel/core@7.0.0").unwrap();
        assert_eq!(pkg.name(), "@babel/core");
    }

    #[test]
    fn test_parse_maven_coordinates() {
        let pkg = parse("pkg:maven/com.google.guava/guava@32.1.2-jre").unwrap();
        assert_eq!(pkg.name(), "com.google.guava:guava");
        assert_eq!(pkg.version(), "32.1.2-jre");
        assert_eq!(pkg.ecosystem(), Ecosystem::Maven);
    }

    #[test]
    fn test_parse_pypi_and_cargo() {
        let pkg = parse("pkg:pypi/Flask@3.0.0").unwrap();
        assert_eq!(pkg.ecosystem(), Ecosystem::PyPi);
        let pkg = parse("pkg:cargo/serde@1.0.200").unwrap();
        assert_eq!(pkg.ecosystem(), Ecosystem::Cargo);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let pkg = parse("  pkg:npm/lodash@4.17.21\n").unwrap();
        assert_eq!(pkg.name(), "lodash");
    }

    #[test]
    fn test_reject_missing_prefix() {
        let err = parse("npm/lodash@4.17.21").unwrap_err();
        assert!(err.to_string().contains("must start with 'pkg:'"));
    }

    #[test]
    fn test_reject_unsupported_type() {
        let err = parse("pkg:golang/github.com/x/y@1.0.0").unwrap_err();
        assert!(err.to_string().contains("Unsupported package type"));
    }

    #[test]
    fn test_reject_missing_version() {
        assert!(parse("pkg:npm/lodash").is_err());
        assert!(parse("pkg:npm/lodash@").is_err());
    }

    #[test]
    fn test_reject_qualifiers() {
        let err = parse("pkg:npm/lodash@4.17.21?arch=x86").unwrap_err();
        assert!(err.to_string().contains("not supported"));
    }

    #[test]
    fn test_reject_pypi_namespace() {
        assert!(parse("pkg:pypi/some/thing@1.0").is_err());
    }
}
