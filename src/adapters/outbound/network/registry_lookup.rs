use crate::notice_generation::domain::{AttributionData, Ecosystem};
use crate::ports::outbound::{LookupError, MetadataLookup};
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NpmLicenseField {
    Expression(String),
    Object {
        #[serde(rename = "type")]
        kind: String,
    },
}

#[derive(Debug, Deserialize)]
struct NpmVersionDoc {
    #[serde(default)]
    license: Option<NpmLicenseField>,
    #[serde(default)]
    homepage: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PyPiDoc {
    info: PyPiInfo,
}

#[derive(Debug, Deserialize)]
struct PyPiInfo {
    #[serde(default)]
    license: Option<String>,
    #[serde(default)]
    license_expression: Option<String>,
    #[serde(default)]
    home_page: Option<String>,
    #[serde(default)]
    classifiers: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CratesIoDoc {
    version: CratesIoVersion,
}

#[derive(Debug, Deserialize)]
struct CratesIoVersion {
    #[serde(default)]
    license: Option<String>,
    #[serde(default)]
    homepage: Option<String>,
}

/// RegistryMetadataLookup adapter for fetching attribution data from
/// public package registries
///
/// This adapter implements the MetadataLookup port with one JSON
/// endpoint per ecosystem: the npm registry, the PyPI JSON API, and
/// crates.io. Maven has no default backend and reports
/// `UnsupportedEcosystem`.
///
/// # Async Support
/// Uses async reqwest client for non-blocking HTTP requests; the
/// resolver runs calls for distinct packages concurrently.
pub struct RegistryMetadataLookup {
    client: reqwest::Client,
}

impl RegistryMetadataLookup {
    /// Creates a new registry lookup with default configuration
    pub fn new() -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("oss-notices/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Validates a package name or version before it enters a URL
    fn validate_url_component(
        component: &str,
        component_type: &str,
    ) -> std::result::Result<(), LookupError> {
        // Security: Prevent URL injection attacks. '/' and '@' are
        // legitimate in npm scoped names and get percent-encoded.
        if component.contains('\\') || component.contains("..") {
            return Err(LookupError::InvalidMetadata {
                details: format!("{} contains path traversal sequences", component_type),
            });
        }

        if component.contains('#') || component.contains('?') {
            return Err(LookupError::InvalidMetadata {
                details: format!("{} contains URL-unsafe characters", component_type),
            });
        }

        Ok(())
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        ecosystem: Ecosystem,
    ) -> std::result::Result<T, LookupError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(&e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound { ecosystem });
        }
        if status.is_server_error() {
            return Err(LookupError::Unavailable {
                details: format!("registry returned status {}", status),
            });
        }
        if !status.is_success() {
            return Err(LookupError::InvalidMetadata {
                details: format!("registry returned status {}", status),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::InvalidMetadata {
                details: e.to_string(),
            })
    }

    fn map_transport_error(error: &reqwest::Error) -> LookupError {
        if error.is_connect() || error.is_timeout() {
            LookupError::Unavailable {
                details: error.to_string(),
            }
        } else {
            LookupError::InvalidMetadata {
                details: error.to_string(),
            }
        }
    }

    async fn lookup_npm(
        &self,
        name: &str,
        version: &str,
    ) -> std::result::Result<AttributionData, LookupError> {
        let url = format!(
            "https://registry.npmjs.org/{}/{}",
            urlencoding::encode(name),
            urlencoding::encode(version)
        );
        let doc: NpmVersionDoc = self.fetch_json(&url, Ecosystem::Npm).await?;

        let license_expression = doc.license.map(|field| match field {
            NpmLicenseField::Expression(expr) => expr,
            NpmLicenseField::Object { kind } => kind,
        });

        Ok(AttributionData::new(
            license_expression,
            vec![],
            vec![],
            None,
            doc.homepage,
        ))
    }

    async fn lookup_pypi(
        &self,
        name: &str,
        version: &str,
    ) -> std::result::Result<AttributionData, LookupError> {
        let url = format!(
            "https://pypi.org/pypi/{}/{}/json",
            urlencoding::encode(name),
            urlencoding::encode(version)
        );
        let doc: PyPiDoc = self.fetch_json(&url, Ecosystem::PyPi).await?;

        // PyPI's `license` field holds anything from an SPDX id to the
        // full license body. Multi-line content is attribution text;
        // short content is an expression.
        let mut license_expression = doc.info.license_expression;
        let mut license_texts = Vec::new();
        if let Some(license) = doc.info.license.filter(|l| !l.trim().is_empty()) {
            if license.contains('\n') || license.len() > 120 {
                license_texts.push(license);
            } else if license_expression.is_none() {
                license_expression = Some(license);
            }
        }
        if license_expression.is_none() {
            license_expression = license_from_classifiers(&doc.info.classifiers);
        }

        Ok(AttributionData::new(
            license_expression,
            license_texts,
            vec![],
            None,
            doc.info.home_page.filter(|h| !h.is_empty()),
        ))
    }

    async fn lookup_cargo(
        &self,
        name: &str,
        version: &str,
    ) -> std::result::Result<AttributionData, LookupError> {
        let url = format!(
            "https://crates.io/api/v1/crates/{}/{}",
            urlencoding::encode(name),
            urlencoding::encode(version)
        );
        let doc: CratesIoDoc = self.fetch_json(&url, Ecosystem::Cargo).await?;

        Ok(AttributionData::new(
            doc.version.license,
            vec![],
            vec![],
            None,
            doc.version.homepage,
        ))
    }
}

/// Derive a license name from PyPI trove classifiers,
/// e.g. `License :: OSI Approved :: MIT License` → `MIT License`.
fn license_from_classifiers(classifiers: &[String]) -> Option<String> {
    classifiers
        .iter()
        .filter(|c| c.starts_with("License ::"))
        .filter_map(|c| c.rsplit("::").next())
        .map(|c| c.trim().to_string())
        .find(|c| !c.is_empty() && c != "OSI Approved")
}

#[async_trait]
impl MetadataLookup for RegistryMetadataLookup {
    async fn lookup(
        &self,
        ecosystem: Ecosystem,
        name: &str,
        version: &str,
    ) -> std::result::Result<AttributionData, LookupError> {
        Self::validate_url_component(name, "Package name")?;
        Self::validate_url_component(version, "Version")?;

        match ecosystem {
            Ecosystem::Npm => self.lookup_npm(name, version).await,
            Ecosystem::PyPi => self.lookup_pypi(name, version).await,
            Ecosystem::Cargo => self.lookup_cargo(name, version).await,
            Ecosystem::Maven => Err(LookupError::UnsupportedEcosystem(Ecosystem::Maven)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup_creation() {
        let lookup = RegistryMetadataLookup::new();
        assert!(lookup.is_ok());
    }

    #[tokio::test]
    async fn test_maven_is_unsupported() {
        let lookup = RegistryMetadataLookup::new().unwrap();
        let result = lookup
            .lookup(Ecosystem::Maven, "com.google.guava:guava", "32.1.2")
            .await;
        assert!(matches!(
            result,
            Err(LookupError::UnsupportedEcosystem(Ecosystem::Maven))
        ));
    }

    #[tokio::test]
    async fn test_traversal_rejected_before_any_request() {
        let lookup = RegistryMetadataLookup::new().unwrap();
        let result = lookup.lookup(Ecosystem::Npm, "../../etc/passwd", "1.0.0").await;
        assert!(matches!(result, Err(LookupError::InvalidMetadata { .. })));
    }

    #[test]
    fn test_npm_license_field_shapes() {
        let doc: NpmVersionDoc = serde_json::from_str(r#"{"license":"MIT"}"#).unwrap();
        assert!(matches!(
            doc.license,
            Some(NpmLicenseField::Expression(ref e)) if e == "MIT"
        ));

        let doc: NpmVersionDoc =
            serde_json::from_str(r#"{"license":{"type":"Apache-2.0"}}"#).unwrap();
        assert!(matches!(
            doc.license,
            Some(NpmLicenseField::Object { ref kind }) if kind == "Apache-2.0"
        ));

        let doc: NpmVersionDoc = serde_json::from_str(r#"{}"#).unwrap();
        assert!(doc.license.is_none());
    }

    #[test]
    fn test_license_from_classifiers() {
        let classifiers = vec![
            "Programming Language :: Python :: 3".to_string(),
            "License :: OSI Approved :: MIT License".to_string(),
        ];
        assert_eq!(
            license_from_classifiers(&classifiers),
            Some("MIT License".to_string())
        );
        assert_eq!(license_from_classifiers(&[]), None);
    }

    // Integration tests - require network access
    // Uncomment to run against the real registries
    // #[tokio::test]
    // async fn test_lookup_npm_real() {
    //     let lookup = RegistryMetadataLookup::new().unwrap();
    //     let data = lookup.lookup(Ecosystem::Npm, "lodash", "4.17.21").await.unwrap();
    //     assert_eq!(data.license_expression(), Some("MIT"));
    // }
}
