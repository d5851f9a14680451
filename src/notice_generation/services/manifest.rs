use crate::notice_generation::domain::Ecosystem;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;

/// The closed set of manifest formats the discovery layer understands.
///
/// Each variant knows which ecosystem it belongs to and how to extract
/// `(name, version)` pairs from raw file contents. Dispatch is static
/// over this enum; there is no runtime registry to misconfigure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// package-lock.json (npm, lockfileVersion 1-3)
    NpmLock,
    /// package.json - authoritative for the package it describes,
    /// only consulted inside archives
    NpmPackageJson,
    /// uv.lock (PyPI, TOML)
    UvLock,
    /// requirements.txt - exact `name==version` pins only
    PipRequirements,
    /// Cargo.lock (crates.io, TOML)
    CargoLock,
    /// *.dist-info/METADATA inside a wheel
    WheelMetadata,
    /// META-INF/maven/.../pom.properties inside a jar
    PomProperties,
}

impl ManifestKind {
    pub fn ecosystem(&self) -> Ecosystem {
        match self {
            ManifestKind::NpmLock | ManifestKind::NpmPackageJson => Ecosystem::Npm,
            ManifestKind::UvLock | ManifestKind::PipRequirements | ManifestKind::WheelMetadata => {
                Ecosystem::PyPi
            }
            ManifestKind::CargoLock => Ecosystem::Cargo,
            ManifestKind::PomProperties => Ecosystem::Maven,
        }
    }

    /// Recognize a plain file by name during a directory walk.
    ///
    /// package.json is deliberately absent here: in a source tree it
    /// describes the project itself, not a third-party dependency, and
    /// the lockfile next to it is the authoritative dependency list.
    pub fn recognize_file_name(file_name: &str) -> Option<Self> {
        match file_name {
            "package-lock.json" => Some(ManifestKind::NpmLock),
            "uv.lock" => Some(ManifestKind::UvLock),
            "requirements.txt" => Some(ManifestKind::PipRequirements),
            "Cargo.lock" => Some(ManifestKind::CargoLock),
            _ => None,
        }
    }

    /// Recognize an entry inside an archive by its full path.
    ///
    /// Covers everything the directory walk recognizes plus the
    /// archive-only formats (wheel METADATA, jar pom.properties, and
    /// the packed package's own package.json).
    pub fn recognize_entry_path(entry_path: &str) -> Option<Self> {
        let file_name = entry_path.rsplit('/').next().unwrap_or(entry_path);

        if let Some(kind) = Self::recognize_file_name(file_name) {
            return Some(kind);
        }
        if file_name == "package.json" {
            return Some(ManifestKind::NpmPackageJson);
        }
        if file_name == "METADATA" && entry_path.contains(".dist-info/") {
            return Some(ManifestKind::WheelMetadata);
        }
        if file_name == "pom.properties" && entry_path.contains("META-INF/maven/") {
            return Some(ManifestKind::PomProperties);
        }
        None
    }

    /// Extract `(name, version)` pairs from raw manifest bytes.
    ///
    /// Entries without a usable version are skipped silently; a file
    /// that cannot be parsed at all is an error the caller downgrades
    /// to a diagnostic.
    pub fn parse(&self, bytes: &[u8]) -> Result<Vec<(String, String)>> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| anyhow::anyhow!("Manifest is not valid UTF-8: {}", e))?;
        match self {
            ManifestKind::NpmLock => parse_npm_lock(content),
            ManifestKind::NpmPackageJson => parse_npm_package_json(content),
            ManifestKind::UvLock => parse_toml_lock(content, "uv.lock"),
            ManifestKind::PipRequirements => Ok(parse_requirements(content)),
            ManifestKind::CargoLock => parse_toml_lock(content, "Cargo.lock"),
            ManifestKind::WheelMetadata => Ok(parse_wheel_metadata(content)),
            ManifestKind::PomProperties => Ok(parse_pom_properties(content)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NpmLockFile {
    #[serde(default)]
    packages: HashMap<String, NpmLockPackage>,
    #[serde(default)]
    dependencies: HashMap<String, NpmV1Dependency>,
}

#[derive(Debug, Deserialize)]
struct NpmLockPackage {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    link: bool,
}

#[derive(Debug, Deserialize)]
struct NpmV1Dependency {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    dependencies: HashMap<String, NpmV1Dependency>,
}

/// lockfileVersion 2/3 uses the `packages` map keyed by install path;
/// version 1 nests everything under `dependencies`.
fn parse_npm_lock(content: &str) -> Result<Vec<(String, String)>> {
    let lock: NpmLockFile = serde_json::from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse package-lock.json: {}", e))?;

    let mut pairs = Vec::new();

    if !lock.packages.is_empty() {
        // Sort keys so extraction order is stable across serde's map order
        let mut keys: Vec<&String> = lock.packages.keys().collect();
        keys.sort();
        for key in keys {
            // The "" key is the root project, not a dependency
            if key.is_empty() {
                continue;
            }
            let package = &lock.packages[key];
            if package.link {
                continue;
            }
            let Some(version) = &package.version else {
                continue;
            };
            // The package name is the path segment after the last
            // node_modules/, which keeps npm scopes intact
            let name = match key.rfind("node_modules/") {
                Some(idx) => &key[idx + "node_modules/".len()..],
                None => key.as_str(),
            };
            if !name.is_empty() {
                pairs.push((name.to_string(), version.clone()));
            }
        }
    } else {
        collect_npm_v1(&lock.dependencies, &mut pairs);
    }

    Ok(pairs)
}

fn collect_npm_v1(deps: &HashMap<String, NpmV1Dependency>, pairs: &mut Vec<(String, String)>) {
    let mut names: Vec<&String> = deps.keys().collect();
    names.sort();
    for name in names {
        let dep = &deps[name];
        if let Some(version) = &dep.version {
            pairs.push((name.clone(), version.clone()));
        }
        collect_npm_v1(&dep.dependencies, pairs);
    }
}

#[derive(Debug, Deserialize)]
struct NpmPackageJson {
    name: Option<String>,
    version: Option<String>,
}

fn parse_npm_package_json(content: &str) -> Result<Vec<(String, String)>> {
    let manifest: NpmPackageJson = serde_json::from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse package.json: {}", e))?;
    match (manifest.name, manifest.version) {
        (Some(name), Some(version)) => Ok(vec![(name, version)]),
        _ => Ok(vec![]),
    }
}

#[derive(Debug, Deserialize)]
struct TomlLockFile {
    #[serde(default, rename = "package")]
    packages: Vec<TomlLockPackage>,
}

#[derive(Debug, Deserialize)]
struct TomlLockPackage {
    name: String,
    version: Option<String>,
}

/// uv.lock and Cargo.lock share the `[[package]]` table-array shape.
fn parse_toml_lock(content: &str, label: &str) -> Result<Vec<(String, String)>> {
    let lock: TomlLockFile =
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", label, e))?;
    Ok(lock
        .packages
        .into_iter()
        .filter_map(|p| p.version.map(|v| (p.name, v)))
        .collect())
}

/// Only exact `name==version` pins carry an attributable version;
/// ranges, editable installs, and option lines are skipped.
fn parse_requirements(content: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for line in content.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() || line.starts_with('-') {
            continue;
        }
        let Some((raw_name, version)) = line.split_once("==") else {
            continue;
        };
        // Strip environment markers and extras: `name[extra]==1.0; marker`
        let version = version.split(';').next().unwrap_or("").trim();
        let name = raw_name.split('[').next().unwrap_or("").trim();
        if !name.is_empty() && !version.is_empty() {
            pairs.push((name.to_string(), version.to_string()));
        }
    }
    pairs
}

/// Wheel METADATA is RFC 822 headers; only the header block before the
/// first blank line is meaningful (the body is the long description).
fn parse_wheel_metadata(content: &str) -> Vec<(String, String)> {
    let mut name = None;
    let mut version = None;
    for line in content.lines() {
        if line.is_empty() {
            break;
        }
        if let Some(value) = line.strip_prefix("Name:") {
            name = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("Version:") {
            version = Some(value.trim().to_string());
        }
    }
    match (name, version) {
        (Some(n), Some(v)) if !n.is_empty() && !v.is_empty() => vec![(n, v)],
        _ => vec![],
    }
}

/// pom.properties is a Java properties file with groupId, artifactId,
/// and version keys. The Maven name is `groupId:artifactId`.
fn parse_pom_properties(content: &str) -> Vec<(String, String)> {
    let mut group = None;
    let mut artifact = None;
    let mut version = None;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            match key.trim() {
                "groupId" => group = Some(value.trim().to_string()),
                "artifactId" => artifact = Some(value.trim().to_string()),
                "version" => version = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }
    match (group, artifact, version) {
        (Some(g), Some(a), Some(v)) => vec![(format!("{}:{}", g, a), v)],
        _ => vec![],
    }
}
