/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through
/// CLI invocation to correct output, using `assert_cmd` and `tempfile`
/// for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CONFIG_FILENAME: &str = "oss-notices.config.yml";

/// Config in the working directory is discovered automatically
#[test]
fn test_config_auto_discovery_sets_format() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILENAME), "format: json\n").unwrap();

    cargo_bin_cmd!("oss-notices")
        .current_dir(dir.path())
        .args(["--no-cache", "."])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}

/// A CLI flag wins over the config file value
#[test]
fn test_cli_format_overrides_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILENAME), "format: json\n").unwrap();

    cargo_bin_cmd!("oss-notices")
        .current_dir(dir.path())
        .args(["--no-cache", "-f", "text", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("THIRD-PARTY SOFTWARE NOTICES"));
}

/// --config points at an explicit file, wherever it lives
#[test]
fn test_explicit_config_path() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("custom.yml");
    fs::write(&config_path, "format: html\n").unwrap();

    cargo_bin_cmd!("oss-notices")
        .args([
            "--no-cache",
            "--config",
            &config_path.to_string_lossy(),
            &dir.path().to_string_lossy(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("<!DOCTYPE html>"));
}

/// A broken explicit config file is a fatal application error
#[test]
fn test_broken_explicit_config_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("broken.yml");
    fs::write(&config_path, "format: [[[not yaml").unwrap();

    cargo_bin_cmd!("oss-notices")
        .args([
            "--config",
            &config_path.to_string_lossy(),
            &dir.path().to_string_lossy(),
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

/// An invalid format value in the config is rejected with a hint
#[test]
fn test_invalid_config_format_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILENAME), "format: markdown\n").unwrap();

    cargo_bin_cmd!("oss-notices")
        .current_dir(dir.path())
        .args(["--no-cache", "."])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("💡 Hint"));
}

/// Unknown config fields warn but never fail the run
#[test]
fn test_unknown_config_fields_warn() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILENAME),
        "format: text\nfrobnicate: true\n",
    )
    .unwrap();

    cargo_bin_cmd!("oss-notices")
        .current_dir(dir.path())
        .args(["--no-cache", "."])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown config field 'frobnicate'"));
}

/// The config file can relocate the cache
#[test]
fn test_config_cache_file_location() {
    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("attribution-cache.jsonl");
    fs::write(
        dir.path().join(CONFIG_FILENAME),
        format!("cache_file: {}\n", cache_path.display()),
    )
    .unwrap();

    cargo_bin_cmd!("oss-notices")
        .current_dir(dir.path())
        .arg(".")
        .assert()
        .success();

    assert!(cache_path.exists());
}

/// The config file can write output to a file by default
#[test]
fn test_config_output_path() {
    let dir = TempDir::new().unwrap();
    let out_path = dir.path().join("NOTICE.txt");
    fs::write(
        dir.path().join(CONFIG_FILENAME),
        format!("output: {}\n", out_path.display()),
    )
    .unwrap();

    cargo_bin_cmd!("oss-notices")
        .current_dir(dir.path())
        .args(["--no-cache", "."])
        .assert()
        .success();

    let content = fs::read_to_string(&out_path).unwrap();
    assert!(content.contains("THIRD-PARTY SOFTWARE NOTICES"));
}
