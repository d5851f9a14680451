mod adapters;
mod application;
mod cli;
mod config;
mod discovery;
mod notice_generation;
mod ports;
mod resolve;
mod shared;

use adapters::outbound::console::{StderrProgressReporter, Verbosity};
use adapters::outbound::network::RegistryMetadataLookup;
use application::dto::{NoticeRequest, NoticeResponse, OutputEncoding};
use application::factories::{PresenterFactory, PresenterType, RendererFactory};
use application::use_cases::GenerateNoticesUseCase;
use cli::Args;
use config::ConfigFile;
use owo_colors::OwoColorize;
use resolve::CancelFlag;
use shared::error::ExitCode;
use shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // clap itself exits with code 2 on invalid arguments
    let args = Args::parse_args();

    match run(args).await {
        Ok(()) => process::exit(ExitCode::Success.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let encoding = effective_encoding(&args, &config)?;
    let output_path = args.output.clone().or_else(|| config.output.clone());

    let verbosity = if args.quiet {
        Verbosity::Quiet
    } else if args.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    };

    // Create adapters (Dependency Injection)
    let metadata_lookup = RegistryMetadataLookup::new()?;
    let progress_reporter = StderrProgressReporter::new(verbosity);

    // Ctrl-C requests cooperative cancellation; in-flight lookups
    // finish and the document covers what completed.
    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let use_case = GenerateNoticesUseCase::new(metadata_lookup, progress_reporter, cancel);
    let request = build_request(&args, &config);
    let response = use_case.execute(request).await?;

    // Render and present the document
    eprintln_unless_quiet(&args, RendererFactory::progress_message(encoding));
    let renderer = RendererFactory::create(encoding);
    let rendered = renderer.render(&response.document)?;

    let presenter_type = match output_path {
        Some(path) => PresenterType::File(PathBuf::from(path)),
        None => PresenterType::Stdout,
    };
    let presenter = PresenterFactory::create(presenter_type);
    presenter.present(&rendered)?;

    report_diagnostics(&response);
    if args.verbose {
        eprintln!(
            "📦 Cache: {} hit(s), {} miss(es)",
            response.cache_hits, response.cache_misses
        );
    }

    Ok(())
}

/// Load the config file: explicit `--config` path is fatal when broken,
/// auto-discovery in the current directory is silent when absent.
fn load_config(args: &Args) -> Result<ConfigFile> {
    if let Some(path) = args.config.as_deref() {
        return config::load_config_from_path(Path::new(path));
    }
    Ok(config::discover_config(Path::new("."))?.unwrap_or_default())
}

/// Command-line flags win over config file values, which win over
/// built-in defaults.
fn effective_encoding(args: &Args, config: &ConfigFile) -> Result<OutputEncoding> {
    if let Some(encoding) = args.format {
        return Ok(encoding);
    }
    match config.format.as_deref() {
        Some(s) => OutputEncoding::from_str(s).map_err(|e| anyhow::anyhow!(e)),
        None => Ok(OutputEncoding::default()),
    }
}

fn build_request(args: &Args, config: &ConfigFile) -> NoticeRequest {
    let mut request = NoticeRequest::new(args.input.clone());
    request.recursive = args.recursive || config.recursive.unwrap_or(false);
    request.cache_enabled = !args.no_cache && config.cache.unwrap_or(true);
    request.force_refresh = args.force_refresh;
    if let Some(path) = args.cache_file.as_deref().or(config.cache_file.as_deref()) {
        request.cache_path = PathBuf::from(path);
    }
    if let Some(concurrency) = args.concurrency.or(config.concurrency) {
        request.concurrency = concurrency;
    }
    if let Some(seconds) = args.timeout.or(config.timeout) {
        request.timeout = Duration::from_secs(seconds);
    }
    request
}

fn eprintln_unless_quiet(args: &Args, message: &str) {
    if !args.quiet {
        eprintln!("{}", message);
    }
}

/// Per-package problems go to stderr after the document so the output
/// stream stays clean for piping.
fn report_diagnostics(response: &NoticeResponse) {
    if response.diagnostics.is_empty() {
        return;
    }
    eprintln!(
        "{}",
        format!(
            "⚠️  {} issue(s) encountered during generation:",
            response.diagnostics.len()
        )
        .yellow()
    );
    for diagnostic in &response.diagnostics {
        eprintln!("  {}", diagnostic.to_string().yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(input: &str) -> Args {
        use clap::Parser;
        Args::try_parse_from(["oss-notices", input]).unwrap()
    }

    #[test]
    fn test_build_request_defaults() {
        let args = args_for("./project");
        let request = build_request(&args, &ConfigFile::default());
        assert_eq!(request.input, "./project");
        assert!(!request.recursive);
        assert!(request.cache_enabled);
        assert!(!request.force_refresh);
        assert_eq!(request.concurrency, 8);
        assert_eq!(request.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_build_request_config_fills_gaps() {
        let args = args_for("./project");
        let config = ConfigFile {
            recursive: Some(true),
            cache_file: Some("/tmp/c.jsonl".to_string()),
            concurrency: Some(2),
            timeout: Some(5),
            ..Default::default()
        };
        let request = build_request(&args, &config);
        assert!(request.recursive);
        assert_eq!(request.cache_path, PathBuf::from("/tmp/c.jsonl"));
        assert_eq!(request.concurrency, 2);
        assert_eq!(request.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_cli_flags_win_over_config() {
        use clap::Parser;
        let args = Args::try_parse_from([
            "oss-notices",
            "--concurrency",
            "16",
            "--cache-file",
            "/tmp/cli.jsonl",
            "./project",
        ])
        .unwrap();
        let config = ConfigFile {
            concurrency: Some(2),
            cache_file: Some("/tmp/config.jsonl".to_string()),
            ..Default::default()
        };
        let request = build_request(&args, &config);
        assert_eq!(request.concurrency, 16);
        assert_eq!(request.cache_path, PathBuf::from("/tmp/cli.jsonl"));
    }

    #[test]
    fn test_effective_encoding_precedence() {
        let mut args = args_for("./project");
        let config = ConfigFile {
            format: Some("html".to_string()),
            ..Default::default()
        };

        assert_eq!(
            effective_encoding(&args, &config).unwrap(),
            OutputEncoding::Html
        );

        args.format = Some(OutputEncoding::Json);
        assert_eq!(
            effective_encoding(&args, &config).unwrap(),
            OutputEncoding::Json
        );

        assert_eq!(
            effective_encoding(&args_for("."), &ConfigFile::default()).unwrap(),
            OutputEncoding::Text
        );
    }

    #[test]
    fn test_no_cache_flag_disables_cache() {
        use clap::Parser;
        let args = Args::try_parse_from(["oss-notices", "--no-cache", "./project"]).unwrap();
        let request = build_request(&args, &ConfigFile::default());
        assert!(!request.cache_enabled);
    }
}
