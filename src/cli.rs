use clap::Parser;

use crate::application::dto::OutputEncoding;

/// Assemble third-party attribution notices
#[derive(Parser, Debug)]
#[command(name = "oss-notices")]
#[command(version)]
#[command(about = "Assemble third-party attribution notices from directories, archives, or package identifier lists", long_about = None)]
pub struct Args {
    /// Input: a project directory, a package archive (.zip/.whl/.jar/.tar.gz),
    /// a .txt identifier list, or a single pkg: identifier
    #[arg(default_value = ".")]
    pub input: String,

    /// Output format: text, html or json (default: text)
    #[arg(short, long)]
    pub format: Option<OutputEncoding>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Descend into subdirectories when scanning a directory
    #[arg(short, long)]
    pub recursive: bool,

    /// Disable the attribution cache for this run
    #[arg(long)]
    pub no_cache: bool,

    /// Re-resolve every package, overwriting cached entries
    #[arg(long)]
    pub force_refresh: bool,

    /// Cache file location
    #[arg(long, value_name = "PATH")]
    pub cache_file: Option<String>,

    /// Maximum registry lookups in flight at once
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Per-lookup timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Suppress progress output on stderr
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report per-package progress detail
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Path to a config file (defaults to oss-notices.config.yml in the
    /// current directory when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
