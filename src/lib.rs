//! Datecrawl: date-windowed image dataset acquisition.
//!
//! Datecrawl fetches a bounded number of images for a keyword within each of
//! several date windows, keeps every window in its own subdirectory, and
//! records the result in a manifest of (absolute path, relative path) pairs.
//! A [`cursor::DatasetCursor`] then walks the manifest (or the directory tree
//! directly) one pair at a time, wrapping around at the end.
//!
//! # Modules
//!
//! - [`dataset`]: Path pairs, asset classification, directory scanning and the manifest codec
//! - [`acquire`]: Date windows, run configuration, the fetch contract and the orchestrator
//! - [`cursor`]: Restartable sequential access to a dataset
//! - [`error`]: Error types for datecrawl operations

pub mod acquire;
pub mod cursor;
pub mod dataset;
pub mod error;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use acquire::{AcquisitionConfig, DateWindow, DEFAULT_KEYWORD};
use cursor::DatasetCursor;
use dataset::AssetFilter;
pub use error::DatecrawlError;

/// The datecrawl CLI application.
#[derive(Parser)]
#[command(name = "datecrawl")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Fetch images for each date window and write a manifest.
    Acquire(AcquireArgs),
    /// Build a manifest from an existing directory tree.
    Scan(ScanArgs),
    /// Print every pair of a manifest or directory once.
    List(SourceArgs),
    /// Step through a manifest or directory interactively.
    Browse(SourceArgs),
}

/// How pairs are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One `<absolute>\t<relative>` line per pair.
    Text,
    /// A JSON array of pair objects.
    Json,
}

/// Arguments for the acquire subcommand.
#[derive(clap::Args)]
struct AcquireArgs {
    /// Search keyword.
    #[arg(long, default_value = DEFAULT_KEYWORD)]
    keyword: String,

    /// Output root; window N is written to `<out-dir>/range_N`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Manifest path (absolute;relative rows).
    #[arg(long, alias = "csv")]
    manifest: PathBuf,

    /// Date window `YYYY-MM-DD:YYYY-MM-DD`; repeat for several windows.
    #[arg(long = "range", required = true)]
    ranges: Vec<String>,

    /// Maximum images per window, in [50, 1000].
    #[arg(long)]
    per_range: usize,

    /// Recognized asset extensions.
    #[arg(long, value_delimiter = ',', default_values_t = default_extensions())]
    extensions: Vec<String>,

    /// Number of the first window's subdirectory.
    #[arg(long, default_value_t = 0)]
    index_base: usize,

    /// User-Agent header sent with every request.
    #[arg(long, env = "DATECRAWL_USER_AGENT")]
    user_agent: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Do not print the acquired pairs.
    #[arg(long)]
    quiet: bool,

    /// Output format for the acquired pairs.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

/// Arguments for the scan subcommand.
#[derive(clap::Args)]
struct ScanArgs {
    /// Dataset root to scan.
    dir: PathBuf,

    /// Manifest path to write.
    #[arg(long, alias = "csv")]
    manifest: PathBuf,

    /// Recognized asset extensions.
    #[arg(long, value_delimiter = ',', default_values_t = default_extensions())]
    extensions: Vec<String>,
}

/// Arguments shared by list and browse.
#[derive(clap::Args)]
struct SourceArgs {
    /// Manifest file or directory.
    source: PathBuf,

    /// Root for relative paths when SOURCE is a directory.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Recognized asset extensions when SOURCE is a directory.
    #[arg(long, value_delimiter = ',', default_values_t = default_extensions())]
    extensions: Vec<String>,

    /// Output format (list only).
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

fn default_extensions() -> Vec<String> {
    dataset::DEFAULT_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

/// Run the datecrawl CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), DatecrawlError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Acquire(args)) => run_acquire(args),
        Some(Commands::Scan(args)) => run_scan(args),
        Some(Commands::List(args)) => run_list(args),
        Some(Commands::Browse(args)) => run_browse(args),
        None => {
            println!("datecrawl {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Date-windowed image dataset acquisition.");
            println!();
            println!("Run 'datecrawl --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the acquire subcommand.
fn run_acquire(args: AcquireArgs) -> Result<(), DatecrawlError> {
    let windows = args
        .ranges
        .iter()
        .map(|range| range.parse::<DateWindow>())
        .collect::<Result<Vec<_>, _>>()?;

    let config = AcquisitionConfig::new(
        args.keyword,
        windows,
        args.per_range,
        args.out_dir,
        args.manifest,
    )
    .with_filter(AssetFilter::new(&args.extensions)?)
    .with_index_base(args.index_base);

    // Fail on configuration before building any network client.
    config.validate()?;

    let report = acquire_remote(&config, args.user_agent, args.timeout_secs)?;
    tracing::info!(
        windows = report.windows.len(),
        assets = report.asset_count,
        manifest = %report.manifest_path.display(),
        "acquisition complete"
    );

    if args.quiet {
        return Ok(());
    }

    let cursor = open_acquired(&config.manifest_path, &config.output_root, &config.filter)?;
    print_pairs(&cursor, args.output)
}

#[cfg(feature = "remote")]
fn acquire_remote(
    config: &AcquisitionConfig,
    user_agent: Option<String>,
    timeout_secs: u64,
) -> Result<acquire::AcquisitionReport, DatecrawlError> {
    use acquire::http::{HttpFetcherConfig, HttpImageFetcher};

    let mut fetcher_config = HttpFetcherConfig {
        timeout: std::time::Duration::from_secs(timeout_secs),
        filter: config.filter.clone(),
        ..HttpFetcherConfig::default()
    };
    if let Some(user_agent) = user_agent {
        fetcher_config.user_agent = user_agent;
    }

    let fetcher = HttpImageFetcher::new(fetcher_config);
    acquire::run_acquisition(config, &fetcher)
}

#[cfg(not(feature = "remote"))]
fn acquire_remote(
    _config: &AcquisitionConfig,
    _user_agent: Option<String>,
    _timeout_secs: u64,
) -> Result<acquire::AcquisitionReport, DatecrawlError> {
    Err(DatecrawlError::RemoteUnavailable)
}

/// Execute the scan subcommand.
fn run_scan(args: ScanArgs) -> Result<(), DatecrawlError> {
    let filter = AssetFilter::new(&args.extensions)?;
    let pairs = dataset::scan(&args.dir, &filter)?;
    dataset::write_manifest(&args.manifest, &pairs)?;

    println!(
        "Wrote {} asset(s) from {} to {}",
        pairs.len(),
        args.dir.display(),
        args.manifest.display()
    );
    Ok(())
}

/// Execute the list subcommand.
fn run_list(args: SourceArgs) -> Result<(), DatecrawlError> {
    let cursor = open_source(&args)?;
    print_pairs(&cursor, args.output)
}

/// Execute the browse subcommand.
fn run_browse(args: SourceArgs) -> Result<(), DatecrawlError> {
    let mut cursor = open_source(&args)?;
    eprintln!(
        "{} asset(s). Enter = next, r = reset, q = quit.",
        cursor.len()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    cursor::browse(&mut cursor, stdin.lock(), stdout.lock())?;
    Ok(())
}

fn open_source(args: &SourceArgs) -> Result<DatasetCursor, DatecrawlError> {
    let filter = AssetFilter::new(&args.extensions)?;
    DatasetCursor::open_with_filter(&args.source, args.root.as_deref(), &filter)
}

fn print_pairs(cursor: &DatasetCursor, format: OutputFormat) -> Result<(), DatecrawlError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, cursor.items()).map_err(io::Error::from)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for pair in cursor {
                writeln!(out, "{}", pair)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// Opens a cursor the way `acquire` does after a run: the manifest when it
/// exists, the output directory otherwise.
///
/// The manifest is the one the run just wrote, so it is read whatever its
/// extension.
pub fn open_acquired(
    manifest_path: &Path,
    output_root: &Path,
    filter: &AssetFilter,
) -> Result<DatasetCursor, DatecrawlError> {
    if manifest_path.is_file() {
        return Ok(DatasetCursor::from_pairs(dataset::read_manifest(
            manifest_path,
        )?));
    }
    DatasetCursor::open_with_filter(output_root, Some(output_root), filter)
}
