mod config;

use anyhow::Result;
use clap::Parser;
use comicpull_acquire::HttpFetcher;
use comicpull_library::{PullConfig, PullRequest, Puller};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "comicpull")]
#[command(about = "Download the comic issues your library is missing from a supported site")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Book name as it appears in the source site's URLs (e.g., "absolute-martian-manhunter-2025")
    #[arg(required_unless_present = "list_sources")]
    book_name: Option<String>,

    /// Library root where issues are saved [default: $COMICPULL_LIBRARY, config file, or ./library]
    #[arg(long)]
    library_path: Option<PathBuf>,

    /// Source site to pull from [default: $COMICPULL_SOURCE, config file, or readcomicsonline.ru]
    #[arg(long)]
    source_url: Option<String>,

    /// First issue to pull, counting from 1
    #[arg(short, long, default_value_t = 1)]
    first_issue: usize,

    /// Last issue to pull, inclusive [default: latest issue]
    #[arg(short, long)]
    last_issue: Option<usize>,

    /// Report which issues are missing without downloading them
    #[arg(long)]
    dry_run: bool,

    /// Print the pull report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// JSON config file supplying defaults [default: ./comicpull.json if present]
    #[arg(long)]
    config: Option<PathBuf>,

    /// List supported source sites and exit
    #[arg(long)]
    list_sources: bool,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.utc);

    if cli.list_sources {
        for id in comicpull_acquire::known_sources() {
            println!("{id}");
        }
        return Ok(());
    }

    let defaults = config::load_defaults(cli.config.as_deref())?;
    let config = PullConfig {
        library_path: cli.library_path.unwrap_or(defaults.library_path),
        source: cli.source_url.unwrap_or(defaults.source_url),
    };
    let request = PullRequest {
        book_name: cli.book_name.unwrap_or_default(),
        first_issue: cli.first_issue,
        last_issue: cli.last_issue,
        dry_run: cli.dry_run,
    };
    tracing::info!(
        book = %request.book_name,
        library = %config.library_path.display(),
        source = %config.source,
        first = request.first_issue,
        last = ?request.last_issue,
        "Pulling issues"
    );

    let fetcher = Arc::new(HttpFetcher::new()?);
    let report = Puller::new(config, fetcher).pull(&request).await?;

    if cli.json {
        println!("{}", report.to_json()?);
    }
    Ok(())
}

fn init_logging(level: &LogLevel, utc: bool) {
    // HTML parsing crates are chatty below info
    let level = match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z".to_string();

    // Logs go to stderr so `--json` output stays clean.
    if utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format))
            .init();
    }
}
