//! Tabula launcher
//!
//! Builds the schema catalog and data source, either from a JSON fixture
//! file or the built-in sample set, then hands them to the TUI.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use tabula_schema::{SchemaBrowser, Strictness};

mod config;
mod fixture;
mod sample;
mod tui;

#[derive(Parser, Debug)]
#[command(name = "tabula", about = "Schema-driven table browser and editor")]
struct Cli {
    /// Load schemas and rows from a JSON fixture instead of the sample set
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Rows fetched per table selection
    #[arg(long, default_value_t = 20)]
    limit: usize,

    /// Treat duplicate row ids and missing commit targets as errors
    #[arg(long)]
    strict: bool,

    /// Log file path (defaults to ~/.tabula/tabula.log)
    #[arg(long, env = "TABULA_LOG_FILE")]
    log_file: Option<PathBuf>,
}

/// Logging goes to a file only: the TUI owns the terminal, so anything on
/// stdout or stderr would corrupt the alternate screen.
fn init_logging(log_file: Option<PathBuf>) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let path = log_file.unwrap_or_else(config::default_log_path);
    let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tabula.log".to_string());
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tabula=info,tabula_schema=info".into());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(file_layer).init();
    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.log_file.clone())?;

    let (catalog, source) = match cli.fixture {
        Some(ref path) => fixture::load(path)
            .with_context(|| format!("failed to load fixture {}", path.display()))?,
        None => (sample::sample_catalog(), sample::sample_source()),
    };
    info!(
        schemas = catalog.schemas.len(),
        limit = cli.limit,
        strict = cli.strict,
        "starting tabula"
    );

    let browser = SchemaBrowser::new(catalog, Box::new(source)).with_limit(cli.limit);
    let strictness = if cli.strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };

    tui::run(tui::app::App::new(browser, strictness))
}
