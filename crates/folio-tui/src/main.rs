//! `folio`: a terminal portfolio showcase.
//!
//! Built on [ratatui](https://ratatui.rs) over the `folio-core` showcase
//! engine. Projects can be filtered by category and opened in a detail
//! overlay with links to their repository and live demo. Screens are
//! navigable via number keys: Projects and Contact.
//!
//! Logs are written to a file (default `/tmp/folio.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod event;
mod host;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use folio_config::{Config, ThemeMode};
use folio_core::CatalogStore;

use crate::app::App;

/// Browse a portfolio of projects in the terminal.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Catalog file (.toml or .json) to show instead of the built-in projects
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Start in this theme (light or dark), overriding the saved preference
    #[arg(short, long)]
    theme: Option<ThemeMode>,

    /// Log file path (defaults to /tmp/folio.log)
    #[arg(long, default_value = "/tmp/folio.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may log to stdout/stderr while the
/// TUI owns the terminal. The returned guard flushes logs on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "folio={log_level},folio_core={log_level},folio_config={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("folio.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Priority: `--catalog` > config file > built-in projects.
fn load_catalog(cli: &Cli, config: &Config) -> Result<CatalogStore> {
    match cli.catalog.as_ref().or(config.catalog.as_ref()) {
        Some(path) => folio_config::load_catalog(path)
            .wrap_err_with(|| format!("could not load catalog {}", path.display())),
        None => Ok(CatalogStore::builtin()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    // An unusable config file yields defaults and is never written back
    let (mut config, write_back) =
        folio_config::load_config_or_default(&folio_config::config_path());
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    let catalog = load_catalog(&cli, &config)?;

    info!(
        entries = catalog.len(),
        theme = %config.theme,
        "starting folio"
    );

    let mut app = App::new(Arc::new(catalog), config, write_back);
    app.run().await?;

    Ok(())
}
