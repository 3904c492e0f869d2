//! `kinetic-tui`: terminal front-end for Kinetic BAQ devices.
//!
//! Lists the order/release rows returned by the configured BAQ endpoint and
//! shows the trailing 24 hours of metrics for a selected device.
//!
//! Logs are written to a file (default `/tmp/kinetic-tui.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, config loading, tracing setup, panic
//! hooks, and app launch.

mod action;
mod app;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use kinetic_config::Config;

use crate::app::App;

/// Terminal browser for Kinetic BAQ devices and their metrics.
#[derive(Parser, Debug)]
#[command(name = "kinetic-tui", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, env = "KINETIC_CONFIG")]
    config: Option<PathBuf>,

    /// BAQ endpoint URL, overriding the config file and environment
    #[arg(short = 'u', long)]
    url: Option<String>,

    /// Fetch device metrics in the detail view
    #[arg(short, long)]
    metrics: bool,

    /// Print the effective configuration (secrets masked) and exit
    #[arg(long)]
    print_config: bool,

    /// Log file path
    #[arg(long, default_value = "/tmp/kinetic-tui.log", env = "KINETIC_LOG_FILE")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may go to stdout/stderr while the
/// TUI owns the terminal. The returned guard flushes on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "kinetic_tui={log_level},kinetic_core={log_level},kinetic_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("kinetic-tui.log"));

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

/// Config layers, then CLI flags on top.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut cfg = kinetic_config::load_config(cli.config.as_deref())?;
    if let Some(url) = &cli.url {
        cfg.api_url.clone_from(url);
    }
    if cli.metrics {
        cfg.metrics_fetch_enabled = true;
    }
    Ok(cfg)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let cfg = resolve_config(&cli)?;
    if cli.print_config {
        print!("{}", cfg.to_redacted_toml()?);
        return Ok(());
    }

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    // Missing credentials fail here, before any request or terminal setup
    let client_config = cfg.to_client_config()?;
    let client = client_config.build_client()?;

    info!(
        url = %client_config.url,
        metrics = client_config.metrics_fetch_enabled,
        "starting kinetic-tui"
    );

    let mut app = App::new(
        Arc::new(client),
        client_config.url.to_string(),
        client_config.metrics_fetch_enabled,
    );
    app.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from(["kinetic-tui", "-u", "http://erp/api", "-m", "-vv"]);
        assert_eq!(cli.url.as_deref(), Some("http://erp/api"));
        assert!(cli.metrics);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.print_config);
    }
}
