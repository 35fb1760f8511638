mod cli;
mod data;
mod error;
mod models;
mod stats;

use clap::Parser;
use cli::{App, Cli, Config, TerminalPrompter};
use colored::*;
use error::Result;
use std::io::{self, IsTerminal};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; the guard must live until exit so buffered lines flush.
    let _guard = init_logging(&cli)?;

    let config = Config::from_cli(&cli);
    info!("Using data directory {}", config.data_dir.display());

    let mut app = App::new(config, TerminalPrompter::new(), io::stdout());
    if !io::stderr().is_terminal() {
        app = app.without_spinner();
    }
    if let Err(e) = app.run() {
        error!("Explorer session failed: {:?}", e);
        println!("{} {}", "Error:".red(), e.to_string().red());
        return Err(e);
    }

    Ok(())
}

/// Logs to stderr, or to `--log-file` through a non-blocking writer.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::from_default_env();

    let Some(path) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        error::AppError::Cli(format!("--log-file has no file name: {}", path.display()))
    })?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}
