//! Velha - terminal front end.
//!
//! Parses options, sends logs to a file, opens the durable store and hands
//! control to the terminal surface.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use tracing::info;
use tracing_subscriber::EnvFilter;
use velha::{MemoryStore, SqliteStore};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli)?;

    if cli.in_memory {
        info!("Starting velha with in-memory store");
        tui::run(MemoryStore::new())
    } else {
        info!(db_path = %cli.db_path, "Starting velha");
        let store = SqliteStore::open(&cli.db_path)
            .with_context(|| format!("Failed to open database '{}'", cli.db_path))?;
        tui::run(store)
    }
}

/// Logs go to a file so they don't interfere with the terminal surface.
fn init_tracing(cli: &Cli) -> Result<()> {
    let log_file = std::fs::File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}
