//! Command-line interface for velha.

use std::path::PathBuf;

use clap::Parser;

/// Velha - two-player tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "velha")]
#[command(about = "Two-player tic-tac-toe with resumable games and a leaderboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the database file (created if it doesn't exist)
    #[arg(long, env = "VELHA_DB_PATH", default_value = "velha.db")]
    pub db_path: String,

    /// Keep all state in memory; nothing is saved on exit
    #[arg(long)]
    pub in_memory: bool,

    /// File receiving log output
    #[arg(long, env = "VELHA_LOG_FILE", default_value = "velha.log")]
    pub log_file: PathBuf,
}
