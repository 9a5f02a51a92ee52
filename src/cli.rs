use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agri-sahayak", version, about = "Proactive weather alerting for farmers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate forecasts for all user districts and dispatch alerts
    Run {
        /// Log messages instead of sending SMS
        #[arg(long)]
        dry_run: bool,
    },
    /// Re-run interactive setup
    Init,
    /// Validate config, test the forecast provider, and list rules
    Check,
}
