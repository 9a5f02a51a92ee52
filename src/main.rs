mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;
mod transport;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use datasources::OpenWeatherMapClient;
use db::Database;
use error::Result;
use logic::{AlertService, RulesEngine};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Some(Commands::Init) => {
            Config::setup_interactive()?;
            Ok(())
        }
        Some(Commands::Check) => check(cli.config, cli.data_dir).await,
        Some(Commands::Run { dry_run }) => run(cli.config, cli.data_dir, dry_run).await,
        None => run(cli.config, cli.data_dir, false).await,
    }
}

async fn run(
    config_override: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    dry_run_flag: bool,
) -> Result<()> {
    let config = if Config::exists(config_override.as_ref()) {
        load_config(config_override)
    } else {
        let (config, _path) = Config::setup_interactive()?;
        config
    };

    let dry_run = dry_run_flag || config.app.dry_run;

    let db = Database::open(&config.db_path(data_dir.as_ref())?)?;

    let service = AlertService::new(config, db, dry_run);
    let summary = service.run().await?;

    println!(
        "Done: {} districts alerted, {} alerts generated, {} messages dispatched, {} skipped, {} failures",
        summary.districts_processed,
        summary.alerts_generated,
        summary.messages_dispatched,
        summary.districts_skipped,
        summary.failures
    );

    Ok(())
}

async fn check(config_override: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_override);

    println!("Config: OK ({} districts configured)", config.districts.len());

    let engine = RulesEngine::new();
    println!("Rules:");
    for (id, name) in engine.list_rules() {
        println!("  {:<14} {}", id, name);
    }

    let db = Database::open(&config.db_path(data_dir.as_ref())?)?;
    let users = db.fetch_all_users()?;
    let districts = db.unique_districts()?;
    println!(
        "Database: OK ({} users across {} districts) at {}",
        users.len(),
        districts.len(),
        db.path().display()
    );

    // Probe the provider with the first configured district
    match config.districts.values().next() {
        Some(coords) => {
            let weather = OpenWeatherMapClient::new(config.openweathermap.clone());
            match weather.test_connection(coords).await {
                Ok(true) => println!("OpenWeatherMap: OK"),
                Ok(false) => println!("OpenWeatherMap: UNREACHABLE (non-success status)"),
                Err(e) => println!("OpenWeatherMap: FAILED ({})", e),
            }
        }
        None => println!("OpenWeatherMap: SKIPPED (no districts configured)"),
    }

    Ok(())
}

fn load_config(config_override: Option<PathBuf>) -> Config {
    match Config::load(config_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `agri-sahayak init` to set up.");
            std::process::exit(1);
        }
    }
}
