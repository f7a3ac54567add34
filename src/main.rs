use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use revive_engine::config::Settings;
use revive_engine::ViabilityEngine;

/// Score and rank a batch of enriched property records
#[derive(Debug, Parser)]
#[command(name = "revive-engine", version, about)]
struct Args {
    /// JSON file containing an array of enriched property records
    #[arg(short, long)]
    input: PathBuf,

    /// Configuration file (overrides config/default.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the ranking report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let args = Args::parse();

    // Load configuration
    let settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Community Revive viability analysis...");

    // Weight misconfiguration fails here, before any property is scored
    let engine = ViabilityEngine::new(settings.engine_config()).map_err(|err| {
        error!("Configuration error: {}", err);
        err
    })?;

    let raw = fs::read_to_string(&args.input)?;
    let raw_properties: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
    info!(
        "Loaded {} raw property records from {}",
        raw_properties.len(),
        args.input.display()
    );

    let report = engine.run(raw_properties);

    info!(
        "Scored {} properties, {} failed validation",
        report.total_processed, report.total_failed_validation
    );

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!("Ranking report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
