//! tradegen CLI - Synthetic Trade Record Generation
//!
//! # Commands
//!
//! - `tradegen generate` - Generate a scenario's trades and write the report
//! - `tradegen scenarios` - List the available scenarios

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tradegen_cli::config::DEFAULT_CONFIG_PATH;
use tradegen_cli::prelude::*;

/// Scenario-driven synthetic trade generator
#[derive(Parser)]
#[command(name = "tradegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate trade records for a scenario and write the report
    Generate {
        /// Scenario name (defaults to the configured one)
        #[arg(short, long)]
        scenario: Option<String>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of records
        #[arg(short = 'n', long)]
        num_records: Option<usize>,

        /// Output format (xlsx, csv)
        #[arg(short, long)]
        format: Option<String>,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Generate across all cores
        #[arg(long)]
        parallel: bool,
    },

    /// List available scenarios
    Scenarios,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = AppConfig::load_or_default(&cli.config).map(AppConfig::with_env_override);
    let level = match &loaded {
        _ if cli.verbose => "debug",
        Ok(config) => config.run.log_level.as_str(),
        Err(_) => "info",
    };

    if let Err(e) = init_tracing(level) {
        eprintln!("Failed to initialise logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    let result = loaded
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))
        .and_then(|config| execute(cli.command, config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level.to_lowercase())?,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
    Ok(())
}

fn execute(command: Commands, mut config: AppConfig) -> Result<()> {
    match command {
        Commands::Generate {
            scenario,
            output,
            num_records,
            format,
            seed,
            parallel,
        } => {
            if let Some(scenario) = scenario {
                config.run.scenario = scenario;
            }
            if let Some(output) = output {
                config.run.output_path = output;
            }
            if let Some(num_records) = num_records {
                config.run.num_records = num_records;
            }
            if let Some(format) = format {
                config.run.format = format;
            }
            if seed.is_some() {
                config.run.seed = seed;
            }
            config.run.parallel |= parallel;

            config.validate().context("Invalid run configuration")?;
            let summary = tradegen_cli::pipeline::run(&config)
                .with_context(|| format!("Run for scenario '{}' failed", config.run.scenario))?;

            println!(
                "{} of {} records written to {} ({} flagged for review, {} skipped)",
                summary.generated,
                summary.requested,
                summary.report.path.display(),
                summary.derivation.flagged,
                summary.skipped
            );
            Ok(())
        }
        Commands::Scenarios => {
            let catalog = config.catalog().context("Invalid scenario configuration")?;
            for scenario in catalog.iter() {
                println!(
                    "{:<24} quantity {:<18} statuses {}",
                    scenario.name,
                    scenario.quantity_range.to_string(),
                    scenario.status_distribution
                );
            }
            Ok(())
        }
    }
}
