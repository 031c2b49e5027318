//! Broker Pre-Flight - Main Entry Point
//!
//! Probes the configured broker endpoints and reports a pass/fail verdict
//! through the exit code: 0 on success, 1 when every candidate failed, 2 on
//! configuration problems.

use broker_preflight::config::PreflightConfig;
use broker_preflight::observability::init_default_logging;
use broker_preflight::probe::{ConnectivityProbe, ProbeSettings};
use broker_preflight::transport::amqp::AmqpTransport;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

/// Pre-flight connectivity checker for AMQP messaging brokers
#[derive(Parser)]
#[command(name = "broker-preflight")]
#[command(about = "Pre-flight connectivity checker for AMQP messaging brokers")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "PREFLIGHT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the configured broker endpoints and report a verdict
    Check {
        /// Emit the verdict as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging();

    info!(
        "Starting broker pre-flight check v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = match load_configuration(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(2);
        }
    };

    let verdict = match cli.command {
        Commands::Check { json } => run_check(config, json).await,
        Commands::Config { show } => handle_config_command(config, show),
    };

    match verdict {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("Command failed: {}", e);
            process::exit(2);
        }
    }
}

fn load_configuration(
    config_path: &Option<PathBuf>,
) -> Result<PreflightConfig, Box<dyn std::error::Error>> {
    match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Ok(PreflightConfig::load_from_file(path)?)
        }
        None => {
            // Try default locations
            let default_paths = vec!["preflight.toml", "config/preflight.toml"];

            for path_str in default_paths {
                let path = PathBuf::from(path_str);
                if path.exists() {
                    info!("Loading configuration from: {}", path.display());
                    return Ok(PreflightConfig::load_from_file(&path)?);
                }
            }

            Err(
                "No configuration file found. Please provide one with -c/--config or create preflight.toml"
                    .into(),
            )
        }
    }
}

async fn run_check(
    config: PreflightConfig,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let settings = ProbeSettings::from_config(&config)?;
    let transport = AmqpTransport::new(&config.transport);
    let probe = ConnectivityProbe::new(transport, settings);

    let result = probe.run().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(result.success)
}

fn handle_config_command(
    config: PreflightConfig,
    show: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    if show {
        println!("Current configuration:");
        println!("{}", toml::to_string_pretty(&config)?);
    }

    info!("Configuration validation complete");
    Ok(true)
}
