//! fcserve: HTTP front-end for headless FreeCAD
//!
//! Main entry point that loads configuration, sets up logging and starts
//! the server.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use fcserve_core::config::AppConfig;
use fcserve_core::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "fcserve-server",
    about = "Serve FreeCAD model inspection and export over HTTP",
    version
)]
struct Cli {
    /// Configuration file layered over `config/default.toml`
    #[arg(short, long, env = "FCSERVE_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address
    #[arg(long)]
    host: Option<String>,

    /// Listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding the model files
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// FreeCAD command-line executable
    #[arg(long)]
    engine: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = fcserve_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment, then apply CLI overrides
fn load_configuration(cli: &Cli) -> Result<AppConfig, AppError> {
    let env = std::env::var("FCSERVE_ENV").unwrap_or_else(|_| "development".to_string());

    let mut config = AppConfig::load(&env, cli.config.as_deref())?;

    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(dir) = &cli.models_dir {
        config.catalog.directory = dir.clone();
    }
    if let Some(engine) = &cli.engine {
        config.engine.executable = engine.clone();
    }

    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
