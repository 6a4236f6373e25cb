//! Fleet rental service
//!
//! ```sh
//! # Run with the default config (~/.config/fleet-rental/config.toml)
//! fleet-rental
//!
//! # Custom config path and port
//! fleet-rental --config /etc/fleet-rental/config.toml --port 9090
//!
//! # Validate the config without starting
//! fleet-rental --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use fleet_rental::config::AppConfig;
use fleet_rental::default_config_path;
use fleet_rental::server::{init_tracing, ServerHandle, ServerOptions};

/// Vehicle rental backend: reservations, payments, refunds, damage reports.
#[derive(Parser, Debug)]
#[command(name = "fleet-rental", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "RENTAL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let loaded = AppConfig::load(&config_path);

    if cli.check {
        return match loaded {
            Ok(_) => {
                println!("Configuration OK: {}", config_path.display());
                Ok(())
            }
            Err(e) => {
                eprintln!("Invalid configuration {}: {}", config_path.display(), e);
                std::process::exit(1);
            }
        };
    }

    let mut config = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!(
                "Failed to load config from {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            AppConfig::default()
        }
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_tracing(&config);
    info!("Configuration: {}", config_path.display());
    info!("Database: {}", config.database.url);

    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start: {}", e);
            return Err(e.into());
        }
    };

    handle.install_signal_handler();
    handle.wait().await;
    Ok(())
}
