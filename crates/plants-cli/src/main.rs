//! 30Plants CLI entry point.

use clap::Parser;
use plants_core::{config, PlantService};
use plants_persistence::{open_store, Backend};
use tracing::{debug, error};
use tracing_subscriber::{fmt, EnvFilter};

use plants_cli::cli::Cli;
use plants_cli::commands;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();

    let state_dir = cli.state_dir();

    // The state directory's .env wins over a local one; neither overrides
    // variables already set.
    let _ = dotenvy::from_path(config::env_file(&state_dir));
    let _ = dotenvy::dotenv();

    let action = cli.command.action();
    let service = match open_service(&cli, &state_dir) {
        Ok(service) => service,
        Err(e) => {
            error!(error = %e, state_dir = %state_dir.display(), "failed to open storage");
            eprintln!("Error: could not {}", action);
            std::process::exit(1);
        }
    };

    if let Err(e) = commands::execute(cli.command, &service) {
        error!(error = %e, "command failed");
        eprintln!("Error: could not {}", action);
        std::process::exit(1);
    }
}

fn open_service(
    cli: &Cli,
    state_dir: &std::path::Path,
) -> Result<PlantService, Box<dyn std::error::Error>> {
    let backend = match cli.backend {
        Some(arg) => Backend::from(arg),
        None => config::backend()?,
    };
    config::ensure_state_dir(state_dir)?;
    let store_config = config::store_config(state_dir, backend);
    debug!(backend = %backend, ?store_config, "opening store");
    Ok(PlantService::new(open_store(&store_config)?))
}
