//! CLI entry point.
//!
//! Commands that need `AppCore` go through `bootstrap`; `serve` hands the
//! settings to the web server, which runs its own composition root.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use petpal_cli::handlers::{self, places::PlacesArgs, serve::ServeArgs};
use petpal_cli::{Cli, CliConfig, CliError, Commands, bootstrap};
use petpal_core::Coordinate;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides the verbosity flag
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::from_env()?;

    if let Commands::Serve {
        port,
        static_dir,
        api_only,
    } = command
    {
        let args = ServeArgs {
            port,
            static_dir,
            api_only,
        };
        return handlers::serve::execute(config.settings, args).await;
    }

    if let Commands::Categories { species } = &command {
        return handlers::categories::execute(species);
    }

    // Bootstrap the CLI context (composition root)
    let ctx = bootstrap(&config).map_err(|e| CliError::Config(format!("{e:#}")))?;

    match command {
        Commands::Pets => handlers::pets::execute(&ctx).await,
        Commands::Ask { pet, symptoms } => handlers::ask::execute(&ctx, pet, &symptoms).await,
        Commands::Places {
            pet,
            category,
            lat,
            lng,
        } => {
            let position = lat.zip(lng).map(|(lat, lng)| Coordinate::new(lat, lng));
            if position.is_some_and(|p| !p.is_valid()) {
                return Err(CliError::Arguments(
                    "Coordinates out of range (lat -90..90, lng -180..180)".to_string(),
                ));
            }
            let args = PlacesArgs {
                pet,
                category,
                position,
            };
            handlers::places::execute(&ctx, args).await
        }
        Commands::Serve { .. } | Commands::Categories { .. } => Ok(()),
    }
}
