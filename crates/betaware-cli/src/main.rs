//! BetAware CLI - record bets and review history from the terminal
//!
//! Works against the BetAware API when it is reachable and falls back to the
//! on-device mirror when it is not.

mod cli;
mod commands;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, GlobalArgs};
use crate::commands::auth_cmd::{run_login, run_logout, run_register};
use crate::commands::bet::run_bet;
use crate::commands::catalog::run_catalog;
use crate::commands::common::{open_gateway, resolve_config};
use crate::commands::completions::run_completions;
use crate::commands::face::run_face;
use crate::commands::report::run_report;
use crate::commands::status::run_status;
use crate::error::CliError;

const DEFAULT_LOG_DIRECTIVE: &str = "betaware=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog => run_catalog(),
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
        Commands::Face { command } => {
            let config = resolve_config(&cli.global)?;
            run_face(&config, command).await?;
        }
        command => run_with_gateway(command, &cli.global).await?,
    }

    Ok(())
}

async fn run_with_gateway(command: Commands, global: &GlobalArgs) -> Result<(), CliError> {
    let config = resolve_config(global)?;
    let gateway = open_gateway(&config, global.offline).await?;

    match command {
        Commands::Login { username, password } => run_login(&gateway, &username, password).await?,
        Commands::Register(args) => run_register(&gateway, args).await?,
        Commands::Logout => run_logout(&gateway).await,
        Commands::Status { watch } => {
            let watch = watch && !global.offline;
            run_status(&gateway, watch, config.health_check_interval()).await?;
        }
        Commands::Bet { command } => run_bet(&gateway, command).await?,
        Commands::Report { last_days, json } => run_report(&gateway, last_days, json).await?,
        Commands::Catalog | Commands::Completions { .. } | Commands::Face { .. } => {}
    }

    Ok(())
}
