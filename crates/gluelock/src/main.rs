mod cli;
mod commands;
mod config;
mod error;
mod host;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The daemon logs state changes at info level by default.
    let daemon = matches!(cli.command, Command::Run);
    init_tracing(cli.global.verbose, daemon);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, daemon: bool) {
    let filter = match (verbosity, daemon) {
        (0, false) => "warn",
        (0, true) | (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need credentials
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        cmd => {
            let accessory = config::build_accessory(&cli.global, matches!(cmd, Command::Run))?;
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &accessory, &cli.global).await
        }
    }
}
