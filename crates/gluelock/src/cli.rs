//! Clap derive structures for the `gluelock` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// gluelock -- drive a Glue smart lock from the command line
#[derive(Debug, Parser)]
#[command(
    name = "gluelock",
    version,
    about = "Control and monitor Glue smart locks",
    long_about = "Bridges a Glue smart lock to a home-automation host.\n\n\
        Polls the Glue cloud API for lock events and battery level, and\n\
        turns lock/unlock requests into hub commands.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the config file
    #[arg(long, env = "GLUE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Hub id (overrides config)
    #[arg(long, global = true)]
    pub hub_id: Option<String>,

    /// Lock id (overrides config)
    #[arg(long, global = true)]
    pub lock_id: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "plain", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Plain,
    /// Pretty-printed JSON
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the accessory until interrupted, logging every state change
    Run,

    /// List hubs and the locks attached to them
    Hubs,

    /// Show lock state and battery level
    Status,

    /// Lock the door
    Lock,

    /// Unlock the door
    Unlock,

    /// List the event-type catalog
    #[command(name = "event-types")]
    EventTypes,

    /// Inspect or create the config file
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Print the effective settings (password redacted)
    Show,

    /// Write a config file
    Init {
        #[arg(long)]
        username: String,

        /// Poll interval in seconds
        #[arg(long)]
        check_for_events_interval: Option<u64>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
