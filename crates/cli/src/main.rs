//! fwpatch: firmware update patch manifest creator.
//!
//! Builds a JSON patch manifest (file adds/removes, embedded commands and
//! scripts, default-value edits) plus a best-effort restore manifest, for a
//! device-side applier to consume.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;
mod prompts;

use cmd::{CreateArgs, DefaultsCommand, cmd_create, cmd_defaults};

/// Firmware update patch manifest creator
#[derive(Parser)]
#[command(name = "fwpatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Create or update a patch manifest and its restore manifest
  Create(CreateArgs),

  /// Compare and restore device default values
  Defaults {
    #[command(subcommand)]
    command: DefaultsCommand,
  },
}

fn main() -> Result<()> {
  // Initialize logging
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Create(args) => cmd_create(args),
    Commands::Defaults { command } => cmd_defaults(command),
  }
}
