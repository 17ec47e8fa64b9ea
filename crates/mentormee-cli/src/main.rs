//! # mentormee
//!
//! Command-line driver for the MentorMee core.  Every command opens the local
//! database, performs one operation and prints the result as JSON on stdout.
//! Logs go to stderr and respect `RUST_LOG`.
//!
//! Commands that act on behalf of a user (posting, befriending, following)
//! use the identity recovered from the session token written by `login`.

mod cli;

use std::path::PathBuf;

use clap::Parser;
use mentormee_core::{Core, CoreConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::Command;

#[derive(Debug, Parser)]
#[command(name = "mentormee")]
#[command(about = "Local accounts, posts and social graph for MentorMee")]
#[command(version)]
struct Cli {
    /// Directory holding the database and session token
    #[arg(short, long, env = "MENTORMEE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,mentormee_cli=debug,mentormee_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = CoreConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    debug!(?config, "Loaded configuration");

    let mut core = Core::open(&config)?;
    cli::run(&mut core, cli.command)
}
