//! CLI module for typed-cache
//!
//! Provides subcommands for operating a cache deployment:
//! - `check`: register the server pool and round-trip a value
//! - `config`: print the resolved settings

pub mod check;
pub mod settings;

use clap::{Parser, Subcommand};

/// typed-cache - typed object caching over a server pool
#[derive(Parser)]
#[command(name = "typed-cache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Connect to the configured servers and verify a write/read round trip
    Check(check::CheckArgs),

    /// Print the resolved configuration as JSON
    Config,
}
