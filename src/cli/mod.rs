//! CLI module for the Team Vault API

pub mod serve;

use clap::{Parser, Subcommand};

/// Team Vault - encrypted, team-scoped storage for shared API keys
#[derive(Parser)]
#[command(name = "team-vault")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
