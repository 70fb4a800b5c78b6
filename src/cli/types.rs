//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::{lookup::LookupArgs, serve::ServeArgs};

#[derive(Parser, Debug)]
#[command(name = "profile-lookup")]
#[command(about = "Resolve customer profiles through the Profile Connector", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./profile-lookup.yaml when present)
    #[arg(short, long, global = true, env = "PROFILE_LOOKUP_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a single profile by phone or email
    Lookup(LookupArgs),

    /// Serve lookups over HTTP
    Serve(ServeArgs),
}
