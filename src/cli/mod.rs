//! CLI module - Command-line interface for the utility API
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

pub use commands::{cmd_check_config, cmd_init};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Utility API - time, primality and picture inversion over HTTP
#[derive(Parser, Debug)]
#[command(name = "utility-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file, overrides the default search locations
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Create default config file
    Init,

    /// Load and validate the config, then print the user directory
    CheckConfig,
}
