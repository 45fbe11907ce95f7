//! Command-line interface definitions for confglob.
//!
//! The CLI definitions are shared between the main binary and build tools
//! (like xtask) for man page generation.
//!
//! Note: Field-level documentation is provided via clap attributes, so we allow
//! missing_docs for this module to avoid redundant documentation.

#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for confglob.
#[derive(Parser)]
#[command(
    name = "confglob",
    version = crate::VERSION,
    about = "Resolve glob-driven configuration includes",
    long_about = "Parses block-structured configuration files and expands include \
                  directives, including patterns with wildcards in directory segments"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Settings file to use instead of the default
    #[arg(long, global = true, env = "CONFGLOB_SETTINGS", value_name = "PATH")]
    pub settings: Option<PathBuf>,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a configuration file and every file it includes
    Check {
        /// Root configuration file
        file: PathBuf,
    },

    /// List the files a recursive include pattern would parse
    Resolve {
        /// Include pattern, e.g. "sites/*/site.conf"
        pattern: String,
    },

    /// Print a configuration with every include spliced in place
    Dump {
        /// Root configuration file
        file: PathBuf,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
