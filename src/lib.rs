#![warn(missing_docs)]
// Allow pedantic strict lints that create false positives in this codebase
#![allow(clippy::arithmetic_side_effects)] // Depth and line counters cannot overflow
#![allow(clippy::indexing_slicing)] // Bounds checked by logic

//! # confglob - recursive, glob-driven configuration includes
//!
//! confglob parses block-structured configuration files (`name args;` and
//! `name args { ... }`) and expands include directives whose argument is a
//! glob pattern, including patterns with wildcards in directory segments such
//! as `sites/*/conf.d/*.conf`.
//!
//! ## Architecture
//!
//! - [`pattern`]: classifies patterns and splits them into a literal root and a leaf
//! - [`walker`]: callback-driven directory traversal
//! - [`resolver`]: enumerates the files a pattern matches
//! - [`include`]: the `include` and `recursive_include` directive handlers
//! - [`conf`]: lexer, parser and directive table for configuration files
//! - [`config`]: confglob's own settings
//! - [`output`]: colored, verbosity-aware terminal output
//!
//! ## Example Usage
//!
//! ```no_run
//! use confglob::ConfglobContext;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let ctx = ConfglobContext::new(None)?;
//! let tree = confglob::conf::load(Path::new("/etc/app/main.conf"), &ctx.settings.include)?;
//! println!("{tree}");
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Command implementations for the CLI.
pub mod commands;

/// Configuration file parsing with include splicing.
pub mod conf;

/// confglob settings parsing and validation.
pub mod config;

/// Error type for include resolution.
pub mod error;

/// Include directive handlers.
pub mod include;

/// Output formatting and verbosity control.
pub mod output;

/// Pattern classification and splitting.
pub mod pattern;

/// Pattern resolution to matching files.
pub mod resolver;


/// Utility functions and helpers.
pub mod utils;

/// Directory tree traversal.
pub mod walker;

pub use error::IncludeError;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Current version of the confglob binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default settings file path relative to the home directory.
pub const DEFAULT_SETTINGS_PATH: &str = ".config/confglob/settings.toml";

/// Environment variable overriding the settings file path.
pub const SETTINGS_ENV: &str = "CONFGLOB_SETTINGS";

/// Loaded settings and where they came from.
#[derive(Debug, Clone)]
pub struct ConfglobContext {
    /// Path to the settings file, which may not exist.
    pub settings_path: PathBuf,

    /// Loaded settings.
    pub settings: config::Settings,
}

impl ConfglobContext {
    /// Loads settings from `path`, or from `CONFGLOB_SETTINGS`, or from the
    /// default location under the home directory, in that order.
    ///
    /// # Errors
    /// Returns an error if the home directory is needed but cannot be
    /// determined, or if the settings file cannot be read or parsed.
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let settings_path = match path {
            Some(path) => path,
            None => match std::env::var_os(SETTINGS_ENV) {
                Some(path) => PathBuf::from(path),
                None => {
                    let home = dirs::home_dir().context("Could not find home directory")?;
                    home.join(DEFAULT_SETTINGS_PATH)
                }
            },
        };

        let validator = config::validator::SettingsValidator::new();
        if let Err(e) = validator.validate_settings_file(&settings_path) {
            output::warning(&format!("Warning: Settings validation failed: {e}"));
        }

        Self::new_explicit(settings_path)
    }

    /// Loads settings from exactly `settings_path` without validation warnings.
    ///
    /// # Errors
    /// Returns an error if the settings file exists but cannot be read or parsed.
    pub fn new_explicit(settings_path: PathBuf) -> Result<Self> {
        let settings = config::Settings::load(&settings_path).with_context(|| {
            format!(
                "Failed to load settings from {}",
                settings_path.display()
            )
        })?;

        Ok(Self {
            settings_path,
            settings,
        })
    }
}
