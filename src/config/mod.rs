pub mod parser;
pub mod validator;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Log levels accepted by `log.level`.
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// How include directives are resolved
    #[serde(default)]
    pub include: IncludeSettings,

    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncludeSettings {
    /// Directory relative include paths are resolved against.
    /// Defaults to the directory of the root configuration file.
    #[serde(default)]
    pub prefix: Option<PathBuf>,
    /// Maximum include nesting depth; unlimited when unset
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default = "default_sort_entries")]
    pub sort_entries: bool,
    #[serde(default)]
    pub follow_symlinks: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for IncludeSettings {
    fn default() -> Self {
        Self {
            prefix: None,
            max_depth: None,
            sort_entries: default_sort_entries(),
            follow_symlinks: false,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from a file, falling back to defaults when it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file contains invalid TOML
    /// - A value is out of range
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        parser::parse_settings_file(path)
    }
}

const fn default_sort_entries() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let settings = Settings::load(&dir.path().join("absent.toml"))?;

        assert!(settings.include.sort_entries);
        assert!(!settings.include.follow_symlinks);
        assert_eq!(settings.include.max_depth, None);
        assert_eq!(settings.log.level, "warn");
        Ok(())
    }
}
