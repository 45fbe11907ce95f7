use anyhow::Result;
use colored::Colorize;
use std::collections::HashSet;
use std::path::Path;

/// Flags settings fields that confglob does not recognize
pub struct SettingsValidator {
    /// Set of fields recognized by confglob, as `section.key`
    known_fields: HashSet<&'static str>,
}

impl SettingsValidator {
    /// Create a new validator with the known settings fields
    #[must_use]
    pub fn new() -> Self {
        let known_fields = [
            "include",
            "include.prefix",
            "include.max_depth",
            "include.sort_entries",
            "include.follow_symlinks",
            "log",
            "log.level",
        ]
        .into_iter()
        .collect();

        Self { known_fields }
    }

    /// Validate a settings file and print a warning per unknown field
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be read or parsed
    pub fn validate_settings_file(&self, path: &Path) -> Result<()> {
        let unknown = self.unknown_fields(path)?;

        if !unknown.is_empty() {
            eprintln!("{}", "Settings warnings:".yellow().bold());
            for field in &unknown {
                eprintln!("  Unknown settings field: {}", field.yellow());
            }
            eprintln!();
        }

        Ok(())
    }

    /// Returns the dotted names of every unknown field, in file order
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be read or parsed
    pub fn unknown_fields(&self, path: &Path) -> Result<Vec<String>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(path)?;
        let parsed: toml::Value = toml::from_str(&content)?;

        let mut unknown = Vec::new();
        self.check_table(&parsed, "", &mut unknown);
        Ok(unknown)
    }

    /// Recursively checks a TOML table for unknown fields
    fn check_table(&self, table: &toml::Value, prefix: &str, unknown: &mut Vec<String>) {
        let toml::Value::Table(map) = table else {
            return;
        };

        for (key, value) in map {
            let full_key = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };

            if !self.known_fields.contains(full_key.as_str()) {
                unknown.push(full_key);
            } else if let toml::Value::Table(_) = value {
                self.check_table(value, &full_key, unknown);
            }
        }
    }
}

impl Default for SettingsValidator {
    fn default() -> Self {
        Self::new()
    }
}
