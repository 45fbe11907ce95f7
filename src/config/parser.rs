use super::{LOG_LEVELS, Settings};
use anyhow::{Context, Result};
use memmap2::MmapOptions;
use std::fs::File;
use std::path::Path;

/// Files at or above this size are memory-mapped instead of read.
const MMAP_THRESHOLD: u64 = 4096;

pub fn parse_settings_file(path: &Path) -> Result<Settings> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat settings file: {}", path.display()))?;

    if metadata.len() < MMAP_THRESHOLD {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        parse_settings_str(&content)
    } else {
        let file = File::open(path)?;
        // SAFETY: the mapping is read-only and dropped before this function returns.
        let mmap = unsafe { MmapOptions::new().map(&file)? };

        let content = simdutf8::basic::from_utf8(&mmap)
            .map_err(|e| anyhow::anyhow!("Invalid UTF-8 in settings file: {e}"))?;

        parse_settings_str(content)
    }
}

pub fn parse_settings_str(content: &str) -> Result<Settings> {
    let settings: Settings =
        toml::from_str(content).with_context(|| "Failed to parse TOML settings")?;

    validate_settings(&settings)?;
    Ok(settings)
}

fn validate_settings(settings: &Settings) -> Result<()> {
    if !LOG_LEVELS.contains(&settings.log.level.as_str()) {
        anyhow::bail!(
            "Invalid log level '{}': expected one of {}",
            settings.log.level,
            LOG_LEVELS.join(", ")
        );
    }

    if let Some(prefix) = &settings.include.prefix
        && prefix.as_os_str().is_empty()
    {
        anyhow::bail!("include.prefix must not be empty");
    }

    Ok(())
}
