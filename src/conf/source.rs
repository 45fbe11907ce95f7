use anyhow::{Context, Result};
use memmap2::MmapOptions;
use std::fs::File;
use std::path::Path;

/// Configuration files at or above this size are memory-mapped.
pub const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Reads a configuration file as UTF-8 text.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not valid UTF-8
pub fn read_source(path: &Path) -> Result<String> {
    let metadata =
        std::fs::metadata(path).with_context(|| format!("failed to stat \"{}\"", path.display()))?;

    if metadata.is_dir() {
        anyhow::bail!("\"{}\" is a directory", path.display());
    }

    if metadata.len() < MMAP_THRESHOLD {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read \"{}\"", path.display()));
    }

    let file =
        File::open(path).with_context(|| format!("failed to open \"{}\"", path.display()))?;
    // SAFETY: the mapping is read-only and copied out before it is dropped.
    let mmap = unsafe { MmapOptions::new().map(&file) }
        .with_context(|| format!("failed to map \"{}\"", path.display()))?;

    let content = simdutf8::basic::from_utf8(&mmap)
        .map_err(|e| anyhow::anyhow!("invalid UTF-8 in \"{}\": {e}", path.display()))?;

    Ok(content.to_string())
}
