#![allow(dead_code)]

use anyhow::Result;
use confglob::IncludeError;
use confglob::resolver::PatternResolver;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory tree for integration tests
pub struct Fixture {
    pub temp_dir: TempDir,
}

impl Fixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Get the temporary directory path
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `rel`, creating parent directories
    pub fn file(&self, rel: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Absolute pattern for `rel`
    pub fn pattern(&self, rel: &str) -> String {
        format!("{}/{rel}", self.path().display())
    }

    /// Settings file pointing `include.prefix` at the fixture root
    pub fn settings(&self) -> Result<PathBuf> {
        self.file(
            "settings.toml",
            &format!("[include]\nprefix = {:?}\n", self.path().display().to_string()),
        )
    }
}

/// Resolve `pattern` and collect every reported file
pub fn resolve_all(pattern: &str) -> Result<Vec<PathBuf>, IncludeError> {
    let mut matches = Vec::new();
    PatternResolver::new().resolve(pattern, &mut |path: &Path| {
        matches.push(path.to_path_buf());
        Ok(())
    })?;
    Ok(matches)
}
