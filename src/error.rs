//! Error type shared by pattern resolution, tree walking and include handling.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Failure raised while resolving or parsing an included pattern.
///
/// Every variant carries the offending path so that a diagnostic can always
/// point at a concrete file or directory. Nested includes chain through
/// [`Error::source`], which lets `{:#}` formatting walk from the outermost
/// include down to the deepest failure.
#[derive(Debug)]
pub enum IncludeError {
    /// The glob pattern is malformed, or a directory could not be read while matching it.
    GlobOpenFailed {
        /// Pattern handed to the glob matcher
        pattern: String,
        /// Underlying failure
        source: io::Error,
    },
    /// A directory could not be opened during tree traversal.
    WalkOpenFailed {
        /// Directory (or walk root) that failed to open
        path: PathBuf,
        /// Underlying failure
        source: io::Error,
    },
    /// The parser rejected, or could not read, a matched file.
    ParseFailed {
        /// File being parsed
        path: PathBuf,
        /// Parser failure, possibly wrapping a nested include error
        source: anyhow::Error,
    },
    /// The include argument could not be turned into an absolute path.
    PathResolutionFailed {
        /// Raw directive argument
        path: String,
        /// Underlying failure
        source: io::Error,
    },
}

impl IncludeError {
    /// Builds a `GlobOpenFailed` error for a pattern the matcher refused to compile.
    #[must_use]
    pub fn invalid_pattern(pattern: &str, error: &glob::PatternError) -> Self {
        Self::GlobOpenFailed {
            pattern: pattern.to_string(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} at position {}", error.msg, error.pos),
            ),
        }
    }

    /// Builds a `GlobOpenFailed` error from a failure reported mid-iteration.
    #[must_use]
    pub fn glob_read(pattern: &str, error: glob::GlobError) -> Self {
        let path = error.path().display().to_string();
        let source = error.into_error();
        Self::GlobOpenFailed {
            pattern: pattern.to_string(),
            source: io::Error::new(source.kind(), format!("{path}: {source}")),
        }
    }

    /// Builds a `GlobOpenFailed` error for a directory that cannot be spelled as a pattern.
    #[must_use]
    pub fn non_utf8_directory(dir: &Path) -> Self {
        Self::GlobOpenFailed {
            pattern: dir.display().to_string(),
            source: not_utf8(dir),
        }
    }

    /// Builds a `WalkOpenFailed` error.
    #[must_use]
    pub fn walk_open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WalkOpenFailed {
            path: path.into(),
            source,
        }
    }

    /// Builds a `ParseFailed` error.
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        Self::ParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Builds a `PathResolutionFailed` error.
    #[must_use]
    pub fn path_resolution(path: &str, source: io::Error) -> Self {
        Self::PathResolutionFailed {
            path: path.to_string(),
            source,
        }
    }

    /// Returns the path or pattern the failure is about.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::GlobOpenFailed { pattern, .. } => Path::new(pattern),
            Self::WalkOpenFailed { path, .. } | Self::ParseFailed { path, .. } => path,
            Self::PathResolutionFailed { path, .. } => Path::new(path),
        }
    }

    /// Short, stable name of the variant, used in logs.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::GlobOpenFailed { .. } => "glob_open_failed",
            Self::WalkOpenFailed { .. } => "walk_open_failed",
            Self::ParseFailed { .. } => "parse_failed",
            Self::PathResolutionFailed { .. } => "path_resolution_failed",
        }
    }
}

/// I/O error for a path that has no UTF-8 spelling.
pub(crate) fn not_utf8(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("\"{}\" is not valid UTF-8", path.display()),
    )
}

impl fmt::Display for IncludeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlobOpenFailed { pattern, .. } => {
                write!(f, "failed to open glob \"{pattern}\"")
            }
            Self::WalkOpenFailed { path, .. } => {
                write!(f, "failed to open directory \"{}\"", path.display())
            }
            Self::ParseFailed { path, .. } => {
                write!(f, "failed to parse \"{}\"", path.display())
            }
            Self::PathResolutionFailed { path, .. } => {
                write!(f, "failed to resolve include path \"{path}\"")
            }
        }
    }
}

impl Error for IncludeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::GlobOpenFailed { source, .. }
            | Self::WalkOpenFailed { source, .. }
            | Self::PathResolutionFailed { source, .. } => Some(source),
            Self::ParseFailed { source, .. } => Some(&**source),
        }
    }
}
