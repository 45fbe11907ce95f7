//! Enumeration of files matching an include pattern.
//!
//! Two strategies are offered and the caller picks one:
//!
//! - [`PatternResolver::resolve_single`] hands the whole pattern to the glob
//!   matcher. Used when the wildcards sit in the final path segment.
//! - [`PatternResolver::resolve_tree`] splits the pattern, walks the
//!   wildcard-free root with [`TreeWalker`], and globs the final segment inside
//!   every directory whose path matches the intermediate segments.
//!
//! Matches are reported through an `on_match` callback as they are found, so a
//! failing callback stops the enumeration immediately.

use crate::config::IncludeSettings;
use crate::error::IncludeError;
use crate::pattern::{self, PatternKind};
use crate::walker::{TreeHandler, TreeWalker, Visit, WalkEntry};
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Component, Path};
use tracing::{Level, debug, span};

/// Callback invoked once per matched file.
pub type OnMatch<'a> = dyn FnMut(&Path) -> Result<(), IncludeError> + 'a;

/// POSIX `glob(3)` semantics: wildcards never cross `/` and never match a leading dot.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Options handed to `glob_with`. Leading dots are filtered by [`hidden_match`]
/// instead, since the matcher's own check panics on names that are not UTF-8.
const GLOB_OPTIONS: MatchOptions = MatchOptions {
    require_literal_leading_dot: false,
    ..MATCH_OPTIONS
};

/// Resolves glob patterns to files.
#[derive(Debug, Clone, Copy)]
pub struct PatternResolver {
    /// Visit directories in lexicographic order during tree walks
    sort_entries: bool,
    /// Follow symlinked directories during tree walks
    follow_symlinks: bool,
}

impl Default for PatternResolver {
    fn default() -> Self {
        Self {
            sort_entries: true,
            follow_symlinks: false,
        }
    }
}

impl PatternResolver {
    /// Creates a resolver with sorted traversal and symlinks left unfollowed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver configured from the `[include]` settings table.
    #[must_use]
    pub const fn from_settings(settings: &IncludeSettings) -> Self {
        Self {
            sort_entries: settings.sort_entries,
            follow_symlinks: settings.follow_symlinks,
        }
    }

    /// Resolves `pattern` with the strategy its shape calls for.
    ///
    /// Literal patterns are reported as-is when they name an existing file.
    ///
    /// # Errors
    ///
    /// Propagates the errors of the selected strategy and of `on_match`.
    pub fn resolve(&self, pattern: &str, on_match: &mut OnMatch<'_>) -> Result<(), IncludeError> {
        match PatternKind::of(pattern) {
            PatternKind::Literal => {
                let path = Path::new(pattern);
                if path.is_file() {
                    on_match(path)?;
                }
                Ok(())
            }
            PatternKind::SingleGlob => self.resolve_single(pattern, on_match),
            PatternKind::TreeWalk => self.resolve_tree(pattern, on_match),
        }
    }

    /// Matches `pattern` with a single glob and reports every matched file.
    ///
    /// Directory matches are skipped. Matching nothing is not an error.
    ///
    /// # Errors
    ///
    /// Returns `GlobOpenFailed` if the pattern is malformed or a directory
    /// cannot be read while matching, and the first error from `on_match`.
    pub fn resolve_single(
        &self,
        pattern: &str,
        on_match: &mut OnMatch<'_>,
    ) -> Result<(), IncludeError> {
        let paths = glob::glob_with(pattern, GLOB_OPTIONS)
            .map_err(|err| IncludeError::invalid_pattern(pattern, &err))?;

        let mut matched = 0usize;
        for entry in paths {
            let path = entry.map_err(|err| IncludeError::glob_read(pattern, err))?;

            if hidden_match(pattern, &path) {
                debug!(path = %path.display(), "skipping hidden match");
                continue;
            }
            if path.is_dir() {
                debug!(path = %path.display(), "skipping directory match");
                continue;
            }

            debug!(path = %path.display(), "include");
            matched += 1;
            on_match(&path)?;
        }

        if matched == 0 {
            debug!(pattern, "pattern matched no files");
        }
        Ok(())
    }

    /// Matches `pattern` by walking the tree below its wildcard-free root.
    ///
    /// Directory segments of the leaf are matched one level at a time; the
    /// final segment is globbed inside every directory that matches them all.
    ///
    /// # Errors
    ///
    /// Returns `WalkOpenFailed` if a directory on the way cannot be opened,
    /// `GlobOpenFailed` for malformed segments or failing globs, and the first
    /// error from `on_match`.
    pub fn resolve_tree(
        &self,
        pattern: &str,
        on_match: &mut OnMatch<'_>,
    ) -> Result<(), IncludeError> {
        let span = span!(Level::DEBUG, "resolve_tree", pattern);
        let _guard = span.enter();

        let split = pattern::split(pattern);
        let (segments, file_pattern) = split.leaf_parts();

        if file_pattern.is_empty() {
            debug!("pattern names directories only, nothing to include");
            return Ok(());
        }

        let segments = segments
            .into_iter()
            .map(|segment| {
                Pattern::new(segment).map_err(|err| IncludeError::invalid_pattern(pattern, &err))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let root = if split.root.is_empty() {
            Path::new(".")
        } else {
            Path::new(split.root)
        };
        debug!(root = %root.display(), leaf = split.leaf, "walking include tree");

        let walker = TreeWalker::new()
            .max_depth(segments.len())
            .sort_entries(self.sort_entries)
            .follow_symlinks(self.follow_symlinks);

        let mut handler = LeafHandler {
            resolver: *self,
            segments,
            file_pattern,
            on_match,
        };
        walker.walk(root, &mut handler)
    }
}

/// Tree hook that applies the final pattern segment inside matching directories.
struct LeafHandler<'p, 'm, 'c> {
    /// Resolver used for the per-directory glob
    resolver: PatternResolver,
    /// One compiled pattern per directory level below the root
    segments: Vec<Pattern>,
    /// Final segment, globbed inside every fully matched directory
    file_pattern: &'p str,
    /// Receives every matched file
    on_match: &'m mut OnMatch<'c>,
}

impl LeafHandler<'_, '_, '_> {
    /// Globs `file_pattern` inside `dir`.
    fn include_from(&mut self, dir: &Path) -> Result<(), IncludeError> {
        let Some(dir) = dir.to_str() else {
            return Err(IncludeError::non_utf8_directory(dir));
        };

        let mut candidate = Pattern::escape(dir);
        if !candidate.ends_with('/') {
            candidate.push('/');
        }
        candidate.push_str(self.file_pattern);

        self.resolver.resolve_single(&candidate, self.on_match)
    }
}

impl TreeHandler for LeafHandler<'_, '_, '_> {
    fn pre_directory(&mut self, entry: &WalkEntry<'_>) -> Result<Visit, IncludeError> {
        if entry.depth > 0 {
            let matches = entry.name.to_str().is_some_and(|name| {
                self.segments
                    .get(entry.depth - 1)
                    .is_some_and(|segment| segment.matches_with(name, MATCH_OPTIONS))
            });
            if !matches {
                return Ok(Visit::Skip);
            }
        }

        if entry.depth == self.segments.len() {
            // the walker stops above this level, so nothing has opened it yet
            fs::read_dir(entry.path).map_err(|err| IncludeError::walk_open(entry.path, err))?;
            self.include_from(entry.path)?;
            return Ok(Visit::Skip);
        }

        Ok(Visit::Descend)
    }
}

/// Whether a dot-prefixed name in `path` was matched by a pattern component
/// that does not itself start with a dot.
fn hidden_match(pattern: &str, path: &Path) -> bool {
    Path::new(pattern)
        .components()
        .rev()
        .zip(path.components().rev())
        .any(|pair| match pair {
            (Component::Normal(segment), Component::Normal(name)) => {
                name.as_encoded_bytes().first() == Some(&b'.')
                    && segment.as_encoded_bytes().first() != Some(&b'.')
            }
            _ => false,
        })
}
