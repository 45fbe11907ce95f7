//! Handlers for the `include` and `recursive_include` directives.
//!
//! Both handlers are written against [`ConfContext`], the slice of a
//! configuration parser they need: turning a directive argument into an
//! absolute path, and parsing a file in place. The parser in turn calls back
//! into these handlers when an included file contains further includes, so
//! inclusion recurses through the parser.

use crate::error::{IncludeError, not_utf8};
use crate::pattern::PatternKind;
use crate::resolver::PatternResolver;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What an include handler needs from the enclosing configuration parser.
pub trait ConfContext {
    /// Resolves a directive argument to an absolute path.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument cannot be made absolute.
    fn full_name(&self, name: &str) -> io::Result<PathBuf>;

    /// Parses `path` as if its content appeared at the current position.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    fn parse_file(&mut self, path: &Path) -> anyhow::Result<()>;

    /// Resolver used to enumerate wildcard matches.
    fn resolver(&self) -> PatternResolver {
        PatternResolver::default()
    }
}

/// Handles `recursive_include <pattern>`.
///
/// A literal path is parsed once. Wildcards confined to the final segment are
/// matched with a single glob; wildcards in directory segments walk the tree
/// below the pattern's wildcard-free root. Every match is parsed in
/// enumeration order and the first failure aborts the include.
///
/// # Errors
///
/// Returns `PathResolutionFailed`, `GlobOpenFailed`, `WalkOpenFailed` or
/// `ParseFailed`; nothing after the failing step is attempted.
pub fn recursive_include<C: ConfContext>(cf: &mut C, name: &str) -> Result<(), IncludeError> {
    debug!(name, "recursive_include");

    let file = cf
        .full_name(name)
        .map_err(|source| IncludeError::path_resolution(name, source))?;

    let Some(pattern) = file.to_str() else {
        return parse_unmatchable(cf, name, &file);
    };

    match PatternKind::of(pattern) {
        PatternKind::Literal => parse_one(cf, &file),
        PatternKind::SingleGlob => {
            let resolver = cf.resolver();
            resolver.resolve_single(pattern, &mut |path: &Path| parse_one(cf, path))
        }
        PatternKind::TreeWalk => {
            let resolver = cf.resolver();
            resolver.resolve_tree(pattern, &mut |path: &Path| parse_one(cf, path))
        }
    }
}

/// Handles the plain `include <pattern>` directive.
///
/// Like [`recursive_include`] for literal paths; any wildcard pattern goes to
/// the glob matcher as a whole, without a tree walk.
///
/// # Errors
///
/// Returns `PathResolutionFailed`, `GlobOpenFailed` or `ParseFailed`.
pub fn include<C: ConfContext>(cf: &mut C, name: &str) -> Result<(), IncludeError> {
    debug!(name, "include");

    let file = cf
        .full_name(name)
        .map_err(|source| IncludeError::path_resolution(name, source))?;

    let Some(pattern) = file.to_str() else {
        return parse_unmatchable(cf, name, &file);
    };

    if PatternKind::of(pattern) == PatternKind::Literal {
        return parse_one(cf, &file);
    }
    let resolver = cf.resolver();
    resolver.resolve_single(pattern, &mut |path: &Path| parse_one(cf, path))
}

/// Handles a resolved path that is not valid UTF-8 and so cannot be globbed.
///
/// A literal argument still names exactly one file; a wildcard argument fails.
fn parse_unmatchable<C: ConfContext>(
    cf: &mut C,
    name: &str,
    file: &Path,
) -> Result<(), IncludeError> {
    if PatternKind::of(name) != PatternKind::Literal {
        return Err(IncludeError::path_resolution(name, not_utf8(file)));
    }
    parse_one(cf, file)
}

fn parse_one<C: ConfContext>(cf: &mut C, path: &Path) -> Result<(), IncludeError> {
    debug!(path = %path.display(), "parsing included file");
    cf.parse_file(path)
        .map_err(|source| IncludeError::parse(path, source))
}
