//! Hook-driven directory tree traversal.
//!
//! [`TreeWalker`] enumerates a subtree with `walkdir` and hands every entry to
//! a [`TreeHandler`]. The handler decides, per directory, whether the walker
//! descends into it; file and special entries go to hooks that default to
//! doing nothing.

use crate::error::IncludeError;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span, trace};
use walkdir::WalkDir;

/// Classification of a visited entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory (or a followed symlink to one)
    Directory,
    /// Anything else: unfollowed symlinks, devices, fifos, sockets
    Special,
}

/// Entry handed to [`TreeHandler`] hooks.
#[derive(Debug, Clone, Copy)]
pub struct WalkEntry<'a> {
    /// Full path of the entry, built from the walk root
    pub path: &'a Path,
    /// Final path component (the root's own name at depth 0)
    pub name: &'a OsStr,
    /// Distance from the walk root; the root itself is at depth 0
    pub depth: usize,
    /// Entry classification
    pub kind: EntryKind,
}

/// Whether the walker should enumerate a directory's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Enumerate the directory's children
    Descend,
    /// Leave the directory unopened
    Skip,
}

/// Per-entry hooks invoked by [`TreeWalker::walk`].
///
/// Only `pre_directory` is required. Returning an error from any hook aborts
/// the walk and the error is returned unchanged.
pub trait TreeHandler {
    /// Called for every directory before its children are visited.
    ///
    /// # Errors
    ///
    /// Any error aborts the walk.
    fn pre_directory(&mut self, entry: &WalkEntry<'_>) -> Result<Visit, IncludeError>;

    /// Called after every child of a descended directory has been visited.
    ///
    /// # Errors
    ///
    /// Any error aborts the walk.
    fn post_directory(&mut self, _entry: &WalkEntry<'_>) -> Result<(), IncludeError> {
        Ok(())
    }

    /// Called for regular files.
    ///
    /// # Errors
    ///
    /// Any error aborts the walk.
    fn file(&mut self, _entry: &WalkEntry<'_>) -> Result<(), IncludeError> {
        Ok(())
    }

    /// Called for special entries.
    ///
    /// # Errors
    ///
    /// Any error aborts the walk.
    fn special(&mut self, _entry: &WalkEntry<'_>) -> Result<(), IncludeError> {
        Ok(())
    }
}

/// Depth-bounded, optionally sorted directory walker.
#[derive(Debug, Clone, Copy)]
pub struct TreeWalker {
    /// Deepest level whose entries are visited; `None` walks the whole subtree
    max_depth: Option<usize>,
    /// Visit entries in lexicographic file-name order
    sort_entries: bool,
    /// Follow symbolic links to directories
    follow_symlinks: bool,
}

impl Default for TreeWalker {
    fn default() -> Self {
        Self {
            max_depth: None,
            sort_entries: true,
            follow_symlinks: false,
        }
    }
}

impl TreeWalker {
    /// Creates an unbounded, sorted walker that does not follow symlinks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the walk to entries at most `depth` levels below the root.
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Enables or disables lexicographic ordering of directory entries.
    #[must_use]
    pub const fn sort_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }

    /// Enables or disables following symbolic links.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Walks the subtree rooted at `root`, dispatching every entry to `handler`.
    ///
    /// A root that does not exist is treated as an empty tree.
    ///
    /// # Errors
    ///
    /// Returns `WalkOpenFailed` if the root or any descended directory cannot
    /// be read, or the first error returned by a hook. Nothing is visited after
    /// the failure.
    pub fn walk<H: TreeHandler>(&self, root: &Path, handler: &mut H) -> Result<(), IncludeError> {
        let span = span!(Level::DEBUG, "walk_tree", root = %root.display());
        let _guard = span.enter();

        let mut walk = WalkDir::new(root).follow_links(self.follow_symlinks);
        if let Some(depth) = self.max_depth {
            walk = walk.max_depth(depth);
        }
        if self.sort_entries {
            walk = walk.sort_by_file_name();
        }

        // Directories we descended into, innermost last.
        let mut open: Vec<(PathBuf, usize)> = Vec::new();
        let mut entries = walk.into_iter();

        while let Some(next) = entries.next() {
            let entry = match next {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 && is_not_found(&err) => {
                    debug!("walk root does not exist, nothing to visit");
                    return Ok(());
                }
                Err(err) => return Err(walk_error(root, err)),
            };

            let depth = entry.depth();
            close_finished(&mut open, depth, handler)?;

            // walkdir always follows a symlinked root, so classify it by its target.
            let file_type = entry.file_type();
            let kind = if file_type.is_dir() || (depth == 0 && entry.path().is_dir()) {
                EntryKind::Directory
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                EntryKind::Special
            };

            let visited = WalkEntry {
                path: entry.path(),
                name: entry.file_name(),
                depth,
                kind,
            };
            trace!(path = %visited.path.display(), depth, ?kind, "visit");

            match kind {
                EntryKind::Directory => match handler.pre_directory(&visited)? {
                    Visit::Descend => open.push((entry.path().to_path_buf(), depth)),
                    Visit::Skip => entries.skip_current_dir(),
                },
                EntryKind::File => handler.file(&visited)?,
                EntryKind::Special => handler.special(&visited)?,
            }
        }

        close_finished(&mut open, 0, handler)
    }
}

/// Runs `post_directory` for every open directory at `depth` or deeper.
fn close_finished<H: TreeHandler>(
    open: &mut Vec<(PathBuf, usize)>,
    depth: usize,
    handler: &mut H,
) -> Result<(), IncludeError> {
    while let Some((path, dir_depth)) = open.last() {
        if *dir_depth < depth {
            break;
        }
        let name = path.file_name().unwrap_or(path.as_os_str());
        handler.post_directory(&WalkEntry {
            path,
            name,
            depth: *dir_depth,
            kind: EntryKind::Directory,
        })?;
        open.pop();
    }
    Ok(())
}

fn is_not_found(err: &walkdir::Error) -> bool {
    err.io_error()
        .is_some_and(|io| io.kind() == io::ErrorKind::NotFound)
}

fn walk_error(root: &Path, err: walkdir::Error) -> IncludeError {
    let path = err.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other(message));
    IncludeError::walk_open(path, source)
}
