//! Pattern classification and splitting.
//!
//! A pattern is a filesystem path that may contain the glob metacharacters
//! `*`, `?` and `[`. Splitting separates the longest wildcard-free leading
//! directory (the walk root) from the wildcard-bearing remainder (the leaf).
//! Both halves borrow from the caller's string; nothing is copied or mutated.

/// Glob metacharacters recognized in include patterns.
pub const WILDCARDS: [char; 3] = ['*', '?', '['];

/// Returns the byte offset of the first wildcard metacharacter, if any.
#[must_use]
pub fn first_wildcard(pattern: &str) -> Option<usize> {
    pattern.find(WILDCARDS)
}

/// Returns `true` if the pattern contains any of `*`, `?`, `[`.
#[must_use]
pub fn has_wildcards(pattern: &str) -> bool {
    first_wildcard(pattern).is_some()
}

/// Returns `true` if no `/` follows the first wildcard, i.e. only the final
/// path segment needs matching.
///
/// Patterns without wildcards are trivially confined.
#[must_use]
pub fn is_confined_to_last_segment(pattern: &str) -> bool {
    first_wildcard(pattern).is_none_or(|pos| !pattern[pos..].contains('/'))
}

/// How an include pattern has to be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// No wildcards: the path is parsed as-is.
    Literal,
    /// Wildcards confined to the final segment: one glob in one directory.
    SingleGlob,
    /// Wildcards in directory segments: walk the tree below the root.
    TreeWalk,
}

impl PatternKind {
    /// Classifies a pattern.
    #[must_use]
    pub fn of(pattern: &str) -> Self {
        if !has_wildcards(pattern) {
            Self::Literal
        } else if is_confined_to_last_segment(pattern) {
            Self::SingleGlob
        } else {
            Self::TreeWalk
        }
    }
}

/// Borrowed halves of a split pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPattern<'a> {
    /// Wildcard-free directory prefix. `"/"` for the filesystem root, `""` for
    /// the current directory.
    pub root: &'a str,
    /// Remainder matched below `root`; never starts with the consumed `/`.
    pub leaf: &'a str,
}

impl SplitPattern<'_> {
    /// Leaf directory segments (everything before the leaf's last `/`) and
    /// the final file pattern.
    ///
    /// Empty segments produced by repeated slashes are dropped.
    #[must_use]
    pub fn leaf_parts(&self) -> (Vec<&str>, &str) {
        match self.leaf.rfind('/') {
            Some(pos) => (
                self.leaf[..pos].split('/').filter(|s| !s.is_empty()).collect(),
                &self.leaf[pos + 1..],
            ),
            None => (Vec::new(), self.leaf),
        }
    }
}

/// Splits a pattern at the last `/` preceding its first wildcard.
///
/// Without wildcards the rightmost `/` is used. A separator at offset zero
/// yields the root `"/"`; no separator at all yields the empty root.
#[must_use]
pub fn split(pattern: &str) -> SplitPattern<'_> {
    let limit = first_wildcard(pattern).unwrap_or(pattern.len());

    match pattern[..limit].rfind('/') {
        Some(0) => SplitPattern {
            root: &pattern[..1],
            leaf: &pattern[1..],
        },
        Some(pos) => SplitPattern {
            root: &pattern[..pos],
            leaf: &pattern[pos + 1..],
        },
        None => SplitPattern {
            root: "",
            leaf: pattern,
        },
    }
}
