//! Parsed directives and the table of built-in directive handlers.

use super::parser::ConfParser;
use crate::error::IncludeError;
use crate::include;
use std::fmt;
use std::path::PathBuf;

/// Where a directive was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// A single statement or block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub args: Vec<String>,
    /// Nested directives, for `name args { ... }`
    pub block: Option<Vec<Directive>>,
    pub location: Location,
}

/// Result of parsing a root file with every include spliced in.
#[derive(Debug, Clone, Default)]
pub struct ConfTree {
    pub directives: Vec<Directive>,
    /// Every file that was parsed, root first, in parse order
    pub files: Vec<PathBuf>,
}

impl ConfTree {
    /// Total number of directives, counting nested ones.
    #[must_use]
    pub fn directive_count(&self) -> usize {
        fn count(directives: &[Directive]) -> usize {
            directives
                .iter()
                .map(|d| 1 + d.block.as_deref().map_or(0, count))
                .sum()
        }
        count(&self.directives)
    }
}

impl fmt::Display for ConfTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(f, &self.directives, 0)
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, directives: &[Directive], level: usize) -> fmt::Result {
    let indent = "    ".repeat(level);
    for directive in directives {
        write!(f, "{indent}{}", quote(&directive.name))?;
        for arg in &directive.args {
            write!(f, " {}", quote(arg))?;
        }
        match &directive.block {
            Some(children) => {
                writeln!(f, " {{")?;
                write_block(f, children, level + 1)?;
                writeln!(f, "{indent}}}")?;
            }
            None => writeln!(f, ";")?,
        }
    }
    Ok(())
}

fn quote(word: &str) -> String {
    let needs_quotes = word.is_empty()
        || word.starts_with('#')
        || word
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ';' | '{' | '}' | '"' | '\'' | '\\'));

    if !needs_quotes {
        return word.to_string();
    }

    let mut quoted = String::with_capacity(word.len() + 2);
    quoted.push('"');
    for c in word.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Number of arguments a directive accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

/// Handler invoked with the directive's arguments once its arity has been checked.
pub type Handler = fn(&mut ConfParser, &[String]) -> Result<(), IncludeError>;

/// A directive the parser executes instead of recording.
#[derive(Clone, Copy)]
pub struct DirectiveSpec {
    pub name: &'static str,
    pub arity: Arity,
    pub handler: Handler,
}

/// Directives handled by the parser itself.
pub const BUILTINS: &[DirectiveSpec] = &[
    DirectiveSpec {
        name: "include",
        arity: Arity::Exactly(1),
        handler: handle_include,
    },
    DirectiveSpec {
        name: "recursive_include",
        arity: Arity::Exactly(1),
        handler: handle_recursive_include,
    },
];

/// Finds the built-in named `name`.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static DirectiveSpec> {
    BUILTINS.iter().find(|spec| spec.name == name)
}

fn handle_include(cf: &mut ConfParser, args: &[String]) -> Result<(), IncludeError> {
    args.iter().try_for_each(|name| include::include(cf, name))
}

fn handle_recursive_include(cf: &mut ConfParser, args: &[String]) -> Result<(), IncludeError> {
    args.iter()
        .try_for_each(|name| include::recursive_include(cf, name))
}
