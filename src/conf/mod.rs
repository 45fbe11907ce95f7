//! Block-structured configuration files.
//!
//! Text is split into tokens by [`lexer`], assembled into [`Directive`]s by
//! [`ConfParser`], and include directives are executed through the table in
//! [`directive::BUILTINS`] while parsing.

pub mod directive;
pub mod lexer;
pub mod parser;
pub mod source;

pub use directive::{ConfTree, Directive, Location};
pub use parser::ConfParser;

use crate::config::IncludeSettings;
use anyhow::Result;
use std::path::Path;

/// Parses `path` with every include resolved and spliced in place.
///
/// # Errors
///
/// Returns the first read, syntax or include failure.
pub fn load(path: &Path, settings: &IncludeSettings) -> Result<ConfTree> {
    ConfParser::new(settings).parse_root(path)
}
