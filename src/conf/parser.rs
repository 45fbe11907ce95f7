//! Statement and block parser with include splicing.

use super::directive::{self, ConfTree, Directive, Location};
use super::lexer::{self, TokenKind};
use super::source::read_source;
use crate::config::IncludeSettings;
use crate::include::ConfContext;
use crate::resolver::PatternResolver;
use crate::utils::paths;
use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span, trace};

/// Parses a root configuration file, executing include directives as it goes.
///
/// Directives from an included file are appended to the block that holds the
/// include directive, so the resulting tree reads as if every include had been
/// replaced by the content it matched.
pub struct ConfParser {
    settings: IncludeSettings,
    /// Directory relative include arguments are resolved against
    prefix: PathBuf,
    /// Files currently being parsed, outermost first
    open_files: Vec<PathBuf>,
    /// Blocks under construction; the last one receives new directives
    blocks: Vec<Vec<Directive>>,
    files: Vec<PathBuf>,
}

/// Block header waiting for its closing brace.
struct OpenBlock {
    name: String,
    args: Vec<String>,
    location: Location,
}

impl ConfParser {
    /// Creates a parser. Relative includes resolve against `settings.prefix`,
    /// or against the current directory until a root file is parsed.
    #[must_use]
    pub fn new(settings: &IncludeSettings) -> Self {
        Self {
            settings: settings.clone(),
            prefix: settings.prefix.clone().unwrap_or_default(),
            open_files: Vec::new(),
            blocks: vec![Vec::new()],
            files: Vec::new(),
        }
    }

    /// Parses `path` and everything it includes.
    ///
    /// Without a configured prefix, relative includes are resolved against the
    /// directory containing `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if any file fails to read, tokenize or parse, or if an
    /// include directive fails.
    pub fn parse_root(mut self, path: &Path) -> Result<ConfTree> {
        let path = paths::make_absolute(path)
            .with_context(|| format!("failed to resolve \"{}\"", path.display()))?;

        if self.settings.prefix.is_none() {
            self.prefix = path.parent().map(Path::to_path_buf).unwrap_or_default();
        }

        self.parse_file(&path)?;

        Ok(ConfTree {
            directives: self.blocks.pop().unwrap_or_default(),
            files: self.files,
        })
    }

    fn parse_source(&mut self, file: &Path, source: &str) -> Result<()> {
        let tokens = lexer::tokenize(source)
            .map_err(|e| anyhow::anyhow!("{e} in {}:{}", file.display(), e.line()))?;

        let mut words: Vec<String> = Vec::new();
        let mut start = 0;
        let mut open: Vec<OpenBlock> = Vec::new();

        for token in tokens {
            let location = Location {
                file: file.to_path_buf(),
                line: token.line,
            };

            match token.kind {
                TokenKind::Word(word) => {
                    if words.is_empty() {
                        start = token.line;
                    }
                    words.push(word);
                }
                TokenKind::Semicolon => {
                    let (name, args) = take_statement(&mut words, ";", &location)?;
                    let location = Location { line: start, ..location };
                    self.statement(name, args, location)?;
                }
                TokenKind::BlockStart => {
                    let (name, args) = take_statement(&mut words, "{", &location)?;
                    if directive::lookup(&name).is_some() {
                        anyhow::bail!("directive \"{name}\" has no opening \"{{\" in {location}");
                    }
                    open.push(OpenBlock {
                        name,
                        args,
                        location: Location { line: start, ..location },
                    });
                    self.blocks.push(Vec::new());
                }
                TokenKind::BlockEnd => {
                    if !words.is_empty() {
                        anyhow::bail!("unexpected \"}}\" in {location}");
                    }
                    let header = open
                        .pop()
                        .with_context(|| format!("unexpected \"}}\" in {location}"))?;
                    let children = self.blocks.pop().unwrap_or_default();
                    self.push(Directive {
                        name: header.name,
                        args: header.args,
                        block: Some(children),
                        location: header.location,
                    });
                }
            }
        }

        if !words.is_empty() {
            anyhow::bail!(
                "unexpected end of file, expecting \";\" or \"}}\" in {}",
                file.display()
            );
        }
        if let Some(header) = open.last() {
            anyhow::bail!(
                "unexpected end of file, expecting \"}}\" for \"{}\" opened at {}",
                header.name,
                header.location
            );
        }

        Ok(())
    }

    fn statement(&mut self, name: String, args: Vec<String>, location: Location) -> Result<()> {
        let Some(spec) = directive::lookup(&name) else {
            trace!(%name, "recording directive");
            self.push(Directive {
                name,
                args,
                block: None,
                location,
            });
            return Ok(());
        };

        if !spec.arity.accepts(args.len()) {
            anyhow::bail!("invalid number of arguments in \"{name}\" directive in {location}");
        }

        (spec.handler)(self, &args)
            .with_context(|| format!("\"{name}\" directive failed in {location}"))
    }

    fn push(&mut self, directive: Directive) {
        match self.blocks.last_mut() {
            Some(block) => block.push(directive),
            None => self.blocks.push(vec![directive]),
        }
    }
}

/// Splits the pending words into a directive name and its arguments.
fn take_statement(
    words: &mut Vec<String>,
    terminator: &str,
    location: &Location,
) -> Result<(String, Vec<String>)> {
    let mut drained = std::mem::take(words).into_iter();
    let name = drained
        .next()
        .with_context(|| format!("unexpected \"{terminator}\" in {location}"))?;
    Ok((name, drained.collect()))
}

impl ConfContext for ConfParser {
    fn full_name(&self, name: &str) -> io::Result<PathBuf> {
        paths::full_name(&self.prefix, name)
    }

    fn parse_file(&mut self, path: &Path) -> Result<()> {
        let span = span!(Level::DEBUG, "parse_file", path = %path.display());
        let _guard = span.enter();

        if self.open_files.iter().any(|open| open == path) {
            anyhow::bail!("\"{}\" includes itself", path.display());
        }

        if let Some(max) = self.settings.max_depth
            && self.open_files.len() > max
        {
            anyhow::bail!(
                "include nesting deeper than {max} levels at \"{}\"",
                path.display()
            );
        }

        let source = read_source(path)?;
        debug!(bytes = source.len(), "read configuration file");

        self.files.push(path.to_path_buf());
        self.open_files.push(path.to_path_buf());
        let result = self.parse_source(path, &source);
        self.open_files.pop();
        result
    }

    fn resolver(&self) -> PatternResolver {
        PatternResolver::from_settings(&self.settings)
    }
}
