use crate::ConfglobContext;
use crate::include::{self, ConfContext};
use crate::output;
use crate::resolver::PatternResolver;
use crate::utils::paths;
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Records the files an include would parse instead of parsing them.
struct Lister {
    prefix: PathBuf,
    resolver: PatternResolver,
    matches: Vec<PathBuf>,
}

impl ConfContext for Lister {
    fn full_name(&self, name: &str) -> io::Result<PathBuf> {
        paths::full_name(&self.prefix, name)
    }

    fn parse_file(&mut self, path: &Path) -> Result<()> {
        if !path.is_file() {
            anyhow::bail!("no such file");
        }
        self.matches.push(path.to_path_buf());
        Ok(())
    }

    fn resolver(&self) -> PatternResolver {
        self.resolver
    }
}

/// Print every file `recursive_include <pattern>` would parse, one per line
///
/// # Errors
///
/// Returns an error if the pattern cannot be resolved
pub fn execute(ctx: &ConfglobContext, pattern: &str) -> Result<()> {
    let matches = list(ctx, pattern)?;

    if matches.is_empty() {
        output::info(&format!("No files match {pattern}"));
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    for path in &matches {
        writeln!(stdout, "{}", path.display())?;
    }
    Ok(())
}

/// Files `recursive_include <pattern>` would parse, in parse order.
///
/// Relative patterns resolve against `include.prefix`, or the current
/// directory when it is unset.
///
/// # Errors
///
/// Returns an error if the pattern cannot be resolved
pub fn list(ctx: &ConfglobContext, pattern: &str) -> Result<Vec<PathBuf>> {
    let prefix = match &ctx.settings.include.prefix {
        Some(prefix) => prefix.clone(),
        None => std::env::current_dir().context("Could not determine current directory")?,
    };

    let mut lister = Lister {
        prefix,
        resolver: PatternResolver::from_settings(&ctx.settings.include),
        matches: Vec::new(),
    };
    include::recursive_include(&mut lister, pattern)?;

    Ok(lister.matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IncludeError;
    use crate::test_utils::fixtures::TestTree;

    fn context(tree: &TestTree) -> ConfglobContext {
        let mut ctx = ConfglobContext::new_explicit(tree.path().join("settings.toml")).unwrap();
        ctx.settings.include.prefix = Some(tree.path().to_path_buf());
        ctx
    }

    #[test]
    fn test_list_tree_pattern() -> Result<()> {
        let tree = TestTree::new()?;
        let a = tree.file("sites/a/site.conf", "")?;
        let b = tree.file("sites/b/site.conf", "")?;
        tree.file("sites/b/other.conf", "")?;

        let matches = list(&context(&tree), "sites/*/site.conf")?;
        assert_eq!(matches, vec![a, b]);
        Ok(())
    }

    #[test]
    fn test_missing_literal_fails() -> Result<()> {
        let tree = TestTree::new()?;

        let err = list(&context(&tree), "missing.conf").unwrap_err();
        let include_err = err.downcast_ref::<IncludeError>().unwrap();
        assert!(matches!(include_err, IncludeError::ParseFailed { .. }));
        Ok(())
    }
}
