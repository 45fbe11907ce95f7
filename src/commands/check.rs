use crate::ConfglobContext;
use crate::conf;
use crate::output::{self, Verbosity};
use anyhow::Result;
use std::path::Path;

/// Parse a configuration file with all of its includes
///
/// # Errors
///
/// Returns an error if any file fails to read or parse, or an include fails
pub fn execute(ctx: &ConfglobContext, file: &Path) -> Result<()> {
    let tree = conf::load(file, &ctx.settings.include)?;

    for path in &tree.files {
        output::action("parsed", &path.display().to_string());
    }

    if output::get_verbosity() != Verbosity::Quiet {
        super::print_success(&format!(
            "{}: {} file(s), {} directive(s)",
            file.display(),
            tree.files.len(),
            tree.directive_count()
        ));
    }

    Ok(())
}
