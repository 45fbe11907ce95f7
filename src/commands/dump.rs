use crate::ConfglobContext;
use crate::conf;
use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;

/// Print a configuration file with every include spliced in place
///
/// # Errors
///
/// Returns an error if parsing fails or stdout cannot be written
pub fn execute(ctx: &ConfglobContext, file: &Path) -> Result<()> {
    let tree = conf::load(file, &ctx.settings.include)?;

    let mut stdout = io::stdout().lock();
    write!(stdout, "{tree}")?;
    stdout.flush()?;
    Ok(())
}
