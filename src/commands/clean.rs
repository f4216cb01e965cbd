//! Clean command - removes dist artifacts.

use anyhow::Result;

use crate::clean;
use crate::context::ExportContext;

/// Execute the clean command.
pub fn cmd_clean(ctx: &ExportContext, all: bool) -> Result<()> {
    if all {
        clean::clean_all(ctx)?;
    } else {
        clean::clean_environment(ctx)?;
    }
    Ok(())
}
