//! Export command - the post-build hook entry point.

use anyhow::Result;

use crate::context::ExportContext;
use crate::export;

/// Execute the export command.
pub fn cmd_export(ctx: &ExportContext) -> Result<()> {
    export::export_artifacts(ctx)?;
    Ok(())
}
