//! Preflight command - runs preflight checks.

use anyhow::Result;

use crate::context::ExportContext;
use crate::preflight;

/// Execute the preflight command.
pub fn cmd_preflight(ctx: &ExportContext, strict: bool) -> Result<()> {
    if strict {
        preflight::run_preflight_or_fail(ctx)?;
    } else {
        let report = preflight::run_preflight(ctx);
        report.print();
        if !report.all_passed() {
            println!("Some checks failed. Use --strict to fail the build.");
        }
    }
    Ok(())
}
