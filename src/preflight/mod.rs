//! Preflight checks for the artifact export.
//!
//! Validates the host interpreter, toolchain packages, and build outputs
//! before an export. Run with `m5dist preflight`.

mod host_tools;
mod outputs;
mod packages;
pub mod types;

use anyhow::{bail, Result};

use crate::context::ExportContext;

pub use types::PreflightReport;

/// Run all preflight checks.
pub fn run_preflight(ctx: &ExportContext) -> PreflightReport {
    let mut checks = Vec::new();

    println!("Running preflight checks...\n");

    println!("Checking host tools...");
    checks.extend(host_tools::check_host_tools(&ctx.python));

    println!("Checking toolchain packages...");
    checks.extend(packages::check_packages(&ctx.packages));

    println!("Checking build outputs...");
    checks.extend(outputs::check_build_outputs(ctx));

    println!();

    PreflightReport { checks }
}

/// Run preflight and bail if any checks fail.
pub fn run_preflight_or_fail(ctx: &ExportContext) -> Result<()> {
    let report = run_preflight(ctx);
    report.print();

    if !report.all_passed() {
        bail!(
            "Preflight failed: {} check(s) failed. Fix the issues above before exporting.",
            report.fail_count()
        );
    }

    println!("All preflight checks passed!\n");
    Ok(())
}
