//! Build output checks.
//!
//! A clean checkout simply hasn't built yet, so missing build outputs are
//! warnings here; `export` itself treats them as fatal.

use crate::context::ExportContext;

use super::types::CheckResult;

/// Check the build outputs the exporter consumes.
pub fn check_build_outputs(ctx: &ExportContext) -> Vec<CheckResult> {
    let outputs = [
        ("firmware.bin", ctx.app_bin()),
        ("bootloader.bin", ctx.bootloader_bin()),
        ("partitions.bin", ctx.partitions_bin()),
    ];

    let mut results = Vec::new();
    for (name, path) in outputs {
        if path.is_file() {
            results.push(CheckResult::pass_with(name, &path.to_string_lossy()));
        } else {
            results.push(CheckResult::warn(
                name,
                &format!(
                    "Not found at {}. Build the '{}' environment first.",
                    path.display(),
                    ctx.environment
                ),
            ));
        }
    }

    results
}
