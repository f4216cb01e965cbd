//! Host tool availability checks.

use crate::process;

use super::types::CheckResult;

/// Check the merge-step interpreter is installed.
pub fn check_host_tools(python: &str) -> Vec<CheckResult> {
    let mut results = Vec::new();

    match process::find_tool(python) {
        Some(path) => {
            results.push(CheckResult::pass_with(python, &path.to_string_lossy()));
        }
        None => {
            results.push(CheckResult::fail(
                python,
                "Not found in PATH. Install Python 3 or set M5DIST_PYTHON.",
            ));
        }
    }

    results
}
