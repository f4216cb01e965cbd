//! Toolchain package checks.

use crate::config::{BOOT_APP0, FRAMEWORK_PACKAGE};
use crate::packages::PackageIndex;

use super::types::CheckResult;

/// Check the framework package and its bundled boot-selector stub.
pub fn check_packages(packages: &PackageIndex) -> Vec<CheckResult> {
    let mut results = Vec::new();

    match packages.dir(FRAMEWORK_PACKAGE) {
        Ok(_) => {
            let name = match packages.manifest(FRAMEWORK_PACKAGE) {
                Some(manifest) => match manifest.version {
                    Some(version) => format!("{} {}", FRAMEWORK_PACKAGE, version),
                    None => FRAMEWORK_PACKAGE.to_string(),
                },
                None => FRAMEWORK_PACKAGE.to_string(),
            };
            results.push(CheckResult::pass(&name));

            match packages.file(FRAMEWORK_PACKAGE, BOOT_APP0) {
                Ok(path) => {
                    results.push(CheckResult::pass_with(
                        "boot_app0.bin",
                        &path.to_string_lossy(),
                    ));
                }
                Err(_) => {
                    results.push(CheckResult::fail(
                        "boot_app0.bin",
                        "Missing from the framework package. Reinstall the platform.",
                    ));
                }
            }
        }
        Err(_) => {
            results.push(CheckResult::fail(
                FRAMEWORK_PACKAGE,
                "Not installed. Run a PlatformIO build once to install the platform packages.",
            ));
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preflight::types::CheckStatus;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_package_fails() {
        let temp = TempDir::new().unwrap();
        let results = check_packages(&PackageIndex::new(temp.path()));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, CheckStatus::Fail);
    }

    #[test]
    fn test_package_without_stub_fails_stub_check() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("packages").join(FRAMEWORK_PACKAGE)).unwrap();

        let results = check_packages(&PackageIndex::new(temp.path()));

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, CheckStatus::Pass);
        assert_eq!(results[1].status, CheckStatus::Fail);
    }

    #[test]
    fn test_complete_package_passes_with_version() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("packages").join(FRAMEWORK_PACKAGE);
        fs::create_dir_all(pkg.join("tools/partitions")).unwrap();
        fs::write(pkg.join("tools/partitions/boot_app0.bin"), b"\xe9stub").unwrap();
        fs::write(
            pkg.join("package.json"),
            r#"{"name": "framework-arduinoespressif32", "version": "3.20017.0"}"#,
        )
        .unwrap();

        let results = check_packages(&PackageIndex::new(temp.path()));

        assert!(results.iter().all(|r| r.status == CheckStatus::Pass));
        assert!(results[0].name.contains("3.20017.0"));
    }
}
