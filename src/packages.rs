//! PlatformIO package lookup.
//!
//! Toolchain packages live under `<core_dir>/packages/<name>/`. The exporter
//! needs exactly one bundled file from there (the OTA boot-selector stub
//! inside the Arduino-ESP32 framework package); `show` and `preflight` also
//! read the package's `package.json` to report the installed version.

use anyhow::{bail, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolves files bundled inside installed PlatformIO packages.
#[derive(Debug, Clone)]
pub struct PackageIndex {
    packages_dir: PathBuf,
}

/// Subset of a PlatformIO `package.json` we care about.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl PackageIndex {
    /// Create an index over `<core_dir>/packages`.
    pub fn new(core_dir: &Path) -> Self {
        Self {
            packages_dir: core_dir.join("packages"),
        }
    }

    /// Directory of an installed package. Fatal if the package is missing.
    pub fn dir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.packages_dir.join(name);
        if !dir.is_dir() {
            bail!(
                "Missing PlatformIO package '{}' (looked in {}).\n\
                 Run a PlatformIO build once so the platform installs its packages.",
                name,
                self.packages_dir.display()
            );
        }
        Ok(dir)
    }

    /// A file bundled inside an installed package.
    ///
    /// Fails with the package error if the package itself is absent, or
    /// names the missing file if the package is installed but incomplete.
    pub fn file(&self, name: &str, relative: &str) -> Result<PathBuf> {
        let path = self.dir(name)?.join(relative);
        if !path.is_file() {
            bail!(
                "Package '{}' is installed but {} is missing from it",
                name,
                path.display()
            );
        }
        Ok(path)
    }

    /// Parse the package's `package.json`, if present and well-formed.
    pub fn manifest(&self, name: &str) -> Option<PackageManifest> {
        let path = self.packages_dir.join(name).join("package.json");
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Names of all installed packages, sorted. Used by `show status`.
    pub fn installed(&self) -> Vec<String> {
        let mut names: Vec<String> = walkdir::WalkDir::new(&self.packages_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
