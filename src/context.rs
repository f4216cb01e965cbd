//! Export context shared across exporter stages.
//!
//! One explicit value carries everything the exporter needs: where the build
//! outputs are, where dist artifacts go, the environment name the artifacts
//! are tagged with, and the package lookup for toolchain-bundled files.

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::layout::FlashLayout;
use crate::packages::PackageIndex;

/// Shared context for one export run.
#[derive(Debug)]
pub struct ExportContext {
    /// Build output directory (firmware.bin, bootloader.bin, partitions.bin)
    pub build_dir: PathBuf,
    /// Project root; dist artifacts go to <project_dir>/dist
    pub project_dir: PathBuf,
    /// Build environment name, used in artifact file names
    pub environment: String,
    /// Python interpreter for the esptool merge step
    pub python: String,
    /// Lookup for files bundled in PlatformIO packages
    pub packages: PackageIndex,
    /// Flash placement of the merged image components
    pub layout: FlashLayout,
}

impl ExportContext {
    /// Build a context from configuration.
    ///
    /// Fails if no environment name is configured: artifact names are derived
    /// from it, so there is nothing sensible to fall back on.
    pub fn from_config(config: &Config) -> Result<Self> {
        let environment = match &config.environment {
            Some(env) => env.clone(),
            None => bail!(
                "No build environment selected.\n\
                 Pass --environment <name> or set PIOENV (PlatformIO exports it to post-build hooks)."
            ),
        };

        // PlatformIO's canonical layout unless overridden
        let build_dir = config
            .build_dir
            .clone()
            .unwrap_or_else(|| config.project_dir.join(".pio/build").join(&environment));

        Ok(Self {
            build_dir,
            project_dir: config.project_dir.clone(),
            environment,
            python: config.python.clone(),
            packages: PackageIndex::new(&config.core_dir),
            layout: FlashLayout::esp32(),
        })
    }

    /// Compiled application image produced by the build.
    pub fn app_bin(&self) -> PathBuf {
        self.build_dir.join("firmware.bin")
    }

    /// Second-stage bootloader produced by the build.
    pub fn bootloader_bin(&self) -> PathBuf {
        self.build_dir.join("bootloader.bin")
    }

    /// Partition table produced by the build.
    pub fn partitions_bin(&self) -> PathBuf {
        self.build_dir.join("partitions.bin")
    }

    /// Distribution output directory.
    pub fn dist_dir(&self) -> PathBuf {
        self.project_dir.join("dist")
    }

    /// App image renamed for M5Launcher.
    pub fn launcher_bin(&self) -> PathBuf {
        self.dist_dir()
            .join(format!("{}-for-m5launcher.bin", self.environment))
    }

    /// Merged full-flash image (flash at offset 0x0).
    pub fn merged_bin(&self) -> PathBuf {
        self.dist_dir()
            .join(format!("{}-full-flash-0x0000.bin", self.environment))
    }

    /// Checksum sidecar for the merged image.
    pub fn merged_checksum(&self) -> PathBuf {
        self.dist_dir()
            .join(format!("{}-full-flash-0x0000.bin.sha256", self.environment))
    }

    /// Manifest describing the produced artifacts.
    pub fn dist_manifest(&self) -> PathBuf {
        self.dist_dir()
            .join(format!("{}-manifest.json", self.environment))
    }

    /// Artifact names from the pre-rename era, removed on each export.
    pub fn legacy_artifacts(&self) -> Vec<PathBuf> {
        vec![
            self.dist_dir().join(format!("{}-app.bin", self.environment)),
            self.dist_dir()
                .join(format!("{}-m5launcher-merged.bin", self.environment)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn test_config() -> Config {
        Config {
            project_dir: PathBuf::from("/proj"),
            environment: Some("m5stick-imupointer".to_string()),
            build_dir: None,
            core_dir: PathBuf::from("/pio-core"),
            python: "python3".to_string(),
        }
    }

    #[test]
    fn test_build_dir_derived_from_environment() {
        let ctx = ExportContext::from_config(&test_config()).unwrap();
        assert_eq!(
            ctx.build_dir,
            Path::new("/proj/.pio/build/m5stick-imupointer")
        );
    }

    #[test]
    fn test_explicit_build_dir_wins() {
        let mut config = test_config();
        config.build_dir = Some(PathBuf::from("/elsewhere/out"));

        let ctx = ExportContext::from_config(&config).unwrap();
        assert_eq!(ctx.build_dir, Path::new("/elsewhere/out"));
    }

    #[test]
    fn test_missing_environment_is_fatal() {
        let mut config = test_config();
        config.environment = None;

        let err = ExportContext::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("--environment"));
    }

    #[test]
    fn test_artifact_names() {
        let ctx = ExportContext::from_config(&test_config()).unwrap();

        assert_eq!(
            ctx.launcher_bin(),
            Path::new("/proj/dist/m5stick-imupointer-for-m5launcher.bin")
        );
        assert_eq!(
            ctx.merged_bin(),
            Path::new("/proj/dist/m5stick-imupointer-full-flash-0x0000.bin")
        );
        assert_eq!(
            ctx.legacy_artifacts(),
            vec![
                PathBuf::from("/proj/dist/m5stick-imupointer-app.bin"),
                PathBuf::from("/proj/dist/m5stick-imupointer-m5launcher-merged.bin"),
            ]
        );
    }
}
