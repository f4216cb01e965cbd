//! Distribution artifact export.
//!
//! The post-build step: takes a finished PlatformIO build and produces the
//! two artifacts M5Launcher users flash from, under `<project>/dist/`:
//!
//! - `<env>-for-m5launcher.bin` - the app image under the name the launcher
//!   expects (flashed into an OTA slot by the launcher itself)
//! - `<env>-full-flash-0x0000.bin` - bootloader + partition table +
//!   boot-selector stub + app merged at their flash offsets, for flashing a
//!   blank device at offset 0x0
//!
//! Either both artifacts exist afterwards or the export has failed; there is
//! no partial-success state.

pub mod checksum;
pub mod manifest;

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{BOOT_APP0, FRAMEWORK_PACKAGE};
use crate::context::ExportContext;
use crate::process::Cmd;

use manifest::DistManifest;

/// Paths of the artifacts a successful export produced.
#[derive(Debug, Clone)]
pub struct ExportedArtifacts {
    pub launcher_bin: PathBuf,
    pub merged_bin: PathBuf,
}

/// Export distribution artifacts for the given build.
///
/// Stages:
/// 1. Ensure `dist/` exists
/// 2. Drop artifacts left behind by the old naming scheme
/// 3. Verify the compiled app image exists (before anything is spawned)
/// 4. Copy the app image to its launcher name
/// 5. Resolve the remaining merge inputs (build outputs + packaged stub)
/// 6. Merge the full-flash image via `python -m esptool merge-bin`
/// 7. Write the checksum sidecar and dist manifest
pub fn export_artifacts(ctx: &ExportContext) -> Result<ExportedArtifacts> {
    println!(
        "=== Exporting M5Launcher artifacts ({}) ===\n",
        ctx.environment
    );

    let dist_dir = ctx.dist_dir();
    fs::create_dir_all(&dist_dir)
        .with_context(|| format!("Failed to create {}", dist_dir.display()))?;

    remove_legacy_artifacts(ctx)?;

    let app_bin = ctx.app_bin();
    if !app_bin.exists() {
        bail!(
            "Missing app firmware: {}\n\
             The build did not produce firmware.bin; check the build environment.",
            app_bin.display()
        );
    }

    let launcher_bin = ctx.launcher_bin();
    fs::copy(&app_bin, &launcher_bin).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            app_bin.display(),
            launcher_bin.display()
        )
    })?;

    let merged_bin = ctx.merged_bin();
    merge_full_flash(ctx, &merged_bin)?;

    checksum::write_checksum_sidecar(&merged_bin, &ctx.merged_checksum())?;
    write_manifest(ctx, &launcher_bin, &merged_bin)?;

    println!("[m5dist] app bin: {}", launcher_bin.display());
    println!("[m5dist] merged bin: {}", merged_bin.display());
    print_export_summary(ctx, &launcher_bin, &merged_bin);

    Ok(ExportedArtifacts {
        launcher_bin,
        merged_bin,
    })
}

/// Stage 2: remove artifacts from the pre-rename naming scheme.
///
/// Absent files are fine; a file that exists but cannot be removed is not.
fn remove_legacy_artifacts(ctx: &ExportContext) -> Result<()> {
    for legacy in ctx.legacy_artifacts() {
        if legacy.exists() {
            println!("Removing legacy artifact {}...", legacy.display());
            fs::remove_file(&legacy)
                .with_context(|| format!("Failed to remove {}", legacy.display()))?;
        }
    }
    Ok(())
}

/// Stages 5-6: resolve merge inputs and run `esptool merge-bin`.
fn merge_full_flash(ctx: &ExportContext, merged_bin: &Path) -> Result<()> {
    let bootloader_bin = ctx.bootloader_bin();
    let partitions_bin = ctx.partitions_bin();
    for input in [&bootloader_bin, &partitions_bin] {
        if !input.exists() {
            bail!(
                "Missing build output: {}\n\
                 Expected next to firmware.bin in {}.",
                input.display(),
                ctx.build_dir.display()
            );
        }
    }

    let boot_app0_bin = ctx.packages.file(FRAMEWORK_PACKAGE, BOOT_APP0)?;

    println!("Merging full-flash image via esptool...");
    Cmd::new(&ctx.python)
        .args(["-m", "esptool", "--chip"])
        .arg(&ctx.layout.chip)
        .args(["merge-bin", "-o"])
        .arg_path(merged_bin)
        .args(ctx.layout.merge_args(
            &bootloader_bin,
            &partitions_bin,
            &boot_app0_bin,
            &ctx.app_bin(),
        ))
        .error_msg("esptool merge-bin failed")
        .run()?;

    Ok(())
}

/// Stage 7: record both artifacts in the dist manifest.
fn write_manifest(ctx: &ExportContext, launcher_bin: &Path, merged_bin: &Path) -> Result<()> {
    let mut manifest = DistManifest::new(&ctx.environment, &ctx.layout.chip);
    manifest.record(launcher_bin)?;
    manifest.record(merged_bin)?;
    manifest.save(&ctx.dist_manifest())
}

/// Print summary after export.
fn print_export_summary(ctx: &ExportContext, launcher_bin: &Path, merged_bin: &Path) {
    println!("\n=== Export complete ({}) ===", ctx.environment);
    for artifact in [launcher_bin, merged_bin] {
        match fs::metadata(artifact) {
            Ok(meta) => {
                println!("  {} ({} KB)", artifact.display(), meta.len() / 1024);
            }
            Err(e) => {
                eprintln!("  [WARN] Could not read size of {}: {}", artifact.display(), e);
            }
        }
    }
    println!("\nFlash the merged image to a blank device:");
    println!(
        "  python -m esptool --chip {} write-flash 0x0 {}",
        ctx.layout.chip,
        merged_bin.display()
    );
}
