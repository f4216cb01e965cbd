//! Dist artifact cleaning.

use anyhow::Result;
use std::fs;

use crate::context::ExportContext;

/// Remove the selected environment's dist artifacts (current and legacy names).
pub fn clean_environment(ctx: &ExportContext) -> Result<()> {
    let mut targets = vec![
        ctx.launcher_bin(),
        ctx.merged_bin(),
        ctx.merged_checksum(),
        ctx.dist_manifest(),
    ];
    targets.extend(ctx.legacy_artifacts());

    let mut cleaned = false;

    for target in targets {
        if target.exists() {
            println!("Removing {}...", target.display());
            fs::remove_file(&target)?;
            cleaned = true;
        }
    }

    if cleaned {
        println!("Dist artifacts cleaned.");
    } else {
        println!("No dist artifacts to clean.");
    }

    Ok(())
}

/// Remove the whole dist directory.
pub fn clean_all(ctx: &ExportContext) -> Result<()> {
    let dist_dir = ctx.dist_dir();

    if dist_dir.exists() {
        println!("Removing {}...", dist_dir.display());
        fs::remove_dir_all(&dist_dir)?;
        println!("Dist directory cleaned.");
    } else {
        println!("No dist directory to clean.");
    }

    Ok(())
}
