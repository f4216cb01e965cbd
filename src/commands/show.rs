//! Show command - displays information.

use anyhow::Result;
use std::fs;

use crate::config::{Config, FRAMEWORK_PACKAGE};
use crate::context::ExportContext;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show configuration
    Config,
    /// Show dist artifact status for the selected environment
    Status,
}

/// Execute the show command.
pub fn cmd_show(config: &Config, target: ShowTarget) -> Result<()> {
    match target {
        ShowTarget::Config => {
            config.print();
        }
        ShowTarget::Status => {
            let ctx = ExportContext::from_config(config)?;
            print_status(&ctx);
        }
    }
    Ok(())
}

fn print_status(ctx: &ExportContext) {
    println!("=== Dist status ({}) ===\n", ctx.environment);

    match ctx.packages.manifest(FRAMEWORK_PACKAGE) {
        Some(manifest) => {
            println!(
                "Framework: {} {}",
                FRAMEWORK_PACKAGE,
                manifest.version.as_deref().unwrap_or("(unknown version)")
            );
        }
        None => println!("Framework: {} (not installed)", FRAMEWORK_PACKAGE),
    }
    println!();

    let artifacts = [
        ("launcher app", ctx.launcher_bin()),
        ("merged image", ctx.merged_bin()),
        ("checksum", ctx.merged_checksum()),
        ("manifest", ctx.dist_manifest()),
    ];

    for (label, path) in artifacts {
        match fs::metadata(&path) {
            Ok(meta) => {
                println!("  {:12} {} ({} KB)", label, path.display(), meta.len() / 1024);
            }
            Err(_) => {
                println!("  {:12} (not exported)", label);
            }
        }
    }

    // Anything else lying around in dist/ (other environments, stale files)
    let others: Vec<_> = walkdir::WalkDir::new(ctx.dist_dir())
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.path().to_path_buf())
        .filter(|p| {
            !p.file_name()
                .map(|n| n.to_string_lossy().starts_with(&ctx.environment))
                .unwrap_or(false)
        })
        .collect();

    if !others.is_empty() {
        println!("\nOther files in dist/:");
        for path in others {
            println!("  {}", path.display());
        }
    }
}
