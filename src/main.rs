//! m5dist - distribution artifact exporter for M5Launcher-packaged firmware.
//!
//! Runs after a PlatformIO build and assembles the artifacts M5Launcher
//! users flash:
//! - `<env>-for-m5launcher.bin` - the app image under the launcher's name
//! - `<env>-full-flash-0x0000.bin` - merged full-flash image (esptool merge-bin)
#![allow(dead_code)]

mod clean;
mod commands;
mod config;
mod context;
mod export;
mod layout;
mod packages;
mod preflight;
mod process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use config::Config;
use context::ExportContext;

#[derive(Parser)]
#[command(name = "m5dist")]
#[command(about = "Distribution artifact exporter for M5Launcher-packaged ESP32 firmware")]
#[command(
    after_help = "QUICK START:\n  m5dist preflight   Check interpreter, packages, build outputs\n  m5dist export      Export dist artifacts after a build\n  m5dist show status Show what has been exported\n  m5dist clean       Remove dist artifacts"
)]
struct Cli {
    /// Build environment name (default: $PIOENV)
    #[arg(long, global = true)]
    environment: Option<String>,

    /// Project root directory (default: current directory)
    #[arg(long, global = true)]
    project_dir: Option<PathBuf>,

    /// Build output directory (default: <project>/.pio/build/<env>)
    #[arg(long, global = true)]
    build_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export dist artifacts (run as a post-build hook)
    Export,

    /// Clean dist artifacts for the selected environment
    Clean {
        /// Remove the whole dist directory
        #[arg(long)]
        all: bool,
    },

    /// Run preflight checks (verify everything the export needs)
    Preflight {
        /// Fail if any checks fail (exit code 1)
        #[arg(long)]
        strict: bool,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show current configuration
    Config,
    /// Show dist artifact status
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env if present
    dotenvy::dotenv().ok();

    let cwd = std::env::current_dir()?;
    let mut config = Config::load(&cwd);

    // CLI flags override .env and environment
    if let Some(environment) = cli.environment {
        config.environment = Some(environment);
    }
    if let Some(project_dir) = cli.project_dir {
        config.project_dir = project_dir;
    }
    if let Some(build_dir) = cli.build_dir {
        config.build_dir = Some(build_dir);
    }

    match cli.command {
        Commands::Export => {
            let ctx = ExportContext::from_config(&config)?;
            commands::cmd_export(&ctx)?;
        }

        Commands::Clean { all } => {
            let ctx = ExportContext::from_config(&config)?;
            commands::cmd_clean(&ctx, all)?;
        }

        Commands::Preflight { strict } => {
            let ctx = ExportContext::from_config(&config)?;
            commands::cmd_preflight(&ctx, strict)?;
        }

        Commands::Show { what } => {
            let show_target = match what {
                ShowTarget::Config => commands::show::ShowTarget::Config,
                ShowTarget::Status => commands::show::ShowTarget::Status,
            };
            commands::cmd_show(&config, show_target)?;
        }
    }

    Ok(())
}
