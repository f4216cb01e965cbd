//! Configuration management for m5dist.
//!
//! Reads configuration from .env file and environment variables.
//! Environment variables take precedence over .env file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Package that ships the OTA boot-selector stub alongside the toolchain.
pub const FRAMEWORK_PACKAGE: &str = "framework-arduinoespressif32";

/// Relative path of the OTA boot-selector stub inside the framework package.
pub const BOOT_APP0: &str = "tools/partitions/boot_app0.bin";

/// Default Python interpreter used for `python -m esptool`.
pub const DEFAULT_PYTHON: &str = "python3";

/// m5dist configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Project root directory (default: current directory)
    pub project_dir: PathBuf,
    /// PlatformIO build environment name (e.g. "m5stick-imupointer")
    pub environment: Option<String>,
    /// Build output directory (default: <project>/.pio/build/<environment>)
    pub build_dir: Option<PathBuf>,
    /// PlatformIO core directory holding packages/ (default: ~/.platformio)
    pub core_dir: PathBuf,
    /// Python interpreter for the esptool merge step
    pub python: String,
}

impl Config {
    /// Load configuration from .env file and environment.
    ///
    /// The .env file is read from `cwd`; process environment variables
    /// override values from the file.
    pub fn load(cwd: &Path) -> Self {
        let mut env_vars = HashMap::new();

        // Try to load .env file
        let env_path = cwd.join(".env");
        if env_path.exists() {
            if let Ok(content) = fs::read_to_string(&env_path) {
                for line in content.lines() {
                    let line = line.trim();
                    // Skip comments and empty lines
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    // Parse KEY=value
                    if let Some((key, value)) = line.split_once('=') {
                        let key = key.trim();
                        let value = value.trim();
                        // Remove quotes if present
                        let value = value.trim_matches('"').trim_matches('\'');
                        env_vars.insert(key.to_string(), value.to_string());
                    }
                }
            }
        }

        // Environment variables override .env file
        for (key, value) in std::env::vars() {
            env_vars.insert(key, value);
        }

        let project_dir = env_vars
            .get("M5DIST_PROJECT_DIR")
            .map(|s| resolve_path(cwd, s))
            .unwrap_or_else(|| cwd.to_path_buf());

        // PlatformIO exports PIOENV to extra scripts; honor it here so the
        // tool works unmodified as a post-build hook.
        let environment = env_vars
            .get("PIOENV")
            .filter(|s| !s.is_empty())
            .cloned();

        let build_dir = env_vars
            .get("M5DIST_BUILD_DIR")
            .map(|s| resolve_path(cwd, s));

        let core_dir = env_vars
            .get("PLATFORMIO_CORE_DIR")
            .map(|s| resolve_path(cwd, s))
            .unwrap_or_else(default_core_dir);

        let python = env_vars
            .get("M5DIST_PYTHON")
            .cloned()
            .unwrap_or_else(|| DEFAULT_PYTHON.to_string());

        Self {
            project_dir,
            environment,
            build_dir,
            core_dir,
            python,
        }
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  M5DIST_PROJECT_DIR: {}", self.project_dir.display());
        match &self.environment {
            Some(env) => println!("  PIOENV: {}", env),
            None => println!("  PIOENV: (unset - pass --environment)"),
        }
        match &self.build_dir {
            Some(dir) => println!("  M5DIST_BUILD_DIR: {}", dir.display()),
            None => println!("  M5DIST_BUILD_DIR: (derived from .pio/build/<env>)"),
        }
        println!("  PLATFORMIO_CORE_DIR: {}", self.core_dir.display());
        println!("  M5DIST_PYTHON: {}", self.python);
    }
}

/// Default PlatformIO core directory: ~/.platformio.
fn default_core_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".platformio")
}

/// Resolve a possibly-relative configured path against the working directory.
fn resolve_path(cwd: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
