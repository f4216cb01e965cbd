//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `export` - Export dist artifacts (the post-build hook)
//! - `clean` - Clean dist artifacts
//! - `preflight` - Run preflight checks
//! - `show` - Display information

mod clean;
mod export;
mod preflight;
pub mod show;

pub use clean::cmd_clean;
pub use export::cmd_export;
pub use preflight::cmd_preflight;
pub use show::cmd_show;
