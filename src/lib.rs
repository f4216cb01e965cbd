//! m5dist library exports for testing.
//!
//! This module exposes internal components for integration testing.

pub mod clean;
pub mod config;
pub mod context;
pub mod export;
pub mod layout;
pub mod packages;
pub mod preflight;
pub mod process;
