//! Dist manifest - machine-readable record of what an export produced.
//!
//! Release tooling (and humans) can read `dist/<env>-manifest.json` instead
//! of re-deriving artifact names and digests from the directory listing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::checksum::sha256_hex;

/// One produced artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEntry {
    /// File name inside dist/
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Hex SHA-256 digest
    pub sha256: String,
}

/// Manifest for one export run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistManifest {
    /// Build environment the artifacts were exported for
    pub environment: String,
    /// Chip target the merged image was assembled for
    pub chip: String,
    /// Produced artifacts
    pub artifacts: Vec<ArtifactEntry>,
}

impl DistManifest {
    pub fn new(environment: &str, chip: &str) -> Self {
        Self {
            environment: environment.to_string(),
            chip: chip.to_string(),
            artifacts: Vec::new(),
        }
    }

    /// Record an artifact by reading its size and digest from disk.
    pub fn record(&mut self, path: &Path) -> Result<()> {
        let meta = fs::metadata(path)
            .with_context(|| format!("Failed to stat artifact {}", path.display()))?;

        self.artifacts.push(ArtifactEntry {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            size: meta.len(),
            sha256: sha256_hex(path)?,
        });
        Ok(())
    }

    /// Save manifest to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write manifest {}", path.display()))?;
        Ok(())
    }

    /// Load a manifest from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        let manifest = serde_json::from_str(&content)
            .with_context(|| format!("Malformed manifest {}", path.display()))?;
        Ok(manifest)
    }
}
