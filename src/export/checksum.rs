//! Artifact digests and checksum sidecars.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Compute the SHA-256 digest of a file, hex-encoded.
pub fn sha256_hex(path: &Path) -> Result<String> {
    let content = fs::read(path)
        .with_context(|| format!("Failed to read {} for hashing", path.display()))?;

    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Write a `sha256sum -c` compatible sidecar next to an artifact.
///
/// The sidecar records the bare file name, so the check works from inside
/// the dist directory regardless of where the tree was unpacked.
pub fn write_checksum_sidecar(artifact: &Path, sidecar: &Path) -> Result<PathBuf> {
    let digest = sha256_hex(artifact)?;
    let name = artifact
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    fs::write(sidecar, format!("{}  {}\n", digest, name))
        .with_context(|| format!("Failed to write checksum {}", sidecar.display()))?;
    Ok(sidecar.to_path_buf())
}
