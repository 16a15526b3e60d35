//! SHA-256 verification of downloaded release assets.
//!
//! Releases publish a `<asset>.sha256` file next to every compressed binary,
//! in `sha256sum` format: `<hex digest>  <file name>`.

use anyhow::{Result, bail};
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::error::PackageError;
use crate::runtime::Runtime;

/// URL of the checksum file published for an asset.
pub fn checksum_url(asset_url: &str) -> String {
    format!("{}.sha256", asset_url)
}

/// Extracts the digest from a `sha256sum` style line.
pub fn parse_checksum(content: &str) -> Result<String> {
    let Some(digest) = content.split_whitespace().next() else {
        bail!("Checksum file is empty");
    };
    // Some tools prefix the digest with the algorithm name
    let digest = digest.strip_prefix("sha256:").unwrap_or(digest);

    if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!(
            "Invalid SHA256 digest: expected 64 hex characters, got '{}'",
            digest
        );
    }
    Ok(digest.to_lowercase())
}

/// Hex encoded SHA-256 of a file.
pub fn sha256_file<R: Runtime>(runtime: &R, path: &Path) -> Result<String> {
    let mut reader = runtime.open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut reader, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Fails with [`PackageError::ChecksumMismatch`] unless `path` hashes to `expected`.
#[tracing::instrument(skip(runtime))]
pub fn verify_file<R: Runtime>(runtime: &R, path: &Path, expected: &str) -> Result<()> {
    let actual = sha256_file(runtime, path)?;
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(PackageError::ChecksumMismatch {
            file: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            expected: expected.to_string(),
            actual,
        }
        .into());
    }
    Ok(())
}
