mod gzip;

use crate::runtime::Runtime;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub use gzip::GzipDecompressor;

/// Turns a downloaded compressed file into the artifact it contains.
pub trait Decompressor: Send + Sync {
    /// Decompress `path` next to itself and return the path of the output.
    /// The compressed file is left in place.
    fn decompress<R: Runtime>(&self, runtime: &R, path: &Path) -> Result<PathBuf>;
}

/// Output path of a compressed file: the same path without its compression suffix.
pub fn decompressed_path(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let stem = name
        .strip_suffix(".gz")
        .or_else(|| name.strip_suffix(".GZ"))?;
    if stem.is_empty() {
        return None;
    }
    Some(path.with_file_name(stem))
}
