use crate::error::PackageError;
use crate::runtime::Runtime;
use anyhow::{Result, anyhow};
use flate2::read::MultiGzDecoder;
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{Decompressor, decompressed_path};

/// Decompressor for `.gz` files. Concatenated members are decoded in order
/// into one output.
pub struct GzipDecompressor;

impl Decompressor for GzipDecompressor {
    #[tracing::instrument(skip(self, runtime))]
    fn decompress<R: Runtime>(&self, runtime: &R, path: &Path) -> Result<PathBuf> {
        let output = decompressed_path(path)
            .ok_or_else(|| anyhow!("Not a gzip file name: {}", path.display()))?;

        debug!("Decompressing {:?} to {:?}...", path, output);
        let reader = runtime.open(path)?;
        let mut decoder = MultiGzDecoder::new(reader);
        let mut writer = runtime.create_file(&output)?;

        let result = std::io::copy(&mut decoder, &mut writer).and_then(|_| writer.flush());
        drop(writer);

        if let Err(e) = result {
            // Never leave a truncated artifact behind for staging to pick up
            if runtime.exists(&output) {
                let _ = runtime.remove_file(&output);
            }
            return Err(PackageError::ExtractionFailure {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into());
        }

        info!("Decompressed {:?}.", output);
        Ok(output)
    }
}
