use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{LinkageInfo, PackageDescriptor};
use crate::platform::Platform;
use crate::runtime::Runtime;

/// File written at the package root describing what was staged
pub const META_FILE_NAME: &str = "meta.json";

/// Metadata published alongside a staged package
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PackageMeta {
    #[serde(flatten)]
    pub descriptor: PackageDescriptor,
    pub platform: Platform,
    pub linkage: LinkageInfo,
    /// Staged files relative to the package root, `/` separated
    pub files: Vec<String>,
}

impl PackageMeta {
    #[tracing::instrument(skip(runtime, path))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        let meta: PackageMeta = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse package metadata {:?}", path))?;
        Ok(meta)
    }

    #[tracing::instrument(skip(self, runtime, path))]
    pub fn save<R: Runtime>(&self, runtime: &R, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        runtime.write(path, json.as_bytes())
    }
}
