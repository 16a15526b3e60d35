//! Staging of fetched files into the package layout.
//!
//! Every file is placed purely by its name: the rule table does not know
//! which platform the files came from.

mod rule;

use anyhow::Result;
use log::{debug, info};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

pub use rule::{DEFAULT_RULES, StageRule, StageRules};

/// A file copied into the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedFile {
    pub source: PathBuf,
    /// Destination relative to the package root, `/` separated
    pub destination: String,
}

/// Copies each fetched file that matches a rule into `package_dir` and
/// returns the placements sorted by destination. Files without a rule are
/// skipped. Existing files are overwritten, so staging twice yields the same
/// tree.
#[tracing::instrument(skip(runtime, rules))]
pub fn stage<R: Runtime>(
    runtime: &R,
    rules: &StageRules,
    files: &[PathBuf],
    package_dir: &Path,
) -> Result<Vec<StagedFile>> {
    let mut staged = Vec::new();

    for file in files {
        let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(dest_root) = rules.destination_for(name) else {
            debug!("No staging rule for {:?}, skipping", file);
            continue;
        };

        let dest_dir = package_dir.join(dest_root);
        runtime.create_dir_all(&dest_dir)?;
        runtime.copy(file, &dest_dir.join(name))?;

        let destination = format!("{}/{}", dest_root, name);
        info!("Staged {:?} as {}", file, destination);
        staged.push(StagedFile {
            source: file.clone(),
            destination,
        });
    }

    staged.sort_by(|a, b| a.destination.cmp(&b.destination));
    Ok(staged)
}
