//! The fetch command: resolve, download, decompress, stage, publish.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    archive::Decompressor,
    checksum,
    cleanup::{self, SharedCleanupContext},
    download::Downloader,
    error::PackageError,
    inspect::inspect_artifact,
    package::{META_FILE_NAME, PackageDescriptor, PackageMeta, describe_linkage},
    platform::{Platform, RELEASE_ARCH},
    resolve::{HEADER_DIR, RemoteAsset, resolve_all},
    runtime::Runtime,
    stage::{StageRules, stage},
};

use super::config::{Config, NetworkOptions};

/// Directory inside the work directory the package is assembled in
const STAGING_DIR: &str = "package";

/// What to package and where to put it.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    pub os: Option<String>,
    pub arch: Option<String>,
    pub output: PathBuf,
    pub verify: bool,
}

#[tracing::instrument(skip(runtime, descriptor))]
pub async fn fetch<R: Runtime + 'static>(
    runtime: R,
    descriptor: PackageDescriptor,
    options: FetchOptions,
    network: NetworkOptions,
) -> Result<()> {
    let config = Config::new(runtime, descriptor, network)?;
    run(config, options).await
}

#[tracing::instrument(skip(config))]
pub async fn run<R: Runtime + 'static, D: Downloader, E: Decompressor>(
    config: Config<R, D, E>,
    options: FetchOptions,
) -> Result<()> {
    // Unsupported platforms fail here, before anything touches the network or disk
    let platform = Platform::from_settings(options.os.as_deref(), options.arch.as_deref())?;

    let packager = Packager::new(
        config.runtime,
        config.downloader,
        config.decompressor,
        config.descriptor,
    );

    let cleanup_ctx = cleanup::new_shared();
    let handler_ctx = Arc::clone(&cleanup_ctx);
    let ctrl_c_handler = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nInterrupted, cleaning up...");
            cleanup::lock(&handler_ctx).cleanup();
            std::process::exit(130);
        }
    });

    let result = packager
        .package(&platform, &options.output, options.verify, &cleanup_ctx)
        .await;

    ctrl_c_handler.abort();
    cleanup::lock(&cleanup_ctx).cleanup();

    let meta = result?;
    print_summary(&meta, &options.output);
    Ok(())
}

fn print_summary(meta: &PackageMeta, output: &Path) {
    println!(
        "   packaged {} {} for {} -> {}",
        meta.descriptor.name,
        meta.descriptor.version,
        meta.platform,
        output.display()
    );
    for file in &meta.files {
        println!("     {}", file);
    }
    println!("   link with: {}", meta.linkage.libs.join(", "));
}

/// Runs the packaging steps for one platform.
pub struct Packager<R: Runtime, D: Downloader, E: Decompressor> {
    runtime: R,
    downloader: D,
    decompressor: E,
    descriptor: PackageDescriptor,
    rules: StageRules,
}

impl<R: Runtime, D: Downloader, E: Decompressor> Packager<R, D, E> {
    pub fn new(runtime: R, downloader: D, decompressor: E, descriptor: PackageDescriptor) -> Self {
        Self {
            runtime,
            downloader,
            decompressor,
            descriptor,
            rules: StageRules::default(),
        }
    }

    /// Fetches and stages a complete package into `output`.
    ///
    /// The scratch directory is registered with `cleanup_ctx`; the caller
    /// removes it once the run is over, whatever the outcome. Nothing is
    /// written to `output` until the whole package, `meta.json` included,
    /// has been assembled in the scratch directory.
    #[tracing::instrument(skip(self, cleanup_ctx))]
    pub async fn package(
        &self,
        platform: &Platform,
        output: &Path,
        verify: bool,
        cleanup_ctx: &SharedCleanupContext,
    ) -> Result<PackageMeta> {
        println!(
            "   resolving {} {} for {}",
            self.descriptor.name, self.descriptor.version, platform
        );
        let assets = resolve_all(platform.os, &self.descriptor);

        if !platform.has_native_binary() {
            warn!(
                "No {} binary is published; using the {} build for {}",
                platform.arch, RELEASE_ARCH, platform.os
            );
        }

        let work_dir = self.prepare_work_dir(platform, cleanup_ctx)?;
        let fetched = self.fetch(&assets, &work_dir, verify).await?;

        let staging_dir = work_dir.join(STAGING_DIR);
        self.runtime.create_dir_all(&staging_dir)?;
        let staged = stage(&self.runtime, &self.rules, &fetched, &staging_dir)?;

        let meta = PackageMeta {
            descriptor: self.descriptor.clone(),
            platform: platform.clone(),
            linkage: describe_linkage(),
            files: staged.into_iter().map(|f| f.destination).collect(),
        };
        meta.save(&self.runtime, &staging_dir.join(META_FILE_NAME))?;

        self.publish(&staging_dir, &meta.files, output, cleanup_ctx)?;
        info!("Published {:?}", output.join(META_FILE_NAME));

        Ok(meta)
    }

    /// Copies the staged package into `output`, `meta.json` last.
    ///
    /// Each copied file is registered with `cleanup_ctx` until every copy has
    /// succeeded, so a failure or an interrupt midway removes the files
    /// already written instead of leaving a package without `meta.json`.
    fn publish(
        &self,
        staging_dir: &Path,
        files: &[String],
        output: &Path,
        cleanup_ctx: &SharedCleanupContext,
    ) -> Result<()> {
        let entries = files
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(META_FILE_NAME));

        let mut published = Vec::new();
        for entry in entries {
            let dest = output.join(entry);
            if let Some(parent) = dest.parent() {
                self.runtime.create_dir_all(parent)?;
            }
            cleanup::lock(cleanup_ctx).add(dest.clone());
            self.runtime.copy(&staging_dir.join(entry), &dest)?;
            println!("      staged {}", entry);
            published.push(dest);
        }

        let mut ctx = cleanup::lock(cleanup_ctx);
        for dest in &published {
            ctx.remove(dest);
        }
        Ok(())
    }

    /// Downloads every asset into `work_dir`, decompressing as needed.
    /// Returns the paths of the files ready for staging.
    #[tracing::instrument(skip(self, assets))]
    pub async fn fetch(
        &self,
        assets: &[RemoteAsset],
        work_dir: &Path,
        verify: bool,
    ) -> Result<Vec<PathBuf>> {
        let mut fetched = Vec::with_capacity(assets.len());

        for asset in assets {
            let dest = work_dir.join(&asset.local_name);
            println!(" downloading {}", asset.url);
            self.downloader
                .download(&self.runtime, &asset.url, &dest)
                .await
                .map_err(|e| PackageError::NetworkFailure {
                    url: asset.url.clone(),
                    reason: format!("{:#}", e),
                })?;

            if !asset.compressed {
                fetched.push(dest);
                continue;
            }

            if verify {
                self.verify_checksum(asset, &dest).await?;
            }

            let artifact = self.decompressor.decompress(&self.runtime, &dest)?;
            inspect_artifact(&self.runtime, &artifact)?;
            fetched.push(artifact);
        }

        Ok(fetched)
    }

    async fn verify_checksum(&self, asset: &RemoteAsset, path: &Path) -> Result<()> {
        let url = checksum::checksum_url(&asset.url);
        let content = self
            .downloader
            .fetch_text(&url)
            .await
            .map_err(|e| PackageError::NetworkFailure {
                url: url.clone(),
                reason: format!("{:#}", e),
            })?;
        let expected = checksum::parse_checksum(&content)
            .with_context(|| format!("Invalid checksum file {}", url))?;

        checksum::verify_file(&self.runtime, path, &expected)?;
        debug!("Checksum verified for {:?}", path);
        Ok(())
    }

    /// Creates an empty scratch directory for this run.
    fn prepare_work_dir(
        &self,
        platform: &Platform,
        cleanup_ctx: &SharedCleanupContext,
    ) -> Result<PathBuf> {
        let work_dir = self.runtime.temp_dir().join(format!(
            "{}-{}-{}-{}",
            self.descriptor.name,
            self.descriptor.version,
            platform.os.as_str().to_lowercase(),
            std::process::id()
        ));

        if self.runtime.exists(&work_dir) {
            self.runtime.remove_dir_all(&work_dir)?;
        }
        cleanup::lock(cleanup_ctx).add(work_dir.clone());
        self.runtime.create_dir_all(&work_dir.join(HEADER_DIR))?;

        debug!("Work directory: {:?}", work_dir);
        Ok(work_dir)
    }
}
