use crate::http::HttpClient;
use crate::runtime::Runtime;
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::path::Path;

/// Fetches remote files.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Downloads `url` into `dest`, returning the number of bytes written.
    async fn download<R: Runtime>(&self, runtime: &R, url: &str, dest: &Path) -> Result<u64>;

    /// Fetches a small text resource.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Downloader backed by [`HttpClient`], with its retry policy.
#[derive(Clone)]
pub struct HttpDownloader {
    http_client: HttpClient,
}

impl HttpDownloader {
    pub fn new(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    #[tracing::instrument(skip(self, runtime, dest))]
    async fn download<R: Runtime>(&self, runtime: &R, url: &str, dest: &Path) -> Result<u64> {
        info!("Downloading file from {}...", url);

        let bytes = self
            .http_client
            .download_file(url, || {
                runtime
                    .create_file(dest)
                    .with_context(|| format!("Failed to create download file at {:?}", dest))
            })
            .await?;

        info!("Download complete ({} bytes).", bytes);
        Ok(bytes)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.http_client.get_text(url).await
    }
}
