use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use std::time::Duration;

use crate::{
    archive::{Decompressor, GzipDecompressor},
    download::{Downloader, HttpDownloader},
    http::{HttpClient, RETRY_DELAY_MS, RetryPolicy},
    package::PackageDescriptor,
    runtime::Runtime,
};

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Network settings taken from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkOptions {
    pub attempts: usize,
    pub timeout: Duration,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            attempts: crate::http::MAX_RETRIES,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Everything a packaging run needs, assembled once at startup.
pub struct Config<R: Runtime, D: Downloader, E: Decompressor> {
    pub runtime: R,
    pub downloader: D,
    pub decompressor: E,
    pub descriptor: PackageDescriptor,
}

impl<R: Runtime> Config<R, HttpDownloader, GzipDecompressor> {
    pub fn new(runtime: R, descriptor: PackageDescriptor, network: NetworkOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(token) = runtime.env_var("GITHUB_TOKEN")
            && !token.is_empty()
        {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using GITHUB_TOKEN for authentication: {}", mask_token(&token));
        }

        let client = Client::builder()
            .user_agent(concat!("pact-ffi-pkg/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(network.timeout)
            .build()?;

        let policy = RetryPolicy::new(network.attempts, Duration::from_millis(RETRY_DELAY_MS));
        let downloader = HttpDownloader::new(HttpClient::with_policy(client, policy));

        Ok(Self {
            runtime,
            downloader,
            decompressor: GzipDecompressor,
            descriptor,
        })
    }
}

/// Keeps only the ends of a token for log output.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockito::{Matcher, Server};

    fn descriptor() -> PackageDescriptor {
        PackageDescriptor::new("0.0.4", None).unwrap()
    }

    /// Verifies the Authorization header sent for a given GITHUB_TOKEN value
    async fn verify_authorization_header(token: Option<&str>) {
        let mut runtime = MockRuntime::new();
        let token_clone = token.map(|t| t.to_string());
        runtime
            .expect_env_var()
            .with(mockall::predicate::eq("GITHUB_TOKEN"))
            .returning(move |_| token_clone.clone().ok_or(std::env::VarError::NotPresent));

        let mut server = Server::new_async().await;
        let expected_header = match token {
            Some(t) => Matcher::Exact(format!("Bearer {}", t)),
            None => Matcher::Missing,
        };
        let mock = server
            .mock("GET", "/")
            .match_header("Authorization", expected_header)
            .create_async()
            .await;

        let config = Config::new(runtime, descriptor(), NetworkOptions::default()).unwrap();
        let client = config.downloader.http_client().inner();
        let _ = client.get(server.url()).send().await;

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_config_new_with_github_token() {
        verify_authorization_header(Some("ghp_0123456789abcdef")).await;
    }

    #[tokio::test]
    async fn test_config_new_without_github_token() {
        verify_authorization_header(None).await;
    }

    #[test]
    fn test_config_retry_policy_from_options() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .returning(|_| Err(std::env::VarError::NotPresent));

        let network = NetworkOptions {
            attempts: 1,
            timeout: Duration::from_secs(5),
        };
        let config = Config::new(runtime, descriptor(), network).unwrap();
        assert_eq!(config.downloader.http_client().policy().attempts, 1);
        assert_eq!(config.descriptor.version, "0.0.4");
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("short"), "*********");
        assert_eq!(mask_token("ghp_0123456789abcdef"), "ghp_*********cdef");
    }
}
