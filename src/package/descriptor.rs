use serde::{Deserialize, Serialize};

use crate::error::PackageError;

/// Release version packaged when none is requested
pub const DEFAULT_VERSION: &str = "0.0.4";

/// Repository hosting the release assets
pub const DEFAULT_BASE_URL: &str = "https://github.com/pact-foundation/pact-reference";

/// Static package metadata. Built once at startup and never mutated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
    pub description: String,
    pub license: String,
    pub homepage: String,
    /// Registry the package is published to
    pub url: String,
    /// Repository whose releases carry the binaries
    pub base_url: String,
    pub topics: Vec<String>,
    /// Packages the binaries depend on at runtime. Recorded, not fetched.
    pub requires: Vec<String>,
}

impl PackageDescriptor {
    pub fn new(version: &str, base_url: Option<&str>) -> Result<Self, PackageError> {
        let version = version.trim();
        if version.is_empty() {
            return Err(PackageError::InvalidVersion);
        }

        Ok(Self {
            name: "pact_ffi_dll".to_string(),
            version: version.to_string(),
            description: "Pact/Rust FFI bindings (DLL/Shared Lib)".to_string(),
            license: "MIT".to_string(),
            homepage: DEFAULT_BASE_URL.to_string(),
            url: "https://pactfoundation.jfrog.io/artifactory/pactfoundation-conan/".to_string(),
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            topics: [
                "pact",
                "consumer-driven-contracts",
                "contract-testing",
                "mock-server",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
            requires: vec!["openssl/1.1.1k".to_string()],
        })
    }

    /// Release tag the assets are published under.
    pub fn release_tag(&self) -> String {
        format!("libpact_ffi-v{}", self.version)
    }

    /// URL a release file is downloaded from.
    pub fn download_url(&self, file_name: &str) -> String {
        format!(
            "{}/releases/download/{}/{}",
            self.base_url,
            self.release_tag(),
            file_name
        )
    }
}
