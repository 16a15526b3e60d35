//! Release asset resolution
//!
//! Maps a target operating system to the files published on the release
//! page. Resolution is pure: nothing is downloaded or written here.

use serde::Serialize;
use std::fmt;

use crate::package::PackageDescriptor;
use crate::platform::{PlatformKey, RELEASE_ARCH};

/// Header files shipped with every release, fetched into `include/`
pub const HEADER_FILES: [&str; 2] = ["pact.h", "pact-cpp.h"];

/// Directory headers are fetched into, relative to the work directory
pub const HEADER_DIR: &str = "include";

/// A single file to fetch from the release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteAsset {
    pub url: String,
    /// Path relative to the work directory the download is written to
    pub local_name: String,
    /// Whether the download is gzip compressed and must be decompressed
    pub compressed: bool,
}

impl RemoteAsset {
    fn compressed(desc: &PackageDescriptor, remote_name: &str, local_name: &str) -> Self {
        Self {
            url: desc.download_url(remote_name),
            local_name: local_name.to_string(),
            compressed: true,
        }
    }

    fn header(desc: &PackageDescriptor, name: &str) -> Self {
        Self {
            url: desc.download_url(name),
            local_name: format!("{}/{}", HEADER_DIR, name),
            compressed: false,
        }
    }
}

impl fmt::Display for RemoteAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.url, self.local_name)
    }
}

/// Resolves the platform-specific library assets for a release.
///
/// Windows ships the DLL and its import library, Linux and Macos a single
/// shared library. Every release binary is x86_64.
#[tracing::instrument(skip(desc))]
pub fn resolve(os: PlatformKey, desc: &PackageDescriptor) -> Vec<RemoteAsset> {
    match os {
        PlatformKey::Windows => vec![
            RemoteAsset::compressed(
                desc,
                &format!("pact_ffi-windows-{}.dll.gz", RELEASE_ARCH),
                "pact_ffi.dll.gz",
            ),
            RemoteAsset::compressed(
                desc,
                &format!("pact_ffi-windows-{}.dll.lib.gz", RELEASE_ARCH),
                "pact_ffi.lib.gz",
            ),
        ],
        PlatformKey::Linux => vec![RemoteAsset::compressed(
            desc,
            &format!("libpact_ffi-linux-{}.so.gz", RELEASE_ARCH),
            "libpact_ffi.so.gz",
        )],
        PlatformKey::Macos => vec![RemoteAsset::compressed(
            desc,
            &format!("libpact_ffi-osx-{}.dylib.gz", RELEASE_ARCH),
            "libpact_ffi.dylib.gz",
        )],
    }
}

/// Header assets, identical for every platform.
pub fn header_assets(desc: &PackageDescriptor) -> Vec<RemoteAsset> {
    HEADER_FILES
        .iter()
        .map(|name| RemoteAsset::header(desc, name))
        .collect()
}

/// Every asset of a package: platform libraries first, then headers.
pub fn resolve_all(os: PlatformKey, desc: &PackageDescriptor) -> Vec<RemoteAsset> {
    let mut assets = resolve(os, desc);
    assets.extend(header_assets(desc));
    assets
}
