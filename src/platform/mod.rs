//! Target platform selection
//!
//! The release only ships binaries for three operating systems, so the
//! operating system is a closed enum. Anything else is rejected as early as
//! possible, before any download starts.

mod detection;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PackageError;

pub use detection::{host_arch, host_os};

/// Architecture every released binary is built for.
pub const RELEASE_ARCH: &str = "x86_64";

/// Operating systems with a published binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformKey {
    Windows,
    Linux,
    Macos,
}

impl PlatformKey {
    pub const ALL: [PlatformKey; 3] = [
        PlatformKey::Windows,
        PlatformKey::Linux,
        PlatformKey::Macos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformKey::Windows => "Windows",
            PlatformKey::Linux => "Linux",
            PlatformKey::Macos => "Macos",
        }
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformKey {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" | "win" | "win32" => Ok(PlatformKey::Windows),
            "linux" => Ok(PlatformKey::Linux),
            "macos" | "macosx" | "darwin" | "osx" => Ok(PlatformKey::Macos),
            _ => Err(PackageError::UnsupportedPlatform(s.to_string())),
        }
    }
}

/// Operating system plus architecture of the package being built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub os: PlatformKey,
    pub arch: String,
}

impl Platform {
    /// Builds a platform from user-supplied values, falling back to the host
    /// for anything left out.
    pub fn from_settings(os: Option<&str>, arch: Option<&str>) -> Result<Self, PackageError> {
        let os = match os {
            Some(os) => os.parse()?,
            None => host_os().parse()?,
        };
        let arch = arch.map(str::to_string).unwrap_or_else(host_arch);
        Ok(Self { os, arch })
    }

    /// Whether a binary for this exact architecture is published.
    pub fn has_native_binary(&self) -> bool {
        matches!(self.arch.as_str(), "x86_64" | "amd64" | "x64")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}
