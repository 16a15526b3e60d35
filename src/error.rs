//! Error taxonomy for packaging runs.
//!
//! Every variant is fatal: a run never produces a partial package. Errors are
//! carried through `anyhow::Result` and can be recovered with `downcast_ref`.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageError {
    /// Operating system outside Windows/Linux/Macos
    UnsupportedPlatform(String),
    /// Version string was empty
    InvalidVersion,
    /// A download failed (unreachable host, HTTP error, timeout)
    NetworkFailure { url: String, reason: String },
    /// A downloaded file is not a valid compressed stream
    ExtractionFailure { path: PathBuf, reason: String },
    /// Downloaded bytes do not match the published SHA-256
    ChecksumMismatch {
        file: String,
        expected: String,
        actual: String,
    },
}

impl std::fmt::Display for PackageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageError::UnsupportedPlatform(os) => {
                write!(
                    f,
                    "Unsupported platform '{}': binaries exist only for Windows, Linux and Macos",
                    os
                )
            }
            PackageError::InvalidVersion => write!(f, "Package version cannot be empty"),
            PackageError::NetworkFailure { url, reason } => {
                write!(f, "Failed to download {}: {}", url, reason)
            }
            PackageError::ExtractionFailure { path, reason } => {
                write!(f, "Failed to decompress {}: {}", path.display(), reason)
            }
            PackageError::ChecksumMismatch {
                file,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Checksum mismatch for {}: expected {}, got {}",
                    file, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for PackageError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_platform_display() {
        let err = PackageError::UnsupportedPlatform("FreeBSD".to_string());
        assert!(err.to_string().contains("FreeBSD"));
        assert!(err.to_string().contains("Unsupported platform"));
    }

    #[test]
    fn test_network_failure_display() {
        let err = PackageError::NetworkFailure {
            url: "https://example.com/a.gz".to_string(),
            reason: "Not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to download https://example.com/a.gz: Not found"
        );
    }

    #[test]
    fn test_checksum_mismatch_display() {
        let err = PackageError::ChecksumMismatch {
            file: "libpact_ffi.so.gz".to_string(),
            expected: "aa".to_string(),
            actual: "bb".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("libpact_ffi.so.gz"));
        assert!(msg.contains("expected aa"));
        assert!(msg.contains("got bb"));
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err = anyhow::Error::from(PackageError::InvalidVersion);
        assert_eq!(
            err.downcast_ref::<PackageError>(),
            Some(&PackageError::InvalidVersion)
        );
    }
}
