//! Sanity check of fetched libraries.
//!
//! A release asset that decompresses fine can still be the wrong thing, for
//! example a Mach-O build uploaded under a Linux name. The check only warns:
//! the published binaries are opaque and staging continues regardless.

use anyhow::Result;
use goblin::Object;
use log::{debug, warn};
use std::fmt;
use std::path::Path;

use crate::runtime::Runtime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryFormat {
    Elf,
    Pe,
    MachO,
    /// `ar` archive, the container of Windows import libraries
    Archive,
    Unknown,
}

impl fmt::Display for BinaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinaryFormat::Elf => "ELF",
            BinaryFormat::Pe => "PE",
            BinaryFormat::MachO => "Mach-O",
            BinaryFormat::Archive => "ar archive",
            BinaryFormat::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

pub fn detect_format(bytes: &[u8]) -> BinaryFormat {
    match Object::parse(bytes) {
        Ok(Object::Elf(_)) => BinaryFormat::Elf,
        Ok(Object::PE(_)) => BinaryFormat::Pe,
        Ok(Object::Mach(_)) => BinaryFormat::MachO,
        Ok(Object::Archive(_)) => BinaryFormat::Archive,
        Ok(_) => BinaryFormat::Unknown,
        Err(e) => {
            debug!("Unrecognized binary: {}", e);
            BinaryFormat::Unknown
        }
    }
}

/// Format a library file is expected to have, judged by its extension.
pub fn expected_format(path: &Path) -> Option<BinaryFormat> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "so" => Some(BinaryFormat::Elf),
        "dylib" => Some(BinaryFormat::MachO),
        "dll" => Some(BinaryFormat::Pe),
        "lib" => Some(BinaryFormat::Archive),
        _ => None,
    }
}

/// Detects the format of a fetched library and warns when it does not match
/// its file name. Files with no expected format are not read.
#[tracing::instrument(skip(runtime))]
pub fn inspect_artifact<R: Runtime>(runtime: &R, path: &Path) -> Result<Option<BinaryFormat>> {
    let Some(expected) = expected_format(path) else {
        return Ok(None);
    };

    let bytes = runtime.read(path)?;
    let actual = detect_format(&bytes);
    if actual != expected {
        warn!(
            "{} does not look like a {} binary (detected {})",
            path.display(),
            expected,
            actual
        );
    } else {
        debug!("{} is a {} binary", path.display(), actual);
    }
    Ok(Some(actual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use std::path::PathBuf;

    #[test]
    fn test_expected_format() {
        assert_eq!(
            expected_format(Path::new("libpact_ffi.so")),
            Some(BinaryFormat::Elf)
        );
        assert_eq!(
            expected_format(Path::new("libpact_ffi.dylib")),
            Some(BinaryFormat::MachO)
        );
        assert_eq!(
            expected_format(Path::new("pact_ffi.DLL")),
            Some(BinaryFormat::Pe)
        );
        assert_eq!(
            expected_format(Path::new("pact_ffi.lib")),
            Some(BinaryFormat::Archive)
        );
        assert_eq!(expected_format(Path::new("include/pact.h")), None);
        assert_eq!(expected_format(Path::new("LICENSE")), None);
    }

    #[test]
    fn test_detect_garbage_is_unknown() {
        assert_eq!(detect_format(b""), BinaryFormat::Unknown);
        assert_eq!(
            detect_format(b"<html>Not Found</html>"),
            BinaryFormat::Unknown
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_detect_elf_from_running_binary() {
        let exe = std::env::current_exe().unwrap();
        let bytes = std::fs::read(exe).unwrap();
        assert_eq!(detect_format(&bytes), BinaryFormat::Elf);
    }

    #[test_log::test]
    fn test_inspect_mismatch_is_not_an_error() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read()
            .with(mockall::predicate::eq(PathBuf::from("work/libpact_ffi.so")))
            .returning(|_| Ok(b"not a shared object".to_vec()));

        let result = inspect_artifact(&runtime, Path::new("work/libpact_ffi.so")).unwrap();
        assert_eq!(result, Some(BinaryFormat::Unknown));
    }

    #[test]
    fn test_inspect_skips_headers() {
        // No expectations: reading the header would panic
        let runtime = MockRuntime::new();
        let result = inspect_artifact(&runtime, Path::new("work/include/pact.h")).unwrap();
        assert_eq!(result, None);
    }
}
