use anyhow::Result;
use log::debug;

use crate::package::PackageDescriptor;
use crate::platform::Platform;
use crate::resolve::{RemoteAsset, resolve_all};

/// Resolves the assets of a package without downloading them.
#[tracing::instrument(skip(descriptor))]
pub fn resolve_assets(
    descriptor: &PackageDescriptor,
    os: Option<&str>,
    arch: Option<&str>,
) -> Result<(Platform, Vec<RemoteAsset>)> {
    let platform = Platform::from_settings(os, arch)?;
    let assets = resolve_all(platform.os, descriptor);
    debug!("Resolved {} asset(s) for {}", assets.len(), platform);
    Ok((platform, assets))
}

/// Prints one `url -> local name` line per asset.
pub fn print_assets(
    descriptor: &PackageDescriptor,
    os: Option<&str>,
    arch: Option<&str>,
) -> Result<()> {
    let (platform, assets) = resolve_assets(descriptor, os, arch)?;
    println!("{} {} ({})", descriptor.name, descriptor.version, platform);
    for asset in &assets {
        println!("  {}", asset);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PackageError;
    use crate::platform::PlatformKey;

    #[test]
    fn test_resolve_assets_windows() {
        let descriptor = PackageDescriptor::new("0.0.4", None).unwrap();
        let (platform, assets) =
            resolve_assets(&descriptor, Some("windows"), Some("x86_64")).unwrap();

        assert_eq!(platform.os, PlatformKey::Windows);
        let names: Vec<&str> = assets.iter().map(|a| a.local_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "pact_ffi.dll.gz",
                "pact_ffi.lib.gz",
                "include/pact.h",
                "include/pact-cpp.h"
            ]
        );
    }

    #[test]
    fn test_resolve_assets_unsupported() {
        let descriptor = PackageDescriptor::new("0.0.4", None).unwrap();
        let err = resolve_assets(&descriptor, Some("FreeBSD"), None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackageError>(),
            Some(PackageError::UnsupportedPlatform(_))
        ));
    }
}
