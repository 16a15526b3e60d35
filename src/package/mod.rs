mod descriptor;
mod meta;

pub use descriptor::{DEFAULT_BASE_URL, DEFAULT_VERSION, PackageDescriptor};
pub use meta::{META_FILE_NAME, PackageMeta};

use serde::{Deserialize, Serialize};

/// Library name consumers pass to the linker
pub const LINK_NAME: &str = "pact_ffi";

/// Libraries a consumer of the package links against.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LinkageInfo {
    pub libs: Vec<String>,
}

/// The linkage is the same on every platform.
pub fn describe_linkage() -> LinkageInfo {
    LinkageInfo {
        libs: vec![LINK_NAME.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_linkage() {
        assert_eq!(describe_linkage().libs, vec!["pact_ffi".to_string()]);
    }
}
