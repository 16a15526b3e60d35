//! Environment and system directory lookups.

use std::env;
use std::path::PathBuf;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn env_var_impl(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn temp_dir_impl(&self) -> PathBuf {
        env::temp_dir()
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};

    #[test]
    fn test_real_runtime_env_and_dirs() {
        let runtime = RealRuntime;

        // PATH exists on every supported host
        assert!(runtime.env_var("PATH").is_ok());
        assert!(
            runtime
                .env_var("PACT_FFI_PKG_SURELY_UNSET_VARIABLE")
                .is_err()
        );

        let temp = runtime.temp_dir();
        assert!(temp.is_absolute() || cfg!(windows));
    }
}
