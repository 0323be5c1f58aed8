//! Environment and system information operations.

use std::env;
use std::path::PathBuf;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn env_var_impl(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn config_dir_impl(&self) -> Option<PathBuf> {
        dirs::config_dir()
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};

    #[test]
    fn test_real_runtime_env_and_dirs() {
        let runtime = RealRuntime;

        // PATH should exist on all systems
        assert!(runtime.env_var("PATH").is_ok());
        assert!(
            runtime
                .env_var("PKGCHAIN_TEST_SURELY_UNSET_VARIABLE")
                .is_err()
        );

        // CI might not have a config dir
        let config = runtime.config_dir();
        assert!(config.is_none_or(|dir| dir.is_absolute()));
    }
}
