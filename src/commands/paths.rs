use log::debug;
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "PKGCHAIN_CONFIG_DIR";

const REGISTRY_FILE: &str = "registry.json";

/// Get the configuration directory
///
/// `PKGCHAIN_CONFIG_DIR` wins over the platform config directory
/// (`~/.config/pkgchain` on Linux).
#[tracing::instrument(skip(runtime))]
pub fn config_dir<R: Runtime>(runtime: &R) -> Option<PathBuf> {
    match runtime.env_var(CONFIG_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => runtime.config_dir().map(|dir| dir.join("pkgchain")),
    }
}

/// Get the default registry location, whether or not it exists
#[tracing::instrument(skip(runtime))]
pub fn default_registry_path<R: Runtime>(runtime: &R) -> Option<PathBuf> {
    let path = config_dir(runtime)?.join(REGISTRY_FILE);
    debug!("Default registry path: {:?}", path);
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    #[test]
    fn test_default_registry_path_uses_config_dir() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq(CONFIG_DIR_ENV))
            .returning(|_| Err(std::env::VarError::NotPresent));
        runtime
            .expect_config_dir()
            .returning(|| Some(PathBuf::from("/home/user/.config")));

        assert_eq!(
            default_registry_path(&runtime),
            Some(PathBuf::from("/home/user/.config/pkgchain/registry.json"))
        );
    }

    #[test]
    fn test_default_registry_path_env_override() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq(CONFIG_DIR_ENV))
            .returning(|_| Ok("/etc/pkgchain".to_string()));
        runtime.expect_config_dir().never();

        assert_eq!(
            default_registry_path(&runtime),
            Some(PathBuf::from("/etc/pkgchain/registry.json"))
        );
    }

    #[test]
    fn test_empty_env_override_is_ignored() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .returning(|_| Ok(String::new()));
        runtime.expect_config_dir().returning(|| None);

        assert_eq!(default_registry_path(&runtime), None);
    }
}
