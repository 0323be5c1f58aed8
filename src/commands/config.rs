use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

use crate::{
    provider::{DeclarationProvider, PackageProvider, RegistryProvider},
    runtime::Runtime,
};

use super::{OutputFormat, paths::default_registry_path};

pub struct Config<R: Runtime> {
    pub runtime: R,
    pub registry: Option<PathBuf>,
    pub format: OutputFormat,
}

impl<R: Runtime> Config<R> {
    pub fn new(runtime: R, registry: Option<PathBuf>, format: OutputFormat) -> Self {
        Self {
            runtime,
            registry,
            format,
        }
    }

    /// Registry to resolve against.
    ///
    /// An explicit registry is always used. The default registry is only
    /// picked up when it exists; otherwise specs are plain declarations.
    pub fn registry_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.registry {
            return Some(path.clone());
        }

        default_registry_path(&self.runtime).filter(|path| {
            let exists = self.runtime.exists(path);
            if !exists {
                debug!("No registry at {:?}, using declarations", path);
            }
            exists
        })
    }

    /// Build the package provider for this configuration.
    pub fn provider(&self) -> Result<Box<dyn PackageProvider>> {
        match self.registry_path() {
            Some(path) => {
                info!("Using package registry: {}", path.display());
                let provider = RegistryProvider::load(&self.runtime, &path)
                    .context("Failed to load package registry")?;
                Ok(Box::new(provider))
            }
            None => Ok(Box::new(DeclarationProvider::new())),
        }
    }
}
