//! Registry-backed package provider.
//!
//! The registry is a JSON document mapping each known package to its single
//! dependency:
//!
//! ```json
//! { "packages": { "app": "lib", "lib": "core", "core": null } }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{PackageProvider, ProviderKind};
use crate::error::ResolveError;
use crate::package::{
    DeclaredDependency, PackageCollection, PackageId, PackageSpec, name_problem,
};
use crate::runtime::Runtime;

/// Package registry: name -> optional dependency name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub packages: BTreeMap<String, Option<String>>,
}

impl Registry {
    /// Load a registry file through the runtime.
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self, ResolveError> {
        let content =
            runtime
                .read_to_string(path)
                .map_err(|e| ResolveError::RegistryUnavailable {
                    path: path.to_path_buf(),
                    reason: format!("{:#}", e),
                })?;

        let registry: Registry =
            serde_json::from_str(&content).map_err(|e| ResolveError::InvalidRegistry {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        registry.validate(path)?;

        info!(
            "Loaded {} package(s) from registry {:?}",
            registry.len(),
            path
        );
        Ok(registry)
    }

    /// Reject entries whose names could not be written as a package spec.
    fn validate(&self, path: &Path) -> Result<(), ResolveError> {
        for (name, dependency) in &self.packages {
            if let Some(problem) = name_problem(name) {
                return Err(ResolveError::InvalidRegistry {
                    path: path.to_path_buf(),
                    reason: format!("package name '{}' {}", name, problem),
                });
            }
            let Some(dependency) = dependency else {
                continue;
            };
            if let Some(problem) = name_problem(dependency) {
                return Err(ResolveError::InvalidRegistry {
                    path: path.to_path_buf(),
                    reason: format!("dependency '{}' of '{}' {}", dependency, name, problem),
                });
            }
        }
        Ok(())
    }

    /// Add or replace a package entry.
    pub fn insert(&mut self, name: impl Into<String>, dependency: Option<&str>) {
        self.packages
            .insert(name.into(), dependency.map(str::to_string));
    }

    /// Look up a package. `None` means the package is unknown,
    /// `Some(None)` means it is known and has no dependency.
    pub fn dependency_of(&self, name: &str) -> Option<Option<&str>> {
        self.packages.get(name).map(|dep| dep.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// All package names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Resolves package names against a [`Registry`].
///
/// Every requested name and every dependency reached from it must be
/// present in the registry.
#[derive(Debug, Clone)]
pub struct RegistryProvider {
    registry: Registry,
}

impl RegistryProvider {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Create a provider from a registry file.
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self, ResolveError> {
        Registry::load(runtime, path).map(Self::new)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Build the collection for already parsed specs.
    pub fn build(&self, specs: &[PackageSpec]) -> Result<PackageCollection, ResolveError> {
        let mut collection = PackageCollection::new();
        let mut wired = HashSet::new();

        for spec in specs {
            self.verify(spec)?;
            let id = self.wire(&mut collection, &mut wired, &spec.name)?;
            collection.request(id);
        }

        debug!(
            "Built {} package(s) for {} spec(s) from registry",
            collection.len(),
            specs.len()
        );
        Ok(collection)
    }

    /// Check a spec's inline declaration against the registry entry.
    fn verify(&self, spec: &PackageSpec) -> Result<(), ResolveError> {
        let known = self
            .registry
            .dependency_of(&spec.name)
            .ok_or_else(|| ResolveError::UnknownPackage(spec.name.clone()))?;

        let declared = match &spec.dependency {
            DeclaredDependency::Unspecified => return Ok(()),
            DeclaredDependency::Nothing => None,
            DeclaredDependency::On(dep) => Some(dep.as_str()),
        };

        if declared != known {
            return Err(ResolveError::ConflictingDependency {
                package: spec.name.clone(),
                existing: known.map(str::to_string),
                requested: declared.map(str::to_string),
            });
        }
        Ok(())
    }

    /// Insert `name` and wire its chain from the registry.
    ///
    /// Stops at the first package that is already wired, so a cyclic
    /// registry is still walked a bounded number of times. The resolver
    /// reports the cycle itself.
    fn wire(
        &self,
        collection: &mut PackageCollection,
        wired: &mut HashSet<PackageId>,
        name: &str,
    ) -> Result<PackageId, ResolveError> {
        let start = collection.insert(name);
        let mut current = start;

        while wired.insert(current) {
            let identifier = collection.get(current).identifier().to_string();
            let dependency = self
                .registry
                .dependency_of(&identifier)
                .ok_or_else(|| ResolveError::UnknownPackage(identifier.clone()))?;

            let Some(dependency) = dependency else {
                break;
            };
            let next = collection.insert(dependency);
            collection.set_dependency(current, Some(next));
            current = next;
        }

        Ok(start)
    }
}

impl PackageProvider for RegistryProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Registry
    }

    #[tracing::instrument(skip(self))]
    fn build_collection(&self, specs: &[String]) -> Result<PackageCollection, ResolveError> {
        self.build(&PackageSpec::parse_all(specs)?)
    }
}
