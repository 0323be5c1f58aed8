//! Provider that builds packages from inline declarations.

use std::collections::HashMap;

use log::debug;

use super::{PackageProvider, ProviderKind};
use crate::error::ResolveError;
use crate::package::{PackageCollection, PackageId, PackageSpec};

/// Builds the collection purely from `"name: dependency"` specs.
///
/// A dependency that is never declared itself becomes a dependency-free
/// package. Bare names only reference a package; they never conflict with
/// an explicit declaration.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclarationProvider;

impl DeclarationProvider {
    pub fn new() -> Self {
        Self
    }

    /// Build a collection from already parsed specs.
    pub fn build(&self, specs: &[PackageSpec]) -> Result<PackageCollection, ResolveError> {
        let mut collection = PackageCollection::new();
        let mut declared: HashMap<PackageId, Option<PackageId>> = HashMap::new();

        for spec in specs {
            let id = collection.insert(&spec.name);

            if spec.dependency.is_declared() {
                let dependency = spec.dependency.name().map(|dep| collection.insert(dep));

                match declared.get(&id).copied() {
                    Some(existing) if existing != dependency => {
                        let name_of = |dep: Option<PackageId>| {
                            dep.map(|d| collection.get(d).identifier().to_string())
                        };
                        return Err(ResolveError::ConflictingDependency {
                            package: spec.name.clone(),
                            existing: name_of(existing),
                            requested: name_of(dependency),
                        });
                    }
                    Some(_) => {}
                    None => {
                        debug!("Declared {}", spec);
                        collection.set_dependency(id, dependency);
                        declared.insert(id, dependency);
                    }
                }
            }

            collection.request(id);
        }

        Ok(collection)
    }
}

impl PackageProvider for DeclarationProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Declaration
    }

    #[tracing::instrument(skip(self))]
    fn build_collection(&self, specs: &[String]) -> Result<PackageCollection, ResolveError> {
        let specs = PackageSpec::parse_all(specs)?;
        self.build(&specs)
    }
}
