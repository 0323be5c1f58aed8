//! Package model
//!
//! Packages produced by a provider live in a [`PackageCollection`] arena.
//! A package's single dependency is an index into the same arena, so the
//! collection owns every package for the duration of one resolution.

mod spec;

use std::collections::HashMap;

pub use spec::{DeclaredDependency, PackageSpec};
pub(crate) use spec::name_problem;

/// Index of a package inside its [`PackageCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(usize);

/// A named unit with at most one direct dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    identifier: String,
    dependency: Option<PackageId>,
}

impl Package {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn dependency(&self) -> Option<PackageId> {
        self.dependency
    }
}

/// Arena of packages built for a single resolution request.
///
/// Besides the packages themselves, the collection remembers which packages
/// were requested and in what order. Requesting the same package twice keeps
/// both entries; deduplication is the resolver's job.
#[derive(Debug, Clone, Default)]
pub struct PackageCollection {
    packages: Vec<Package>,
    by_name: HashMap<String, PackageId>,
    requested: Vec<PackageId>,
}

impl PackageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dependency-free package, or return the id of the package
    /// already known under this name.
    pub fn insert(&mut self, identifier: &str) -> PackageId {
        if let Some(id) = self.by_name.get(identifier) {
            return *id;
        }

        let id = PackageId(self.packages.len());
        self.packages.push(Package {
            identifier: identifier.to_string(),
            dependency: None,
        });
        self.by_name.insert(identifier.to_string(), id);
        id
    }

    /// Wire `package` to depend on `dependency`, replacing any previous link.
    ///
    /// # Panics
    ///
    /// Panics if `package` was not returned by this collection's `insert`.
    pub fn set_dependency(&mut self, package: PackageId, dependency: Option<PackageId>) {
        self.packages[package.0].dependency = dependency;
    }

    /// Append a package to the requested list.
    pub fn request(&mut self, package: PackageId) {
        self.requested.push(package);
    }

    /// Packages in the order they were requested.
    pub fn requested(&self) -> &[PackageId] {
        &self.requested
    }

    /// # Panics
    ///
    /// Panics if `id` was not returned by this collection's `insert`.
    pub fn get(&self, id: PackageId) -> &Package {
        &self.packages[id.0]
    }

    pub fn lookup(&self, identifier: &str) -> Option<PackageId> {
        self.by_name.get(identifier).copied()
    }

    /// Dependency of the package with the given id, resolved to the package itself.
    pub fn dependency_of(&self, id: PackageId) -> Option<&Package> {
        self.get(id).dependency.map(|dep| self.get(dep))
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PackageId, &Package)> {
        self.packages
            .iter()
            .enumerate()
            .map(|(index, package)| (PackageId(index), package))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_returns_existing_id() {
        let mut collection = PackageCollection::new();
        let first = collection.insert("a");
        let second = collection.insert("a");
        assert_eq!(first, second);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_set_dependency_links_packages() {
        let mut collection = PackageCollection::new();
        let a = collection.insert("a");
        let b = collection.insert("b");
        collection.set_dependency(a, Some(b));

        assert_eq!(collection.get(a).dependency(), Some(b));
        assert_eq!(collection.dependency_of(a).unwrap().identifier(), "b");
        assert!(collection.dependency_of(b).is_none());
    }

    #[test]
    fn test_requested_keeps_order_and_duplicates() {
        let mut collection = PackageCollection::new();
        let x = collection.insert("x");
        let y = collection.insert("y");
        collection.request(y);
        collection.request(x);
        collection.request(y);

        assert_eq!(collection.requested(), &[y, x, y]);
    }

    #[test]
    #[should_panic]
    fn test_get_with_foreign_id_panics() {
        let mut other = PackageCollection::new();
        other.insert("a");
        let foreign = other.insert("b");

        let mut collection = PackageCollection::new();
        collection.insert("x");
        collection.get(foreign);
    }

    #[test]
    fn test_lookup_and_iter() {
        let mut collection = PackageCollection::new();
        assert!(collection.is_empty());
        collection.insert("a");
        let b = collection.insert("b");

        assert_eq!(collection.lookup("b"), Some(b));
        assert_eq!(collection.lookup("c"), None);

        let names: Vec<&str> = collection.iter().map(|(_, p)| p.identifier()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
