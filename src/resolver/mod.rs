//! Dependency chain resolution.
//!
//! Each package has at most one dependency, so the packages reachable from a
//! requested package form a single chain. Resolution walks every requested
//! package's chain, concatenates the chains in request order and keeps the
//! first occurrence of each package.
//!
//! A package shared by several chains therefore sits wherever the first
//! chain containing it placed it.

mod resolution;

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::error::ResolveError;
use crate::package::{PackageCollection, PackageId};
use crate::provider::PackageProvider;

pub use resolution::{DEFAULT_SEPARATOR, Resolution};

/// Resolves package specs into an installation order.
pub struct Resolver<'a, P: PackageProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: PackageProvider + ?Sized> Resolver<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Resolve specs into a deduplicated, dependency-first ordering.
    #[tracing::instrument(skip(self))]
    pub fn resolve(&self, specs: &[String]) -> Result<Resolution, ResolveError> {
        debug!(
            "Resolving {} spec(s) with {} provider",
            specs.len(),
            self.provider.kind()
        );
        let collection = self.provider.build_collection(specs)?;
        resolve_collection(&collection)
    }

    /// The chain of a single spec, root first.
    #[tracing::instrument(skip(self))]
    pub fn chain_of(&self, spec: &str) -> Result<Vec<String>, ResolveError> {
        let collection = self.provider.build_collection(&[spec.to_string()])?;
        let Some(&package) = collection.requested().first() else {
            return Ok(Vec::new());
        };

        let chain = gather_chain(&collection, package)?;
        Ok(chain
            .into_iter()
            .map(|id| collection.get(id).identifier().to_string())
            .collect())
    }
}

/// Resolve every requested package of an already built collection.
pub fn resolve_collection(collection: &PackageCollection) -> Result<Resolution, ResolveError> {
    let mut flattened = Vec::new();
    for &package in collection.requested() {
        let chain = gather_chain(collection, package)?;
        debug!(
            "Chain for {}: {} package(s)",
            collection.get(package).identifier(),
            chain.len()
        );
        flattened.extend(chain);
    }

    let mut seen = HashSet::new();
    flattened.retain(|id| seen.insert(*id));

    let resolution = Resolution::new(
        flattened
            .into_iter()
            .map(|id| collection.get(id).identifier().to_string())
            .collect(),
    );
    debug!("Resolved {} package(s)", resolution.len());
    Ok(resolution)
}

/// Walk from `package` through its dependencies and return the chain root
/// first, `package` last.
///
/// Fails with [`ResolveError::CyclicDependency`] when the walk revisits a
/// package; the reported cycle starts and ends with the revisited package.
/// `package` must belong to `collection`.
pub(crate) fn gather_chain(
    collection: &PackageCollection,
    package: PackageId,
) -> Result<Vec<PackageId>, ResolveError> {
    let mut walked: Vec<PackageId> = Vec::new();
    let mut positions: HashMap<PackageId, usize> = HashMap::new();
    let mut current = Some(package);

    while let Some(id) = current {
        if let Some(&start) = positions.get(&id) {
            let cycle = walked[start..]
                .iter()
                .chain(std::iter::once(&id))
                .map(|p| collection.get(*p).identifier().to_string())
                .collect();
            return Err(ResolveError::CyclicDependency { cycle });
        }

        positions.insert(id, walked.len());
        walked.push(id);
        current = collection.get(id).dependency();
    }

    walked.reverse();
    Ok(walked)
}
