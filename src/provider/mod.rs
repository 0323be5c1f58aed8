//! Package providers.
//!
//! A provider turns the raw specs given by a caller into a
//! [`PackageCollection`] whose dependencies are already wired. The resolver
//! only ever talks to the [`PackageProvider`] trait.

mod declaration;
mod registry;

use std::fmt;

use crate::error::ResolveError;
use crate::package::PackageCollection;

pub use declaration::DeclarationProvider;
pub use registry::{Registry, RegistryProvider};

/// Provider kind identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Packages are declared inline by the specs themselves.
    Declaration,
    /// Packages are looked up in a registry file.
    Registry,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Declaration => write!(f, "declaration"),
            ProviderKind::Registry => write!(f, "registry"),
        }
    }
}

/// Trait for package providers.
///
/// Implementations return one requested package per input spec, in input
/// order, and fail as a whole rather than returning a partial collection.
#[cfg_attr(test, mockall::automock)]
pub trait PackageProvider: Send + Sync {
    /// Get the provider kind.
    fn kind(&self) -> ProviderKind;

    /// Build the package collection for the given specs.
    fn build_collection(&self, specs: &[String]) -> Result<PackageCollection, ResolveError>;
}
