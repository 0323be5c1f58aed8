pub mod commands;
pub mod error;
pub mod package;
pub mod provider;
pub mod resolver;
pub mod runtime;

pub use error::ResolveError;
pub use package::{Package, PackageCollection, PackageId, PackageSpec};
pub use provider::{DeclarationProvider, PackageProvider, Registry, RegistryProvider};
pub use resolver::{Resolution, Resolver, resolve_collection};
