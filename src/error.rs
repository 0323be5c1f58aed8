//! Error taxonomy for package resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a package collection or resolving it.
///
/// Every variant aborts the whole resolution; callers never see a partial
/// ordering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A spec string could not be parsed into a package declaration.
    #[error("invalid package spec '{spec}': {reason}")]
    InvalidSpec { spec: String, reason: String },

    /// The provider does not know a package by this name.
    #[error("unknown package: {0}")]
    UnknownPackage(String),

    /// Two declarations give the same package different dependencies.
    #[error(
        "conflicting dependency for '{package}': declared as {}, then as {}",
        describe(.existing),
        describe(.requested)
    )]
    ConflictingDependency {
        package: String,
        existing: Option<String>,
        requested: Option<String>,
    },

    /// The package registry could not be read.
    #[error("package registry {path:?} is unavailable: {reason}")]
    RegistryUnavailable { path: PathBuf, reason: String },

    /// The package registry was read but is not a valid registry document.
    #[error("package registry {path:?} is invalid: {reason}")]
    InvalidRegistry { path: PathBuf, reason: String },

    /// Following dependencies from a package never reaches a root.
    #[error("cyclic dependency: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },
}

fn describe(dependency: &Option<String>) -> String {
    match dependency {
        Some(dep) => format!("'{}'", dep),
        None => "having no dependency".to_string(),
    }
}

impl ResolveError {
    pub(crate) fn invalid_spec(spec: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_path() {
        let err = ResolveError::CyclicDependency {
            cycle: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "cyclic dependency: a -> b -> a");
    }

    #[test]
    fn test_conflict_message() {
        let err = ResolveError::ConflictingDependency {
            package: "x".into(),
            existing: None,
            requested: Some("y".into()),
        };
        assert_eq!(
            err.to_string(),
            "conflicting dependency for 'x': declared as having no dependency, then as 'y'"
        );
    }

    #[test]
    fn test_unknown_package_message() {
        let err = ResolveError::UnknownPackage("ghost".into());
        assert_eq!(err.to_string(), "unknown package: ghost");
    }
}
