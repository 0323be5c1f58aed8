//! Package declaration parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::ResolveError;

/// What a spec says about a package's dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredDependency {
    /// Bare reference (`"name"`): the spec says nothing about the dependency.
    Unspecified,
    /// Explicitly dependency-free (`"name:"`).
    Nothing,
    /// Depends on the named package (`"name: dep"`).
    On(String),
}

impl DeclaredDependency {
    /// The dependency name, treating "unspecified" and "nothing" alike.
    pub fn name(&self) -> Option<&str> {
        match self {
            DeclaredDependency::On(dep) => Some(dep),
            _ => None,
        }
    }

    pub fn is_declared(&self) -> bool {
        !matches!(self, DeclaredDependency::Unspecified)
    }
}

/// A package specification as given on the command line.
/// Format: "name", "name:" or "name: dependency"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: String,
    pub dependency: DeclaredDependency,
}

impl PackageSpec {
    /// Bare reference to a package by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependency: DeclaredDependency::Unspecified,
        }
    }

    /// Parse every spec in order, failing on the first invalid one.
    pub fn parse_all<S: AsRef<str>>(specs: &[S]) -> Result<Vec<Self>, ResolveError> {
        specs.iter().map(|s| s.as_ref().parse()).collect()
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.dependency {
            DeclaredDependency::Unspecified => write!(f, "{}", self.name),
            DeclaredDependency::Nothing => write!(f, "{}:", self.name),
            DeclaredDependency::On(dep) => write!(f, "{}: {}", self.name, dep),
        }
    }
}

/// Why `name` cannot be a package name, if it cannot.
pub(crate) fn name_problem(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("is empty")
    } else if name.chars().any(char::is_whitespace) {
        Some("contains whitespace")
    } else if name.contains(':') {
        Some("contains ':'")
    } else {
        None
    }
}

fn check_name<'a>(spec: &str, name: &'a str, what: &str) -> Result<&'a str, ResolveError> {
    if let Some(problem) = name_problem(name) {
        return Err(ResolveError::invalid_spec(
            spec,
            format!("{} '{}' {}", what, name, problem),
        ));
    }
    Ok(name)
}

impl FromStr for PackageSpec {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let name = parts.next().unwrap_or_default().trim();
        let rest = parts.next().map(str::trim);

        if parts.next().is_some() {
            return Err(ResolveError::invalid_spec(
                s,
                "expected 'name' or 'name: dependency'",
            ));
        }
        if name.is_empty() {
            return Err(ResolveError::invalid_spec(s, "package name cannot be empty"));
        }
        let name = check_name(s, name, "package name")?;

        let dependency = match rest {
            None => DeclaredDependency::Unspecified,
            Some("") => DeclaredDependency::Nothing,
            Some(dep) => DeclaredDependency::On(check_name(s, dep, "dependency")?.to_string()),
        };

        Ok(PackageSpec {
            name: name.to_string(),
            dependency,
        })
    }
}
