//! Resolution result.

use std::fmt;

use serde::Serialize;

/// Default separator used when rendering a resolution on one line.
pub const DEFAULT_SEPARATOR: &str = ", ";

/// Ordered, deduplicated package identifiers, dependencies first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Resolution {
    identifiers: Vec<String>,
}

impl Resolution {
    pub(crate) fn new(identifiers: Vec<String>) -> Self {
        Self { identifiers }
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.iter().any(|id| id == identifier)
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn join(&self, separator: &str) -> String {
        self.identifiers.join(separator)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(DEFAULT_SEPARATOR))
    }
}
