//! The `SourceUnit` contract
//!
//! A source unit is one identifiable piece of source code (a Go package, a
//! Ruby gem, a loose collection of scripts) that the toolchain tracks. Every
//! kind exposes the same four projections so callers can treat units
//! polymorphically once they come out of the registry.

use std::fmt;
use std::path::is_separator;

use serde::{Deserialize, Serialize};

/// Literal key a unit kind is registered under (e.g. `GoPackage`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitKind(String);

impl UnitKind {
    /// Create a kind key.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// The kind key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

/// Trait that all unit kinds implement.
///
/// Implementations hold immutable data and every method is a pure read.
pub trait SourceUnit: fmt::Debug + Send + Sync {
    /// The key this kind is registered under.
    fn kind(&self) -> &'static str;

    /// Namespaced identifier, unique across every registered kind.
    fn id(&self) -> String;

    /// Short human-facing label.
    fn name(&self) -> String;

    /// Directory the unit is rooted at, exactly as supplied.
    fn root_dir(&self) -> &str;

    /// Filesystem paths the unit spans.
    fn paths(&self) -> Vec<String>;
}

/// Final path segment of `dir`, used as a display name.
///
/// Trailing separators are ignored, an empty path yields `"."` and a path
/// made only of separators yields `"/"`.
#[must_use]
pub fn display_name(dir: &str) -> String {
    if dir.is_empty() {
        return ".".to_string();
    }

    let trimmed = dir.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return "/".to_string();
    }

    match trimmed.rfind(is_separator) {
        Some(idx) => trimmed[idx + 1..].to_string(),
        None => trimmed.to_string(),
    }
}
