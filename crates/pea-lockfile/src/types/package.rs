//! Converted package descriptors.

use serde::Serialize;

use super::{PackageKey, Remote};

/// A lockfile entry after conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Exact resolved version
    pub version: String,
    /// Where the package is fetched from, `None` for entries without a source
    pub remote: Option<Remote>,
    pub dependencies: Vec<PackageKey>,
    pub optional_dependencies: Vec<PackageKey>,
}
