//! Package keys.
//!
//! A lockfile entry is listed under one or more keys such as
//! `lodash@^4.17.0` or `@babel/core@7.0.0`. The key parser upstream splits
//! them into name and version spec; this module holds the typed result.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name part of a package key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PackageKeyName {
    /// Unscoped name (`lodash`)
    Simple(String),
    /// Scoped name (`@babel/core`)
    Scoped { scope: String, name: String },
}

/// One alias under which a package appears in the lockfile
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackageKey {
    pub name: PackageKeyName,
    pub version_spec: String,
}

impl PackageKeyName {
    /// Parse a key name, returning `None` if it is not a valid package name
    pub fn parse(input: &str) -> Option<Self> {
        if input.is_empty() {
            return None;
        }

        match input.strip_prefix('@') {
            Some(scoped) => {
                let (scope, name) = scoped.split_once('/')?;
                if scope.is_empty() || name.is_empty() || name.contains('/') {
                    return None;
                }
                Some(Self::Scoped {
                    scope: scope.to_string(),
                    name: name.to_string(),
                })
            },
            None if input.contains('/') => None,
            None => Some(Self::Simple(input.to_string())),
        }
    }
}

impl fmt::Display for PackageKeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageKeyName::Simple(name) => f.write_str(name),
            PackageKeyName::Scoped { scope, name } => write!(f, "@{}/{}", scope, name),
        }
    }
}

impl PackageKey {
    /// Create a new package key
    pub fn new(name: PackageKeyName, version_spec: impl Into<String>) -> Self {
        Self {
            name,
            version_spec: version_spec.into(),
        }
    }

    /// Create a key with an unscoped name
    pub fn simple(name: impl Into<String>, version_spec: impl Into<String>) -> Self {
        Self::new(PackageKeyName::Simple(name.into()), version_spec)
    }
}

impl fmt::Display for PackageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version_spec)
    }
}
