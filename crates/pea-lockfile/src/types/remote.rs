//! Package remotes.

use serde::Serialize;

/// Where a package's contents come from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Remote {
    /// Git repository at a fixed revision
    Git { repo_url: String, rev: String },
    /// Local tarball with integrity hash
    FileLocal { path: String, hash: String },
    /// Local tarball without integrity hash
    FileLocalNoIntegrity { path: String },
    /// Remote tarball with integrity hash
    FileRemote { url: String, hash: String },
    /// Remote tarball without integrity hash
    FileRemoteNoIntegrity { url: String },
    /// Local directory, copied
    DirectoryLocal { path: String },
    /// Local directory, symlinked
    DirectoryLocalSymLinked { path: String },
}

impl Remote {
    /// Integrity hash, for variants that carry one
    pub fn integrity(&self) -> Option<&str> {
        match self {
            Remote::FileLocal { hash, .. } | Remote::FileRemote { hash, .. } => Some(hash),
            _ => None,
        }
    }

    /// Check if the package lives on the local file system
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Remote::FileLocal { .. }
                | Remote::FileLocalNoIntegrity { .. }
                | Remote::DirectoryLocal { .. }
                | Remote::DirectoryLocalSymLinked { .. }
        )
    }
}
