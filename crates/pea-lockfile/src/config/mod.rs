//! Conversion options from the `[lockfile]` table of pea.toml
//!
//! ```toml
//! [lockfile]
//! malformed-resolved = "split-first"
//! parallel-threshold = 128
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default batch size at which conversion moves to the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// How to treat a `resolved` value with more than one `#`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedResolvedPolicy {
    /// Report a `MalformedResolved` error
    #[default]
    Reject,
    /// Split at the first `#` and keep the rest as the hash
    SplitFirst,
}

/// Options for converting lockfile records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConversionOptions {
    pub malformed_resolved: MalformedResolvedPolicy,
    /// Batches smaller than this are converted on the calling thread
    pub parallel_threshold: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            malformed_resolved: MalformedResolvedPolicy::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    lockfile: ConversionOptions,
}

impl ConversionOptions {
    /// Read options from pea.toml content, defaults when `[lockfile]` is absent
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let manifest: Manifest = toml::from_str(content).map_err(|e| ConfigError::TomlParse {
            message: e.to_string(),
        })?;
        Ok(manifest.lockfile)
    }

    /// Use the given policy for malformed `resolved` values
    pub fn with_malformed_resolved(mut self, policy: MalformedResolvedPolicy) -> Self {
        self.malformed_resolved = policy;
        self
    }
}
