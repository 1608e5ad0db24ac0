//! Raw lockfile records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Fields of one lockfile entry, in the order they appeared in the file
pub type RawFields = IndexMap<String, RawFieldValue>;

/// Value of a single lockfile field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawFieldValue {
    /// Plain text value (`version "1.0.0"`)
    Scalar(String),
    /// Indented block of sub-fields (`dependencies:`)
    Nested(RawFields),
}

impl RawFieldValue {
    /// Create a scalar value
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    /// Create a nested value from key/value pairs of scalars
    pub fn nested<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Nested(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Self::Scalar(v.into())))
                .collect(),
        )
    }

    /// Scalar text, if this is a scalar
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            RawFieldValue::Scalar(value) => Some(value),
            RawFieldValue::Nested(_) => None,
        }
    }

    /// Nested fields, if this is a nested block
    pub fn as_nested(&self) -> Option<&RawFields> {
        match self {
            RawFieldValue::Nested(fields) => Some(fields),
            RawFieldValue::Scalar(_) => None,
        }
    }

    /// Short name of the shape, for diagnostics
    pub fn shape(&self) -> &'static str {
        match self {
            RawFieldValue::Scalar(_) => "scalar",
            RawFieldValue::Nested(_) => "nested",
        }
    }
}
