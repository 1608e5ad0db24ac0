//! Error types for lockfile conversion.
//!
//! A record can fail in several independent ways at once, so conversion
//! reports a [`ConversionErrors`] set rather than a single error.

use std::fmt;

use thiserror::Error;

/// A single problem found while converting a lockfile record
#[derive(Error, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConversionError {
    #[error("Required field '{name}' is missing")]
    MissingField { name: String },

    #[error("Field '{name}' has the wrong type, expected {expected}")]
    WrongType { name: String, expected: String },

    #[error("Could not determine the remote type of the package")]
    UnknownRemoteType,

    #[error("Resolved value '{value}' contains more than one '#' delimiter")]
    MalformedResolved { value: String },
}

impl ConversionError {
    /// Create a missing field error
    pub fn missing(name: &str) -> Self {
        Self::MissingField {
            name: name.to_string(),
        }
    }

    /// Create a wrong type error for a field decoded as `expected`
    pub fn wrong_type(name: &str, expected: &str) -> Self {
        Self::WrongType {
            name: name.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Name of the field this error is about, if it concerns a single field
    pub fn field(&self) -> Option<&str> {
        match self {
            ConversionError::MissingField { name } | ConversionError::WrongType { name, .. } => {
                Some(name)
            },
            ConversionError::MalformedResolved { .. } => Some("resolved"),
            ConversionError::UnknownRemoteType => None,
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ConversionError::MissingField { .. } => {
                Some("The lockfile entry is incomplete; regenerate the lockfile")
            },
            ConversionError::UnknownRemoteType => {
                Some("Check that the 'resolved' field is a git, file: or absolute URL")
            },
            ConversionError::MalformedResolved { .. } => {
                Some("Set `malformed-resolved = \"split-first\"` under [lockfile] to accept it")
            },
            ConversionError::WrongType { .. } => None,
        }
    }
}

/// Non-empty, duplicate-free set of conversion errors for one record.
///
/// Errors keep the order in which they were first reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionErrors {
    errors: Vec<ConversionError>,
}

impl ConversionErrors {
    /// Start a set with a single error
    pub fn new(error: ConversionError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Add an error unless an equal one is already present
    pub fn push(&mut self, error: ConversionError) {
        if !self.errors.contains(&error) {
            self.errors.push(error);
        }
    }

    /// Union of two error sets, `self` first
    pub fn merge(mut self, other: ConversionErrors) -> Self {
        for error in other.errors {
            self.push(error);
        }
        self
    }

    /// First reported error
    pub fn first(&self) -> &ConversionError {
        // Never empty: every constructor starts from one error.
        &self.errors[0]
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false, present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, error: &ConversionError) -> bool {
        self.errors.contains(error)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConversionError> {
        self.errors.iter()
    }

    /// Consume the set into its errors
    pub fn into_vec(self) -> Vec<ConversionError> {
        self.errors
    }
}

impl From<ConversionError> for ConversionErrors {
    fn from(error: ConversionError) -> Self {
        Self::new(error)
    }
}

impl<'a> IntoIterator for &'a ConversionErrors {
    type Item = &'a ConversionError;
    type IntoIter = std::slice::Iter<'a, ConversionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ConversionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConversionErrors {}

/// Errors raised while loading conversion options
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse [lockfile] options: {message}")]
    TomlParse { message: String },
}
