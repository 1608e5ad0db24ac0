//! Error-accumulating validation of lockfile records.
//!
//! Every facet of a record is checked independently and the failures are
//! merged, so a record with a missing version and a malformed dependency list
//! reports both problems at once.

use crate::config::ConversionOptions;
use crate::convert::assemble;
use crate::error::{ConversionError, ConversionErrors};
use crate::extract::{lookup, FieldKind, FieldLookup, KeyList, Text};
use crate::remote::resolve_remote;
use crate::types::{Package, PackageKey, RawFields};

/// Result of validating one facet, combinable without short-circuiting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation<T>(Result<T, ConversionErrors>);

impl<T> Validation<T> {
    pub fn valid(value: T) -> Self {
        Self(Ok(value))
    }

    pub fn invalid(error: ConversionError) -> Self {
        Self(Err(ConversionErrors::new(error)))
    }

    /// Combine two validations, keeping the errors of both sides
    pub fn zip<U>(self, other: Validation<U>) -> Validation<(T, U)> {
        match (self.0, other.0) {
            (Ok(a), Ok(b)) => Validation(Ok((a, b))),
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => Validation(Err(e)),
            (Err(left), Err(right)) => Validation(Err(left.merge(right))),
        }
    }

    pub fn map<U, F>(self, f: F) -> Validation<U>
    where
        F: FnOnce(T) -> U,
    {
        Validation(self.0.map(f))
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_ok()
    }

    pub fn into_result(self) -> Result<T, ConversionErrors> {
        self.0
    }
}

impl<T> From<Result<T, ConversionErrors>> for Validation<T> {
    fn from(result: Result<T, ConversionErrors>) -> Self {
        Self(result)
    }
}

/// A field that must be present and decode as `K`
pub fn required<K: FieldKind>(fields: &RawFields, name: &str) -> Validation<K::Output> {
    match lookup::<K>(fields, name) {
        FieldLookup::Decoded(value) => Validation::valid(value),
        FieldLookup::Absent => Validation::invalid(ConversionError::missing(name)),
        FieldLookup::Undecodable => Validation::invalid(ConversionError::wrong_type(name, K::NAME)),
    }
}

/// A field that may be absent, in which case the default value is used
pub fn optional<K>(fields: &RawFields, name: &str) -> Validation<K::Output>
where
    K: FieldKind,
    K::Output: Default,
{
    match lookup::<K>(fields, name) {
        FieldLookup::Decoded(value) => Validation::valid(value),
        FieldLookup::Absent => Validation::valid(K::Output::default()),
        FieldLookup::Undecodable => Validation::invalid(ConversionError::wrong_type(name, K::NAME)),
    }
}

/// Validate all facets of a record and build the package if every one passes
pub fn validate_package(
    fields: &RawFields,
    keys: &[PackageKey],
    options: &ConversionOptions,
) -> Validation<Package> {
    let version = required::<Text>(fields, "version");
    let remote =
        Validation::from(resolve_remote(fields, keys, options).map_err(ConversionErrors::new));
    let dependencies = optional::<KeyList>(fields, "dependencies");
    let optional_dependencies = optional::<KeyList>(fields, "optionalDependencies");

    version
        .zip(remote)
        .zip(dependencies)
        .zip(optional_dependencies)
        .map(|(((version, remote), dependencies), optional_dependencies)| {
            assemble(version, remote, dependencies, optional_dependencies)
        })
}
