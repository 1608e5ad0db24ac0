//! Typed field decoders.
//!
//! Each [`FieldKind`] turns a [`RawFieldValue`] into one semantic type.
//! Looking a field up distinguishes a field that is absent from one that is
//! present but has the wrong shape, since callers report those differently.

use crate::types::{PackageKey, PackageKeyName, RawFieldValue, RawFields};

/// Decoder for one kind of field value
pub trait FieldKind {
    type Output;

    /// Human-readable kind name used in `WrongType` errors
    const NAME: &'static str;

    fn decode(value: &RawFieldValue) -> Option<Self::Output>;
}

/// Plain text, scalar values only
pub struct Text;

/// Package name, scalar text that parses as a [`PackageKeyName`]
pub struct KeyName;

/// Nested block of `name version-spec` pairs
pub struct KeyList;

impl FieldKind for Text {
    type Output = String;
    const NAME: &'static str = "text";

    fn decode(value: &RawFieldValue) -> Option<String> {
        value.as_scalar().map(str::to_string)
    }
}

impl FieldKind for KeyName {
    type Output = PackageKeyName;
    const NAME: &'static str = "package key name";

    fn decode(value: &RawFieldValue) -> Option<PackageKeyName> {
        value.as_scalar().and_then(PackageKeyName::parse)
    }
}

impl FieldKind for KeyList {
    type Output = Vec<PackageKey>;
    const NAME: &'static str = "list of package keys";

    fn decode(value: &RawFieldValue) -> Option<Vec<PackageKey>> {
        value
            .as_nested()?
            .iter()
            .map(|(name, spec)| {
                let name = PackageKeyName::parse(name)?;
                let version_spec = Text::decode(spec)?;
                Some(PackageKey { name, version_spec })
            })
            .collect()
    }
}

/// Outcome of looking up a field with a given kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLookup<T> {
    Absent,
    Decoded(T),
    /// Present, but the kind could not decode its shape
    Undecodable,
}

/// Look up `name` and decode it as `K`
pub fn lookup<K: FieldKind>(fields: &RawFields, name: &str) -> FieldLookup<K::Output> {
    match fields.get(name) {
        None => FieldLookup::Absent,
        Some(value) => match K::decode(value) {
            Some(decoded) => FieldLookup::Decoded(decoded),
            None => FieldLookup::Undecodable,
        },
    }
}

/// Look up `name` as `K`, treating absent and undecodable alike
pub fn extract<K: FieldKind>(fields: &RawFields, name: &str) -> Option<K::Output> {
    match lookup::<K>(fields, name) {
        FieldLookup::Decoded(value) => Some(value),
        FieldLookup::Absent | FieldLookup::Undecodable => None,
    }
}
