//! # pea-lockfile
//!
//! Conversion of parsed lockfile records into typed package descriptors.
//!
//! The lockfile grammar is parsed elsewhere into loosely-typed records: a map
//! of field names to either scalar text or a nested map. This crate turns each
//! record into a [`Package`], working out where the package came from (its
//! [`Remote`]) through an ordered list of heuristics, since the lockfile never
//! states the remote kind explicitly.
//!
//! ## Architecture
//!
//! - `types`: Keys, raw records and the converted package types
//! - `error`: Conversion and configuration errors
//! - `extract`: Typed decoders for single fields
//! - `validate`: Error-accumulating validation of a whole record
//! - `remote`: Remote resolution heuristics
//! - `convert`: Package assembly and batch conversion
//! - `config`: `[lockfile]` options from pea.toml
//!
//! Conversion never stops at the first problem: a failed record reports every
//! error found in it.

pub mod config;
pub mod convert;
pub mod error;
pub mod extract;
pub mod remote;
pub mod types;
pub mod validate;

// Re-export commonly used types
pub use config::{ConversionOptions, MalformedResolvedPolicy};
pub use convert::{convert_package, Converter, LockfileEntry};
pub use error::{ConfigError, ConversionError, ConversionErrors};
pub use types::{Package, PackageKey, PackageKeyName, RawFieldValue, RawFields, Remote};

/// Result type for converting a single lockfile record
pub type ConversionResult<T> = Result<T, ConversionErrors>;
