//! Data types for lockfile conversion.
//!
//! - Raw records as produced by the lockfile parser
//! - Package keys (the aliases an entry is listed under)
//! - Converted packages and their remotes

pub mod fields;
pub mod key;
pub mod package;
pub mod remote;

// Re-export all public types
pub use fields::{RawFieldValue, RawFields};
pub use key::{PackageKey, PackageKeyName};
pub use package::Package;
pub use remote::Remote;
