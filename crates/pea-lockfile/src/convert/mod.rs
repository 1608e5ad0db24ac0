//! Package assembly and batch conversion
//!
//! Single records are converted by [`convert_package`] or a configured
//! [`Converter`]. Records are independent of each other, so large batches are
//! spread over the rayon thread pool.

use rayon::prelude::*;
use tracing::debug;

use crate::config::ConversionOptions;
use crate::types::{Package, PackageKey, RawFields, Remote};
use crate::validate::validate_package;
use crate::ConversionResult;

/// One parsed lockfile entry: the keys it is listed under and its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockfileEntry {
    pub keys: Vec<PackageKey>,
    pub fields: RawFields,
}

/// Lockfile record converter
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConversionOptions,
}

/// Build a package from already validated facets
pub(crate) fn assemble(
    version: String,
    remote: Option<Remote>,
    dependencies: Vec<PackageKey>,
    optional_dependencies: Vec<PackageKey>,
) -> Package {
    Package {
        version,
        remote,
        dependencies,
        optional_dependencies,
    }
}

/// Convert one record with default options
pub fn convert_package(fields: &RawFields, keys: &[PackageKey]) -> ConversionResult<Package> {
    Converter::default().convert(fields, keys)
}

impl LockfileEntry {
    pub fn new(keys: Vec<PackageKey>, fields: RawFields) -> Self {
        Self { keys, fields }
    }
}

impl Converter {
    /// Create a converter with the given options
    pub fn new(options: ConversionOptions) -> Self {
        Self { options }
    }

    /// Convert a record found under `keys`, reporting every error it contains
    pub fn convert(&self, fields: &RawFields, keys: &[PackageKey]) -> ConversionResult<Package> {
        let result = validate_package(fields, keys, &self.options).into_result();

        if let Err(errors) = &result {
            debug!(
                errors = errors.len(),
                "Failed to convert lockfile entry {}",
                describe_keys(keys)
            );
        }

        result
    }

    /// Convert a single entry
    pub fn convert_entry(&self, entry: &LockfileEntry) -> ConversionResult<Package> {
        self.convert(&entry.fields, &entry.keys)
    }

    /// Convert many entries, returning results in input order
    pub fn convert_all(&self, entries: &[LockfileEntry]) -> Vec<ConversionResult<Package>> {
        if entries.len() < self.options.parallel_threshold {
            entries.iter().map(|entry| self.convert_entry(entry)).collect()
        } else {
            debug!("Converting {} lockfile entries in parallel", entries.len());
            entries
                .par_iter()
                .map(|entry| self.convert_entry(entry))
                .collect()
        }
    }
}

/// Comma-separated keys for log messages
fn describe_keys(keys: &[PackageKey]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;
    use crate::types::PackageKeyName;

    fn fields(json: &str) -> RawFields {
        serde_json::from_str(json).unwrap()
    }

    fn keys(spec: &str) -> Vec<PackageKey> {
        vec![PackageKey::simple("pkg", spec)]
    }

    #[test]
    fn test_convert_registry_package() {
        let record = fields(
            r#"{
                "version": "4.17.21",
                "resolved": "https://registry.example/lodash-4.17.21.tgz#sha1-abc",
                "dependencies": { "a": "^1.0.0", "@scope/b": "~2.0.0" },
                "optionalDependencies": { "fsevents": "^2.3.0" }
            }"#,
        );

        let pkg = convert_package(&record, &keys("^4.17.0")).unwrap();
        assert_eq!(pkg.version, "4.17.21");
        assert_eq!(
            pkg.remote,
            Some(Remote::FileRemote {
                url: "https://registry.example/lodash-4.17.21.tgz".to_string(),
                hash: "sha1-abc".to_string(),
            })
        );
        assert_eq!(
            pkg.dependencies,
            vec![
                PackageKey::simple("a", "^1.0.0"),
                PackageKey::new(
                    PackageKeyName::Scoped {
                        scope: "scope".to_string(),
                        name: "b".to_string(),
                    },
                    "~2.0.0"
                ),
            ]
        );
        assert_eq!(pkg.optional_dependencies, vec![PackageKey::simple("fsevents", "^2.3.0")]);
    }

    #[test]
    fn test_missing_version() {
        let errors = convert_package(&fields(r#"{}"#), &keys("^1.0.0")).unwrap_err();
        assert!(errors.contains(&ConversionError::missing("version")));
    }

    #[test]
    fn test_scalar_dependencies_is_wrong_type() {
        let record = fields(r#"{ "version": "1.0.0", "dependencies": "lodash" }"#);
        let errors = convert_package(&record, &keys("^1.0.0")).unwrap_err();
        assert!(errors.contains(&ConversionError::wrong_type(
            "dependencies",
            "list of package keys"
        )));
    }

    #[test]
    fn test_missing_version_and_bad_dependencies_reports_both() {
        let record = fields(r#"{ "dependencies": "lodash" }"#);
        let errors = convert_package(&record, &keys("^1.0.0")).unwrap_err();

        assert_eq!(
            errors.into_vec(),
            vec![
                ConversionError::missing("version"),
                ConversionError::wrong_type("dependencies", "list of package keys"),
            ]
        );
    }

    #[test]
    fn test_absent_dependencies_default_to_empty() {
        let pkg = convert_package(&fields(r#"{ "version": "1.0.0" }"#), &keys("^1.0.0")).unwrap();

        assert!(pkg.dependencies.is_empty());
        assert!(pkg.optional_dependencies.is_empty());
        assert_eq!(pkg.remote, None);
    }

    #[test]
    fn test_unknown_remote_is_reported_with_other_errors() {
        let record = fields(r#"{ "resolved": "nowhere", "optionalDependencies": "x" }"#);
        let errors = convert_package(&record, &keys("^1.0.0")).unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ConversionError::UnknownRemoteType));
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let record = fields(
            r#"{ "version": "1.0.0", "resolved": "https://github.com/a/b#deadbeef" }"#,
        );
        let first = convert_package(&record, &keys("a/b"));
        let second = convert_package(&record, &keys("a/b"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_convert_all_keeps_order() {
        let entries: Vec<LockfileEntry> = (0..10)
            .map(|i| {
                let record = if i % 3 == 0 {
                    fields(r#"{ "resolved": "https://registry.example/x.tgz" }"#)
                } else {
                    fields(&format!(r#"{{ "version": "{}.0.0" }}"#, i))
                };
                LockfileEntry::new(keys("*"), record)
            })
            .collect();

        let sequential = Converter::default().convert_all(&entries);
        let parallel = Converter::new(ConversionOptions {
            parallel_threshold: 0,
            ..ConversionOptions::default()
        })
        .convert_all(&entries);

        assert_eq!(sequential, parallel);
        for (i, result) in sequential.iter().enumerate() {
            match result {
                Ok(pkg) => assert_eq!(pkg.version, format!("{}.0.0", i)),
                Err(errors) => {
                    assert_eq!(i % 3, 0);
                    assert_eq!(errors.first(), &ConversionError::missing("version"));
                },
            }
        }
    }
}
