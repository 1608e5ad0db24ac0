//! Remote resolution for lockfile entries
//!
//! A lockfile entry never says what kind of source it came from. The kind is
//! inferred from the `resolved` field, the optional `uid` field and the
//! version specs of the keys the entry is listed under, by trying the
//! heuristics in [`HEURISTICS`] in order and keeping the first match.

use tracing::{debug, trace, warn};
use url::Url;

use crate::config::{ConversionOptions, MalformedResolvedPolicy};
use crate::error::ConversionError;
use crate::extract::{extract, lookup, FieldLookup, Text};
use crate::types::{PackageKey, RawFieldValue, RawFields, Remote};

/// Version spec prefix of a copied local directory
const DIRECTORY_PREFIX: &str = "file:";

/// Version spec prefix of a symlinked local directory
const SYMLINK_PREFIX: &str = "link:";

/// Hosts whose `owner/repo` URLs point at git repositories
const HOSTED_GIT_HOSTS: &[&str] = &["github.com", "gitlab.com", "bitbucket.org"];

/// Extensions that mark a URL as an archive rather than a repository
const ARCHIVE_EXTENSIONS: &[&str] = &[".tgz", ".tar.gz", ".tar", ".zip"];

/// Inputs available to the heuristics once a `resolved` field was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContext<'a> {
    /// `resolved` up to the `#` delimiter
    pub url: &'a str,
    /// Non-empty fragment after the `#` delimiter
    pub hash: Option<&'a str>,
    /// Explicit git revision from the `uid` field
    pub uid: Option<String>,
    pub keys: &'a [PackageKey],
}

/// A single remote heuristic, `None` when its preconditions do not hold
pub type Heuristic = fn(&ResolvedContext<'_>) -> Option<Remote>;

/// Remote heuristics in priority order
pub const HEURISTICS: &[(&str, Heuristic)] = &[
    ("git", git),
    ("file-local", file_local),
    ("file", file_remote),
    ("directory-local", directory_fallback),
    ("directory-symlinked", symlink_fallback),
];

/// Determine the remote of a lockfile entry.
///
/// Returns `Ok(None)` for entries that have no `resolved` field and no
/// directory key; this is a valid state, not an error.
pub fn resolve_remote(
    fields: &RawFields,
    keys: &[PackageKey],
    options: &ConversionOptions,
) -> Result<Option<Remote>, ConversionError> {
    let resolved = match lookup::<Text>(fields, "resolved") {
        FieldLookup::Decoded(resolved) => resolved,
        FieldLookup::Undecodable => {
            let shape = fields.get("resolved").map_or("missing", RawFieldValue::shape);
            warn!(shape, "Ignoring 'resolved' field that is not text");
            return Ok(local_only(keys));
        },
        FieldLookup::Absent => return Ok(local_only(keys)),
    };

    let (url, hash) = split_resolved(&resolved, options.malformed_resolved)?;
    let ctx = ResolvedContext {
        url,
        hash,
        uid: extract::<Text>(fields, "uid"),
        keys,
    };

    for (name, heuristic) in HEURISTICS {
        trace!(heuristic = name, url, "Trying remote heuristic");
        if let Some(remote) = heuristic(&ctx) {
            debug!(
                heuristic = name,
                local = remote.is_local(),
                integrity = remote.integrity().is_some(),
                "Resolved remote for {}",
                resolved
            );
            return Ok(Some(remote));
        }
    }

    debug!("No remote heuristic matched {}", resolved);
    Err(ConversionError::UnknownRemoteType)
}

/// Split `resolved` into its URL and hash fragment.
///
/// An empty fragment counts as no fragment. More than one `#` is handled
/// according to `policy`.
pub fn split_resolved(
    resolved: &str,
    policy: MalformedResolvedPolicy,
) -> Result<(&str, Option<&str>), ConversionError> {
    let Some((url, hash)) = resolved.split_once('#') else {
        return Ok((resolved, None));
    };

    if hash.contains('#') {
        match policy {
            MalformedResolvedPolicy::Reject => {
                return Err(ConversionError::MalformedResolved {
                    value: resolved.to_string(),
                });
            },
            MalformedResolvedPolicy::SplitFirst => {
                warn!("Splitting malformed resolved value {} at the first '#'", resolved);
            },
        }
    }

    Ok((url, Some(hash).filter(|hash| !hash.is_empty())))
}

/// Remote of an entry without a `resolved` field
fn local_only(keys: &[PackageKey]) -> Option<Remote> {
    directory_local(keys).or_else(|| directory_symlinked(keys))
}

/// Path after `prefix` in the first key whose version spec carries it
fn key_path<'a>(keys: &'a [PackageKey], prefix: &str) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| key.version_spec.strip_prefix(prefix))
}

/// `file:` directory named by one of the entry's keys
pub fn directory_local(keys: &[PackageKey]) -> Option<Remote> {
    key_path(keys, DIRECTORY_PREFIX).map(|path| Remote::DirectoryLocal {
        path: path.to_string(),
    })
}

/// `link:` directory named by one of the entry's keys
pub fn directory_symlinked(keys: &[PackageKey]) -> Option<Remote> {
    key_path(keys, SYMLINK_PREFIX).map(|path| Remote::DirectoryLocalSymLinked {
        path: path.to_string(),
    })
}

/// Git repository pinned by `uid`, or by the hash fragment of a git URL
pub fn git(ctx: &ResolvedContext<'_>) -> Option<Remote> {
    let rev = match &ctx.uid {
        Some(uid) => uid.clone(),
        None if is_git_url(ctx.url) => ctx.hash?.to_string(),
        None => return None,
    };

    let repo_url = ctx.url.strip_prefix("git+").unwrap_or(ctx.url);
    Some(Remote::Git {
        repo_url: repo_url.to_string(),
        rev,
    })
}

/// Tarball on the local file system
pub fn file_local(ctx: &ResolvedContext<'_>) -> Option<Remote> {
    let path = ctx.url.strip_prefix("file:")?.to_string();
    Some(match ctx.hash {
        Some(hash) => Remote::FileLocal {
            path,
            hash: hash.to_string(),
        },
        None => Remote::FileLocalNoIntegrity { path },
    })
}

/// Tarball fetched from an absolute URL
pub fn file_remote(ctx: &ResolvedContext<'_>) -> Option<Remote> {
    if ctx.url.starts_with("file:") || Url::parse(ctx.url).is_err() {
        return None;
    }

    let url = ctx.url.to_string();
    Some(match ctx.hash {
        Some(hash) => Remote::FileRemote {
            url,
            hash: hash.to_string(),
        },
        None => Remote::FileRemoteNoIntegrity { url },
    })
}

fn directory_fallback(ctx: &ResolvedContext<'_>) -> Option<Remote> {
    directory_local(ctx.keys)
}

fn symlink_fallback(ctx: &ResolvedContext<'_>) -> Option<Remote> {
    directory_symlinked(ctx.keys)
}

/// Check if a URL names a git repository
pub fn is_git_url(url: &str) -> bool {
    url.starts_with("git+") || url.starts_with("git://") || is_hosted_repository(url)
}

/// `https://<known host>/<owner>/<repo>` without an archive extension
fn is_hosted_repository(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    let known_host = parsed
        .host_str()
        .is_some_and(|host| HOSTED_GIT_HOSTS.contains(&host));
    if !matches!(parsed.scheme(), "http" | "https") || !known_host {
        return false;
    }

    let segments: Vec<&str> = match parsed.path_segments() {
        Some(segments) => segments.filter(|s| !s.is_empty()).collect(),
        None => return false,
    };

    segments.len() == 2
        && !ARCHIVE_EXTENSIONS
            .iter()
            .any(|ext| segments[1].ends_with(ext))
}
