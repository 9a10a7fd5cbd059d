//! Object paths and URL construction
//!
//! Everything here is pure: candidate URLs are derived from an object path and
//! the configured roots without touching the network. Probing the candidates
//! is the resolver's job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::ResolverConfig;
use crate::constants::openn;
use crate::errors::{FetchError, FetchResult, PathError};

/// Location of a manuscript object relative to the OPenn data root
///
/// Always holds at least one non-empty segment, e.g. `0001/ljs103`. Leading
/// and trailing slashes are stripped on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Validates and wraps an object path
    pub fn new(path: impl AsRef<str>) -> Result<Self, PathError> {
        let trimmed = path.as_ref().trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(PathError::Empty);
        }
        if trimmed.split('/').any(str::is_empty) {
            return Err(PathError::EmptySegment {
                path: trimmed.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First path segment, the repository number
    pub fn repository_number(&self) -> &str {
        repository_number(&self.0)
    }

    /// Last path segment
    pub fn basename(&self) -> &str {
        basename(&self.0)
    }

    /// True when the object belongs to the Digital Walters collection
    pub fn is_walters(&self, walters_tag: &str) -> bool {
        self.0.starts_with(walters_tag)
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ObjectPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ObjectPath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ObjectPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ObjectPath> for String {
    fn from(path: ObjectPath) -> Self {
        path.0
    }
}

impl AsRef<str> for ObjectPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// First segment of a path, before the first `/`
pub fn repository_number(path: &str) -> &str {
    path.split('/').next().unwrap_or(path)
}

/// Last segment of a path
pub fn basename(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}

/// Normalizes a repository number to its directory tag
///
/// All-digit numbers are read as decimal and zero-padded to four digits;
/// anything else is returned unchanged.
///
/// ```
/// use openn_resolver::app::paths::repo_tag;
///
/// assert_eq!(repo_tag("7"), "0007");
/// assert_eq!(repo_tag("0020"), "0020");
/// assert_eq!(repo_tag("abc12"), "abc12");
/// ```
pub fn repo_tag(repo_number: &str) -> String {
    if repo_number.is_empty() || !repo_number.bytes().all(|b| b.is_ascii_digit()) {
        return repo_number.to_string();
    }
    let significant = repo_number.trim_start_matches('0');
    format!(
        "{:0>width$}",
        significant,
        width = openn::REPO_TAG_WIDTH
    )
}

/// Parses a URL built from configured roots
pub(crate) fn parse_url(raw: String) -> FetchResult<Url> {
    Url::parse(&raw).map_err(|e| FetchError::InvalidUrl {
        url: raw,
        error: e.to_string(),
    })
}

fn join(root: &str, rest: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), rest)
}

/// Manifest candidates for an object, in order of preference
pub fn manifest_candidates(config: &ResolverConfig, path: &ObjectPath) -> FetchResult<Vec<Url>> {
    config
        .manifest_names
        .iter()
        .map(|name| parse_url(join(&config.data_url, &format!("{}/{}", path, name))))
        .collect()
}

/// The single TEI location for an object
///
/// Digital Walters objects keep their descriptions in one collection-wide
/// directory; every other repository stores `<basename>_TEI.xml` under the
/// object's own `data/` directory.
pub fn tei_candidate(config: &ResolverConfig, path: &ObjectPath) -> FetchResult<Url> {
    let basename = path.basename();
    let raw = if path.is_walters(&config.walters_repo_tag) {
        join(&config.walters_tei_url, &format!("{}_tei.xml", basename))
    } else {
        join(
            &config.data_url,
            &format!("{}/data/{}_TEI.xml", path, basename),
        )
    };
    parse_url(raw)
}

/// Location of a repository's contents listing
pub fn csv_url(config: &ResolverConfig, repo_number: &str) -> FetchResult<Url> {
    parse_url(join(
        &config.data_url,
        &format!("{}{}", repo_tag(repo_number), openn::CONTENTS_CSV_SUFFIX),
    ))
}
