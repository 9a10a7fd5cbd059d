//! Repository locations used by the resolver
//!
//! Defaults point at the public OPenn deployment; a mirror only needs
//! different roots.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{openn, tei};
use crate::errors::{ConfigError, ConfigResult};

/// Where manifests, TEI files and CSV listings live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Root every object path is relative to
    pub data_url: String,
    /// Collection-wide TEI directory of the Digital Walters repository
    pub walters_tei_url: String,
    /// Index of all repositories
    pub collections_csv_url: String,
    /// Object paths starting with this tag use `walters_tei_url`
    pub walters_repo_tag: String,
    /// Manifest file names, in order of preference
    pub manifest_names: Vec<String>,
    /// Bytes read by the fast language scan
    pub tei_scan_limit: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            data_url: openn::DATA_URL.to_string(),
            walters_tei_url: openn::WALTERS_TEI_URL.to_string(),
            collections_csv_url: openn::COLLECTIONS_CSV_URL.to_string(),
            walters_repo_tag: openn::WALTERS_REPO_TAG.to_string(),
            manifest_names: openn::MANIFEST_NAMES.iter().map(|s| s.to_string()).collect(),
            tei_scan_limit: tei::SCAN_LIMIT,
        }
    }
}

impl ResolverConfig {
    /// Checks that every root is an absolute URL and the lists are usable
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("data_url", &self.data_url),
            ("walters_tei_url", &self.walters_tei_url),
            ("collections_csv_url", &self.collections_csv_url),
        ] {
            Url::parse(value).map_err(|e| ConfigError::InvalidValue {
                field: field.to_string(),
                value: value.clone(),
                reason: e.to_string(),
            })?;
        }

        if self.manifest_names.is_empty() || self.manifest_names.iter().any(String::is_empty) {
            return Err(ConfigError::InvalidValue {
                field: "manifest_names".to_string(),
                value: format!("{:?}", self.manifest_names),
                reason: "At least one non-empty manifest name is required".to_string(),
            });
        }

        if self.walters_repo_tag.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "walters_repo_tag".to_string(),
                value: String::new(),
                reason: "An empty tag would match every object".to_string(),
            });
        }

        if self.tei_scan_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tei_scan_limit".to_string(),
                value: "0".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
