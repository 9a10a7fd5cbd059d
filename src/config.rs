//! Configuration management for the OPenn resolver
//!
//! Settings are layered: built-in defaults, then a TOML config file, then
//! environment variable overrides for the repository roots.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{ClientConfig, ResolverConfig};
use crate::constants::{env, logging, openn, tei};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Repository locations
    pub openn: ResolverConfig,
    /// HTTP client settings
    pub client: ClientConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the crate, overridden by `RUST_LOG`
    pub level: String,
    /// Enable colored output
    pub colored_output: bool,
    /// Include the module target in each line
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
            colored_output: true,
            show_target: false,
        }
    }
}

impl AppConfig {
    /// Convert to the runtime configuration pair used by the resolver
    pub fn to_runtime_config(&self) -> (ResolverConfig, ClientConfig) {
        (self.openn.clone(), self.client.clone())
    }

    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (explicit path or first one found)
    /// 3. Environment variables
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let config_path = match config_file_override {
            Some(ref path) => Some(path.clone()),
            None => Self::find_config_file(),
        };

        if let Some(path) = config_path {
            if path.exists() {
                config = Self::load_from_file(&path).await?;
            } else if config_file_override.is_some() {
                return Err(ConfigError::NotFound { path });
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.openn.validate()?;
        Ok(config)
    }

    /// Overrides repository roots from the environment
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides = [
            (env::DATA_URL, &mut self.openn.data_url),
            (env::WALTERS_TEI_URL, &mut self.openn.walters_tei_url),
            (env::COLLECTIONS_CSV_URL, &mut self.openn.collections_csv_url),
        ];
        for (key, target) in overrides {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                debug!("Overriding {} from environment", key);
                *target = value.trim().to_string();
            }
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from("./openn-resolver.toml")];
        if let Ok(path) = Self::default_config_path() {
            search_paths.push(path);
        }

        for path in search_paths {
            if path.exists() {
                debug!("Found config file: {}", path.display());
                return Some(path);
            }
        }

        debug!("No config file found in standard locations");
        None
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("openn-resolver").join("config.toml"))
    }

    /// Load configuration from a TOML file
    pub async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Writes the commented default configuration, creating parent directories
    pub async fn write_default(path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(path, Self::generate_default_config_content())
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Wrote default configuration to: {}", path.display());
        Ok(())
    }

    /// Generate default configuration content with helpful comments
    pub fn generate_default_config_content() -> String {
        format!(
            r#"# OPenn Resolver Configuration
# Every setting is optional; omitted values use the defaults shown here.

[openn]
# Root every object path is relative to (env: {data_env})
data_url = "{data_url}"
# Digital Walters TEI directory (env: {walters_env})
walters_tei_url = "{walters_url}"
# Index of all repositories (env: {csv_env})
collections_csv_url = "{csv_url}"
walters_repo_tag = "{walters_tag}"
# Tried in order; the first one that exists is used
manifest_names = ["{sha1}", "{md5}"]
# Bytes read by the fast language scan
tei_scan_limit = {scan_limit}

[client]
request_timeout = "60s"
connect_timeout = "30s"
# Retries for transport failures (0 = single attempt)
max_retries = 0
retry_base_delay = "500ms"
max_redirects = 10

[logging]
level = "info"  # error, warn, info, debug, trace
colored_output = true
show_target = false
"#,
            data_env = env::DATA_URL,
            data_url = openn::DATA_URL,
            walters_env = env::WALTERS_TEI_URL,
            walters_url = openn::WALTERS_TEI_URL,
            csv_env = env::COLLECTIONS_CSV_URL,
            csv_url = openn::COLLECTIONS_CSV_URL,
            walters_tag = openn::WALTERS_REPO_TAG,
            sha1 = openn::MANIFEST_NAMES[0],
            md5 = openn::MANIFEST_NAMES[1],
            scan_limit = tei::SCAN_LIMIT,
        )
    }
}
