//! Error types for the OPenn resolver
//!
//! Each concern gets its own error enum; `AppError` gathers them for the
//! resolver's public operations. Absence of a TEI file or of a language
//! declaration is not an error and is reported as `None` instead.

use std::path::PathBuf;
use thiserror::Error;

/// HTTP transport errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// A URL could not be built from the configured root and object path
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Content fetch answered with a non-success status
    #[error("Server error: HTTP {status} for {url}")]
    ServerError { status: u16, url: String },

    /// Maximum retries exceeded
    #[error("Maximum retry attempts ({max_retries}) exceeded for {url}")]
    MaxRetriesExceeded { max_retries: u32, url: String },

    /// Resource unknown to an in-memory transport
    #[error("No content registered for {url}")]
    Unavailable { url: String },
}

/// Manifest lookup errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Neither manifest variant exists for the object
    #[error("No manifest found for {object_path}")]
    NoManifest { object_path: String },
}

/// TEI parsing errors
#[derive(Error, Debug)]
pub enum TeiError {
    /// Malformed XML
    #[error("TEI parsing failed")]
    Xml(#[from] quick_xml::Error),

    /// Attribute syntax error inside an element
    #[error("Malformed attribute in TEI document")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
}

/// Collections CSV errors
#[derive(Error, Debug)]
pub enum CollectionsError {
    /// Malformed CSV
    #[error("CSV parsing failed")]
    Csv(#[from] csv::Error),

    /// Required column absent from the header row
    #[error("Required column missing from CSV header: {column}")]
    MissingColumn { column: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// I/O error reading or writing a configuration file
    #[error("Configuration file I/O failed: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// User configuration directory could not be determined
    #[error("Could not determine user config directory")]
    NoConfigDir,
}

/// Object path validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PathError {
    /// Path has no non-empty segment
    #[error("Object path is empty")]
    Empty,

    /// Path contains an empty segment between separators
    #[error("Object path has an empty segment: {path}")]
    EmptySegment { path: String },
}

/// Top-level error for resolver operations
#[derive(Error, Debug)]
pub enum AppError {
    /// Transport error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Manifest error
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// TEI error
    #[error(transparent)]
    Tei(#[from] TeiError),

    /// Collections CSV error
    #[error(transparent)]
    Collections(#[from] CollectionsError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Object path error
    #[error(transparent)]
    Path(#[from] PathError),
}

impl AppError {
    /// Check if the error is transient and the call may be retried
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Fetch(FetchError::Http(_))
                | AppError::Fetch(FetchError::MaxRetriesExceeded { .. })
                | AppError::Fetch(FetchError::ServerError { status: 500..=599, .. })
        )
    }

    /// True for the distinguished "no manifest" case
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Manifest(ManifestError::NoManifest { .. }))
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Fetch(_) => "fetch",
            AppError::Manifest(_) => "manifest",
            AppError::Tei(_) => "tei",
            AppError::Collections(_) => "collections",
            AppError::Config(_) => "config",
            AppError::Path(_) => "path",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// TEI result type alias
pub type TeiResult<T> = std::result::Result<T, TeiError>;

/// Collections result type alias
pub type CollectionsResult<T> = std::result::Result<T, CollectionsError>;

/// Config result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
