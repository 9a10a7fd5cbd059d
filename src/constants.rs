//! Application constants for the OPenn resolver
//!
//! This module centralizes the repository locations, file naming conventions
//! and client defaults, organized by functional domain.

use std::time::Duration;

/// OPenn repository locations and naming conventions
pub mod openn {
    /// Root of the OPenn data tree; every object path is relative to it
    pub const DATA_URL: &str = "https://openn.library.upenn.edu/Data";

    /// Collection-wide TEI directory used by the Digital Walters repository
    pub const WALTERS_TEI_URL: &str =
        "https://openn.library.upenn.edu/Data/0020/Data/WaltersManuscripts/ManuscriptDescriptions";

    /// Index of every repository hosted on OPenn
    pub const COLLECTIONS_CSV_URL: &str = "https://openn.library.upenn.edu/Data/collections.csv";

    /// Repository tag of the Digital Walters collection
    pub const WALTERS_REPO_TAG: &str = "0020";

    /// Manifest file names, in order of preference
    pub const MANIFEST_NAMES: [&str; 2] = ["manifest-sha1.txt", "manifest-md5.txt"];

    /// Suffix of the per-repository contents listing
    pub const CONTENTS_CSV_SUFFIX: &str = "_contents.csv";

    /// Width repository numbers are zero-padded to
    pub const REPO_TAG_WIDTH: usize = 4;
}

/// TEI description handling
pub mod tei {
    /// Bytes read from the head of a TEI document by the fast language scan
    pub const SCAN_LIMIT: usize = 1 << 16;

    /// Element carrying the language declaration
    pub const TEXT_LANG_ELEMENT: &str = "textLang";

    /// Attribute holding the primary language code
    pub const MAIN_LANG_ATTRIBUTE: &str = "mainLang";
}

/// Collections CSV column names
pub mod columns {
    pub const REPOSITORY_ID: &str = "repository_id";
    pub const ADDED: &str = "added";
    pub const CREATED: &str = "created";
    pub const DOCUMENT_CREATED: &str = "document_created";
    pub const UPDATED: &str = "updated";
    pub const DOCUMENT_UPDATED: &str = "document_updated";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "OPenn-Resolver/0.1.0 (Manuscript Metadata Client)";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Maximum number of redirects followed when fetching content
    pub const MAX_REDIRECTS: usize = 10;
}

/// Retry configuration
pub mod limits {
    /// Retries for failed transport requests; zero keeps every call single-shot
    pub const MAX_RETRIES: u32 = 0;

    /// Base delay for exponential backoff (milliseconds)
    pub const RETRY_BASE_DELAY_MS: u64 = 500;
}

/// Environment variable names for configuration overrides
pub mod env {
    pub const DATA_URL: &str = "OPENN_DATA_URL";
    pub const WALTERS_TEI_URL: &str = "OPENN_WALTERS_TEI_URL";
    pub const COLLECTIONS_CSV_URL: &str = "OPENN_COLLECTIONS_CSV_URL";
}

/// Logging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "info";

    /// Target used for this crate's log filter directive
    pub const CRATE_TARGET: &str = "openn_resolver";
}

// Re-export commonly used constants for convenience
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use openn::{DATA_URL as OPENN_DATA_URL, MANIFEST_NAMES, WALTERS_TEI_URL};
pub use tei::SCAN_LIMIT as TEI_SCAN_LIMIT;
