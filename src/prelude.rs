//! Prelude module for the OPenn Resolver Library
//!
//! Re-exports the items needed for typical usage with a single
//! `use openn_resolver::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use openn_resolver::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load(None).await?;
//!     init_logging(&config.logging);
//!
//!     let (locations, client) = config.to_runtime_config();
//!     let resolver = ManuscriptResolver::with_config(locations, client)?;
//!     let summary = resolver.summarize(&ObjectPath::new("0020/W4")?).await?;
//!     println!("{:?}", summary);
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Resolver and its inputs
pub use crate::app::{
    ClientConfig, CollectionsIndex, CsvRow, ManuscriptResolver, ManuscriptSummary, ObjectPath,
    ResolverConfig, TeiDocument, Transport,
};

// Collection row accessors
pub use crate::app::{date_added, date_created, date_updated, repo_tag};

// Configuration and logging
pub use crate::config::{AppConfig, LoggingConfig};
pub use crate::logging::init_logging;

// Common external crate re-exports for convenience
pub use tokio;
pub use url::Url;
