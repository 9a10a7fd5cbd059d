//! Core resolver logic
//!
//! This module contains URL construction, the HTTP transport, manifest and TEI
//! parsing, the collections index and the resolver that ties them together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use openn_resolver::app::{ManuscriptResolver, ObjectPath};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = ManuscriptResolver::new()?;
//! let object = ObjectPath::new("0001/ljs103")?;
//!
//! let pages = resolver.page_count(&object).await?;
//! let language = resolver.main_language(&object).await?;
//! println!("{object}: {pages} pages, language {language:?}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod collections;
pub mod config;
pub mod manifest;
pub mod paths;
pub mod resolver;
pub mod tei;

// Re-export main public API
pub use client::{ClientConfig, HttpHandler, MockTransport, Transport};
pub use collections::{date_added, date_created, date_updated, CollectionsIndex, CsvRow};
pub use config::ResolverConfig;
pub use manifest::{count_pages, ManifestEntry};
pub use paths::{repo_tag, repository_number, ObjectPath};
pub use resolver::{ManuscriptResolver, ManuscriptSummary};
pub use tei::{scan_main_lang, TeiDocument};
