//! Manuscript metadata resolver
//!
//! Ties URL construction, existence checks and content extraction together.
//! Every operation is a short, strictly sequential series of requests: check
//! the candidates in order, then fetch the first one that exists.

use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use super::client::{ClientConfig, HttpHandler, Transport};
use super::collections::{parse_rows, CollectionsIndex, CsvRow};
use super::manifest::count_pages;
use super::paths::{self, parse_url, ObjectPath};
use super::tei::{scan_main_lang, TeiDocument};
use super::ResolverConfig;
use crate::errors::{AppError, ManifestError, Result};

/// Everything the resolver can say about one object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManuscriptSummary {
    pub object_path: ObjectPath,
    pub repository: String,
    pub manifest_url: Option<String>,
    pub page_count: Option<usize>,
    pub tei_url: Option<String>,
    pub main_language: Option<String>,
}

/// Resolves manifests, TEI descriptions and collection metadata on OPenn
#[derive(Debug)]
pub struct ManuscriptResolver<T: Transport = HttpHandler> {
    transport: T,
    config: ResolverConfig,
}

impl ManuscriptResolver<HttpHandler> {
    /// Creates a resolver for the public OPenn repository
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the HTTP client cannot be built
    pub fn new() -> Result<Self> {
        Self::with_config(ResolverConfig::default(), ClientConfig::default())
    }

    /// Creates a resolver with custom locations and client settings
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the locations fail validation or the HTTP client
    /// cannot be built
    pub fn with_config(config: ResolverConfig, client: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpHandler::new(client)?;
        info!("Created OPenn resolver for {}", config.data_url);
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> ManuscriptResolver<T> {
    /// Creates a resolver over an arbitrary transport
    pub fn with_transport(transport: T, config: ResolverConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// True iff a HEAD request answers exactly 200
    ///
    /// Redirects, client and server errors all count as absent. Transport
    /// failures are returned as errors.
    pub async fn exists_at(&self, url: &Url) -> Result<bool> {
        let status = self.transport.head_status(url).await?;
        Ok(status == 200)
    }

    /// First candidate that exists, probing in order
    pub async fn first_existing<I>(&self, candidates: I) -> Result<Option<Url>>
    where
        I: IntoIterator<Item = Url>,
    {
        for url in candidates {
            if self.exists_at(&url).await? {
                debug!("Found {}", url);
                return Ok(Some(url));
            }
            debug!("Not found: {}", url);
        }
        Ok(None)
    }

    /// Locates the object's manifest, preferring SHA-1 over MD5
    pub async fn find_manifest_url(&self, object_path: &ObjectPath) -> Result<Option<Url>> {
        let candidates = paths::manifest_candidates(&self.config, object_path)?;
        self.first_existing(candidates).await
    }

    /// Locates the object's TEI description
    pub async fn find_tei_url(&self, object_path: &ObjectPath) -> Result<Option<Url>> {
        let candidate = paths::tei_candidate(&self.config, object_path)?;
        self.first_existing([candidate]).await
    }

    /// Number of master images listed in the object's manifest
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::NoManifest` when neither manifest exists
    pub async fn page_count(&self, object_path: &ObjectPath) -> Result<usize> {
        let url = self.find_manifest_url(object_path).await?.ok_or_else(|| {
            ManifestError::NoManifest {
                object_path: object_path.to_string(),
            }
        })?;
        let manifest = self.transport.get_text(&url).await?;
        let pages = count_pages(&manifest);
        debug!("{}: {} pages listed in {}", object_path, pages, url);
        Ok(pages)
    }

    /// Fetches and parses the object's TEI description, if it has one
    pub async fn tei(&self, object_path: &ObjectPath) -> Result<Option<TeiDocument>> {
        let Some(url) = self.find_tei_url(object_path).await? else {
            return Ok(None);
        };
        let xml = self.transport.get_text(&url).await?;
        Ok(Some(TeiDocument::parse(&xml)?))
    }

    /// Primary language declared in the object's TEI description
    ///
    /// Parses the whole document. `None` when there is no TEI file or it
    /// declares no `mainLang`; the latter also logs a warning.
    pub async fn main_language(&self, object_path: &ObjectPath) -> Result<Option<String>> {
        let Some(document) = self.tei(object_path).await? else {
            return Ok(None);
        };
        let lang = document.main_lang().map(|lang| lang.trim().to_string());
        Ok(report_missing_lang(object_path, lang))
    }

    /// Primary language from a regex scan of the head of the TEI file
    ///
    /// Reads at most `tei_scan_limit` bytes, so a declaration further into a
    /// large document is missed.
    pub async fn main_language_scan(&self, object_path: &ObjectPath) -> Result<Option<String>> {
        let Some(url) = self.find_tei_url(object_path).await? else {
            return Ok(None);
        };
        let head = self
            .transport
            .get_prefix(&url, self.config.tei_scan_limit)
            .await?;
        let lang = scan_main_lang(&head).map(str::to_string);
        Ok(report_missing_lang(object_path, lang))
    }

    /// Fetches the collections CSV and indexes it by `repository_id`
    pub async fn collections_index(&self) -> Result<CollectionsIndex> {
        let url = parse_url(self.config.collections_csv_url.clone())?;
        let text = self.transport.get_text(&url).await?;
        let index = CollectionsIndex::from_csv(&text)?;
        debug!("Indexed {} collections from {}", index.len(), url);
        Ok(index)
    }

    /// Location of a repository's contents listing
    pub fn csv_url(&self, repo_number: &str) -> Result<Url> {
        Ok(paths::csv_url(&self.config, repo_number)?)
    }

    /// Fetches and parses a repository's contents listing
    pub async fn repository_contents(&self, repo_number: &str) -> Result<Vec<CsvRow>> {
        let url = self.csv_url(repo_number)?;
        let text = self.transport.get_text(&url).await?;
        let (_, rows) = parse_rows(&text).map_err(AppError::from)?;
        Ok(rows)
    }

    /// Resolves manifest, page count, TEI and language for one object
    ///
    /// A missing manifest leaves `page_count` empty instead of failing.
    pub async fn summarize(&self, object_path: &ObjectPath) -> Result<ManuscriptSummary> {
        let manifest_url = self.find_manifest_url(object_path).await?;
        let page_count = match &manifest_url {
            Some(url) => Some(count_pages(&self.transport.get_text(url).await?)),
            None => None,
        };

        let tei_url = self.find_tei_url(object_path).await?;
        let main_language = match &tei_url {
            Some(url) => {
                let document = TeiDocument::parse(&self.transport.get_text(url).await?)?;
                let lang = document.main_lang().map(|lang| lang.trim().to_string());
                report_missing_lang(object_path, lang)
            }
            None => None,
        };

        Ok(ManuscriptSummary {
            object_path: object_path.clone(),
            repository: object_path.repository_number().to_string(),
            manifest_url: manifest_url.map(String::from),
            page_count,
            tei_url: tei_url.map(String::from),
            main_language,
        })
    }
}

fn report_missing_lang(object_path: &ObjectPath, lang: Option<String>) -> Option<String> {
    let lang = lang.filter(|lang| !lang.is_empty());
    if lang.is_none() {
        warn!("No mainLang found for {}", object_path);
    }
    lang
}
