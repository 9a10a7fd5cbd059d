//! HTTP access to the OPenn repository
//!
//! The resolver talks to the network through the [`Transport`] trait, which
//! covers the three requests it ever makes: an existence check, a full text
//! fetch and a bounded prefix fetch.
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `http`: reqwest-backed transport with optional retries
//! - `mock`: in-memory transport serving registered documents

use std::fmt::Debug;

use async_trait::async_trait;
use url::Url;

use crate::errors::FetchResult;

pub mod config;
pub mod http;
pub mod mock;

pub use config::ClientConfig;
pub use http::HttpHandler;
pub use mock::MockTransport;

/// Read-only access to remote documents
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Status code answered to a HEAD request, without following redirects
    async fn head_status(&self, url: &Url) -> FetchResult<u16>;

    /// Full body of a document
    async fn get_text(&self, url: &Url) -> FetchResult<String>;

    /// At most `limit` bytes from the head of a document
    async fn get_prefix(&self, url: &Url, limit: usize) -> FetchResult<String> {
        let mut text = self.get_text(url).await?;
        text.truncate(floor_char_boundary(&text, limit));
        Ok(text)
    }
}

/// Largest index `<= limit` that falls on a char boundary of `text`
pub(crate) fn floor_char_boundary(text: &str, limit: usize) -> usize {
    if limit >= text.len() {
        return text.len();
    }
    let mut index = limit;
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
