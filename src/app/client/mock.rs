//! In-memory transport
//!
//! Serves documents registered up front, keyed by URL. Useful for working
//! against a local mirror and for exercising the resolver without a network.
//! Every request is recorded so callers can check which URLs were checked and
//! in what order.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use super::Transport;
use crate::errors::{FetchError, FetchResult};

/// Kind of request seen by the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Head,
    Get,
}

/// Transport answering from registered documents and statuses
#[derive(Debug, Default)]
pub struct MockTransport {
    documents: HashMap<String, String>,
    statuses: HashMap<String, u16>,
    requests: Mutex<Vec<(RequestKind, String)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a document; HEAD on its URL answers 200
    pub fn with_document(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.documents.insert(url.into(), body.into());
        self
    }

    /// Forces the HEAD status of a URL, e.g. a 301 or 503
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.statuses.insert(url.into(), status);
        self
    }

    /// Requests seen so far, in order
    pub fn requests(&self) -> Vec<(RequestKind, String)> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// URLs fetched with GET, in order
    pub fn fetched(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|(kind, _)| *kind == RequestKind::Get)
            .map(|(_, url)| url)
            .collect()
    }

    fn record(&self, kind: RequestKind, url: &Url) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((kind, url.to_string()));
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn head_status(&self, url: &Url) -> FetchResult<u16> {
        self.record(RequestKind::Head, url);
        if let Some(status) = self.statuses.get(url.as_str()) {
            return Ok(*status);
        }
        Ok(if self.documents.contains_key(url.as_str()) {
            200
        } else {
            404
        })
    }

    async fn get_text(&self, url: &Url) -> FetchResult<String> {
        self.record(RequestKind::Get, url);
        self.documents
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| FetchError::Unavailable {
                url: url.to_string(),
            })
    }
}
