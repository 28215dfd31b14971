// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search backend error: {0}")]
    Backend(String),
    #[error("Invalid search parameter '{name}': {reason}")]
    InvalidParams { name: String, reason: String },
    #[error("Malformed search response: {0}")]
    MalformedResponse(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SearchError {
    pub(crate) fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Transport to the document-search engine.
///
/// Bodies are engine JSON: documents from
/// [`ProductDocument::to_json`](crate::search::ProductDocument::to_json),
/// requests from [`SearchRequest::to_json`](crate::search::SearchRequest::to_json).
/// Connection handling, retries and timeouts belong to the implementation.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Store (or replace) a document under `id`
    async fn index(&self, index: &str, id: &str, document: &Value) -> Result<(), SearchError>;

    /// Run a search request, returning the raw engine response
    async fn search(&self, index: &str, request: &Value) -> Result<Value, SearchError>;

    /// Fetch a stored document's source. `Ok(None)` when absent.
    async fn get(&self, index: &str, id: &str) -> Result<Option<Value>, SearchError>;

    /// Remove a document. Removing an absent id is not an error.
    async fn delete(&self, index: &str, id: &str) -> Result<(), SearchError>;
}
