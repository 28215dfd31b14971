// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Product search service.
//!
//! Wires the projector and compiler to a [`SearchClient`].
//!
//! ```text
//! index_product(product)
//!       └─→ ProductDocument::project ─→ client.index(index, id, doc)
//!
//! search(params)
//!       ├─→ QueryCompiler::compile ─→ client.search(index, body)
//!       └─→ SearchResponse::from_json (hits + facets)
//!
//! get_by_id(id) ─→ client.get(index, id)
//! ```
//!
//! Client failures are returned unchanged; the service adds logging and
//! metrics, never retries.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::client::{SearchClient, SearchError};
use crate::config::SearchConfig;
use crate::metrics;
use crate::product::CatalogProduct;
use crate::search::{ProductDocument, QueryCompiler, SearchParams, SearchRequest, SearchResponse};

/// Product search over one index.
pub struct ProductSearch<C: ?Sized> {
    client: Arc<C>,
    compiler: QueryCompiler,
}

impl<C: SearchClient + ?Sized> ProductSearch<C> {
    pub fn new(client: Arc<C>, config: SearchConfig) -> Self {
        Self {
            client,
            compiler: QueryCompiler::new(config),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        self.compiler.config()
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    fn index_name(&self) -> &str {
        &self.compiler.config().index_name
    }

    /// Compile without sending, for inspection and debugging
    pub fn compile(&self, params: &SearchParams) -> SearchRequest {
        self.compiler.compile(params)
    }

    /// Project a product and write it to the index.
    ///
    /// Returns the document that was stored.
    #[tracing::instrument(skip(self, product), fields(product_id = product.id()))]
    pub async fn index_product<P>(&self, product: &P) -> Result<ProductDocument, SearchError>
    where
        P: CatalogProduct + ?Sized + Sync,
    {
        let id = product.id().to_string();
        let document = ProductDocument::project(product);
        metrics::record_projection();

        let result = self.client.index(self.index_name(), &id, &document.to_json()).await;
        metrics::record_document_operation("index", result.is_ok());
        match result {
            Ok(()) => {
                debug!(index = %self.index_name(), id = %id, "Indexed product");
                Ok(document)
            }
            Err(e) => {
                warn!(index = %self.index_name(), id = %id, error = %e, "Failed to index product");
                Err(e)
            }
        }
    }

    /// Remove a product's document from the index
    #[tracing::instrument(skip(self))]
    pub async fn remove_product(&self, id: u64) -> Result<(), SearchError> {
        let result = self.client.delete(self.index_name(), &id.to_string()).await;
        metrics::record_document_operation("delete", result.is_ok());
        if let Err(ref e) = result {
            warn!(index = %self.index_name(), id, error = %e, "Failed to remove product");
        }
        result
    }

    /// Compile, run and decode a product search.
    #[tracing::instrument(skip(self, params), fields(sorting = %params.sorting, from = params.from, total))]
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse, SearchError> {
        let start = Instant::now();
        let body = self.compiler.compile(params).to_json();

        let raw = match self.client.search(self.index_name(), &body).await {
            Ok(raw) => raw,
            Err(e) => {
                metrics::record_search_query("error");
                warn!(index = %self.index_name(), error = %e, "Product search failed");
                return Err(e);
            }
        };

        let response = SearchResponse::from_json(&raw).map_err(|e| {
            metrics::record_search_query("malformed");
            warn!(index = %self.index_name(), error = %e, "Undecodable search response");
            e
        })?;

        tracing::Span::current().record("total", response.total);
        metrics::record_search_query("success");
        metrics::record_search_latency(start.elapsed());
        metrics::record_search_results(response.hits.len());
        debug!(
            index = %self.index_name(),
            total = response.total,
            returned = response.hits.len(),
            "Product search complete"
        );
        Ok(response)
    }

    /// Fetch a stored document by product id
    #[tracing::instrument(skip(self), fields(found))]
    pub async fn get_by_id(&self, id: u64) -> Result<Option<ProductDocument>, SearchError> {
        let result = self.client.get(self.index_name(), &id.to_string()).await;
        metrics::record_document_operation("get", result.is_ok());
        let source = result?;
        tracing::Span::current().record("found", source.is_some());
        match source {
            Some(source) => Ok(Some(serde_json::from_value(source)?)),
            None => Ok(None),
        }
    }
}
