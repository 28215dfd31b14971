// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! # Catalog Search
//!
//! Product search for an Elasticsearch-style document engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Document Projector                      │
//! │  • CatalogProduct → flat/nested ProductDocument            │
//! │  • Taxon closure, property tokens, absent-when-empty       │
//! └─────────────────────────────────────────────────────────────┘
//!              │  shared field names (search::fields)
//!              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Query Compiler                        │
//! │  • SearchParams → SearchRequest                            │
//! │  • Text clause, facet-narrowing filters, sort, facets      │
//! │  • Price range as post filter (facets unaffected)          │
//! └─────────────────────────────────────────────────────────────┘
//!              │
//!              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ProductSearch + SearchClient                │
//! │  • index / search / get / delete over the client trait     │
//! │  • Response decoding into hits and facets                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The projector and compiler are pure and synchronous. Only the client
//! seam is async.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use catalog_search::{
//!     InMemorySearchClient, Product, ProductSearch, SearchConfig, SearchParams, Taxon, Variant,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Arc::new(InMemorySearchClient::new());
//!     let search = ProductSearch::new(client, SearchConfig::default());
//!
//!     let product = Product {
//!         id: 1,
//!         name: "Canvas Tote".into(),
//!         master: Variant::new("TOTE-1", 18.0),
//!         taxons: vec![Taxon::root(3, "Bags")],
//!         ..Default::default()
//!     };
//!     search.index_product(&product).await.expect("index");
//!
//!     let params = SearchParams::from_query_pairs([("query", "tote"), ("taxons[]", "3")])
//!         .expect("valid params");
//!     let results = search.search(&params).await.expect("search");
//!     println!("{} hits", results.total);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`search`]: projector, compiler, query AST, DSL translation, response decoding
//! - [`client`]: engine client trait and in-memory implementation
//! - [`service`]: [`ProductSearch`] facade
//! - [`product`]: product entity model
//! - [`config`]: [`SearchConfig`]
//! - [`metrics`]: `metrics` crate instrumentation

pub mod config;
pub mod product;
pub mod search;
pub mod client;
pub mod service;
pub mod metrics;

pub use config::SearchConfig;
pub use product::{CatalogProduct, Classification, OptionValue, Product, ProductProperty, Taxon, Variant};
pub use client::{InMemorySearchClient, SearchClient, SearchError};
pub use service::ProductSearch;
pub use search::{ProductDocument, QueryCompiler, SearchParams, SearchRequest, SearchResponse, Sorting};
