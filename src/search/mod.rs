// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search Infrastructure
//!
//! Document projection and query compilation for the product index.
//!
//! # Architecture
//!
//! ```text
//! CatalogProduct ─→ ProductDocument::project ─→ index document
//!
//! SearchParams ─→ QueryCompiler
//!                     ├─→ Query AST (query_builder)
//!                     ├─→ SortKey list (sort)
//!                     └─→ Aggregation specs (aggregations)
//!                              ↓
//!                       SearchRequest ─→ DslTranslator ─→ engine JSON
//!
//! engine JSON ─→ SearchResponse (hits + facets)
//! ```
//!
//! The projector and compiler only meet through the document field names in
//! [`fields`]: anything the compiler filters, sorts or aggregates on is
//! written by the projector under the same name.
//!
//! # Example
//!
//! ```rust
//! use catalog_search::search::{QueryCompiler, SearchParams, Sorting};
//!
//! let params = SearchParams {
//!     query: Some("red shoes".into()),
//!     taxons: vec![5, 9],
//!     sorting: Sorting::PriceAsc,
//!     from: 20,
//!     ..Default::default()
//! };
//!
//! let body = QueryCompiler::default().compile(&params).to_json();
//! assert_eq!(body["from"], 20);
//! assert_eq!(body["sort"][0]["price"]["order"], "asc");
//! ```

mod aggregations;
mod compiler;
mod document;
mod dsl_translator;
mod params;
mod query_builder;
mod request;
mod response;
mod sort;

pub use aggregations::{product_facets, Aggregation, BucketOrder};
pub use compiler::QueryCompiler;
pub use document::{
    fields, ClassificationDocument, OptionValueDocument, ProductDocument, VariantDocument,
};
pub use dsl_translator::DslTranslator;
pub use params::SearchParams;
pub use query_builder::{
    BoolQuery, BoostedField, FieldOperator, FieldQuery, MatchOperator, MultiMatchQuery,
    MultiMatchType, Query, QueryBuilder, QueryNode, QueryValue,
};
pub use request::SearchRequest;
pub use response::{Facets, PriceStats, PropertyFacet, SearchHit, SearchResponse, TaxonFacet};
pub use sort::{default_sort, resolve as resolve_sort, SortKey, SortMode, SortOrder, Sorting};
