// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Compiled search request.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use super::aggregations::Aggregation;
use super::dsl_translator::DslTranslator;
use super::query_builder::{BoolQuery, Query, QueryNode};
use super::sort::SortKey;

/// A complete request body for the search engine.
///
/// Serializes to:
///
/// ```text
/// {
///   "min_score": 0.1,
///   "query": {"bool": {"must": [...], "filter": [...]}},
///   "sort": [...],
///   "from": 0,
///   "size": 24,               <- only when a page size is configured
///   "aggregations": {...},
///   "post_filter": {...}      <- only with a valid price range
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Relevance floor for hits, facets are computed regardless
    pub min_score: f64,
    /// Scored clause plus the filters that also narrow facets
    pub query: Query,
    pub sort: Vec<SortKey>,
    pub from: u64,
    pub size: Option<u64>,
    pub aggregations: Vec<(String, Aggregation)>,
    /// Applied after facets are computed
    pub post_filter: Option<Query>,
}

impl SearchRequest {
    /// Render to engine JSON
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("min_score".to_string(), json!(self.min_score));
        body.insert("query".to_string(), DslTranslator::translate(&self.query));
        body.insert("sort".to_string(), DslTranslator::translate_sort(&self.sort));
        body.insert("from".to_string(), json!(self.from));
        if let Some(size) = self.size {
            body.insert("size".to_string(), json!(size));
        }
        body.insert(
            "aggregations".to_string(),
            DslTranslator::translate_aggregations(&self.aggregations),
        );
        if let Some(ref post_filter) = self.post_filter {
            body.insert("post_filter".to_string(), DslTranslator::translate(post_filter));
        }
        Value::Object(body)
    }

    /// Filter clauses of the main bool query (pre-aggregation)
    pub fn filters(&self) -> &[QueryNode] {
        match &self.query.root {
            QueryNode::Bool(BoolQuery { filter, .. }) => filter,
            _ => &[],
        }
    }

    /// Scored clauses of the main bool query
    pub fn must(&self) -> &[QueryNode] {
        match &self.query.root {
            QueryNode::Bool(BoolQuery { must, .. }) => must,
            _ => &[],
        }
    }
}

impl Serialize for SearchRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
