// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search response decoding.
//!
//! Reads the engine's response body into typed hits and facets. Property
//! facet buckets come back as `name||value` tokens and are split here so
//! callers never see the encoding.

use serde::Deserialize;
use serde_json::Value;

use super::aggregations;
use super::document::{token, ProductDocument};
use crate::client::SearchError;

/// Decoded search response
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    /// Total matching documents (after post filter)
    pub total: u64,
    pub max_score: Option<f64>,
    pub hits: Vec<SearchHit>,
    pub facets: Facets,
}

/// A single matching document
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub score: Option<f64>,
    pub document: ProductDocument,
}

/// Facet counts computed alongside the hits
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facets {
    pub price: Option<PriceStats>,
    pub properties: Vec<PropertyFacet>,
    pub taxons: Vec<TaxonFacet>,
}

/// Price statistics. Bounds are `None` when no document matched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceStats {
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    #[serde(default)]
    pub sum: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFacet {
    pub name: String,
    pub value: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaxonFacet {
    pub taxon_id: u64,
    pub count: u64,
}

#[derive(Deserialize)]
struct Bucket {
    key: Value,
    doc_count: u64,
}

#[derive(Deserialize)]
struct TermsResult {
    #[serde(default)]
    buckets: Vec<Bucket>,
}

impl SearchResponse {
    /// Decode a raw engine response
    pub fn from_json(value: &Value) -> Result<Self, SearchError> {
        let hits = value
            .get("hits")
            .ok_or_else(|| SearchError::MalformedResponse("missing 'hits'".into()))?;

        // Either a bare number or {"value": n, "relation": "eq"}
        let total = match hits.get("total") {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(other) => other.get("value").and_then(Value::as_u64).unwrap_or(0),
            None => 0,
        };

        let hits = hits
            .get("hits")
            .and_then(Value::as_array)
            .map(|raw| raw.iter().map(Self::decode_hit).collect::<Result<Vec<_>, _>>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            total,
            max_score: value.get("hits").and_then(|h| h.get("max_score")).and_then(Value::as_f64),
            hits,
            facets: Facets::from_aggregations(value.get("aggregations")),
        })
    }

    fn decode_hit(hit: &Value) -> Result<SearchHit, SearchError> {
        let id = hit
            .get("_id")
            .and_then(Value::as_str)
            .ok_or_else(|| SearchError::MalformedResponse("hit without '_id'".into()))?;
        let source = hit
            .get("_source")
            .ok_or_else(|| SearchError::MalformedResponse(format!("hit '{}' without '_source'", id)))?;

        Ok(SearchHit {
            id: id.to_string(),
            score: hit.get("_score").and_then(Value::as_f64),
            document: ProductDocument::deserialize(source)?,
        })
    }
}

impl Facets {
    /// Decode the `aggregations` object. Missing or unreadable facets are empty.
    pub fn from_aggregations(aggs: Option<&Value>) -> Self {
        let Some(aggs) = aggs else {
            return Self::default();
        };

        let price = aggs
            .get(aggregations::PRICE)
            .and_then(|v| PriceStats::deserialize(v).ok());

        let properties = buckets(aggs, aggregations::PROPERTIES)
            .into_iter()
            .filter_map(|bucket| {
                let (name, value) = token::decode(bucket.key.as_str()?)?;
                Some(PropertyFacet {
                    name: name.to_string(),
                    value: value.to_string(),
                    count: bucket.doc_count,
                })
            })
            .collect();

        let taxons = buckets(aggs, aggregations::TAXON_IDS)
            .into_iter()
            .filter_map(|bucket| {
                // Numeric for long mappings, string for keyword mappings
                let taxon_id = match &bucket.key {
                    Value::Number(n) => n.as_u64()?,
                    Value::String(s) => s.parse().ok()?,
                    _ => return None,
                };
                Some(TaxonFacet {
                    taxon_id,
                    count: bucket.doc_count,
                })
            })
            .collect();

        Self {
            price,
            properties,
            taxons,
        }
    }
}

fn buckets(aggs: &Value, name: &str) -> Vec<Bucket> {
    aggs.get(name)
        .and_then(|v| TermsResult::deserialize(v).ok())
        .map(|terms| terms.buckets)
        .unwrap_or_default()
}
