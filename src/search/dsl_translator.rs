// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query DSL Translator
//!
//! Translates the Query AST, sort keys and aggregation specs to the engine's
//! JSON query DSL.
//!
//! # Query DSL
//!
//! ```text
//! {"match_all": {}}                                      - Everything
//! {"multi_match": {"query", "fields", "operator", "type"}} - Full text
//! {"term": {"field": value}}                             - Exact match
//! {"terms": {"field": [v1, v2]}}                         - Membership (OR)
//! {"range": {"field": {"gte": a, "lte": b}}}             - Range
//! {"exists": {"field": "field"}}                         - Has value
//! {"bool": {"must", "filter", "should", "must_not"}}     - Boolean
//! ```

use serde_json::{json, Map, Value};

use super::aggregations::{Aggregation, BucketOrder};
use super::query_builder::{
    BoolQuery, BoostedField, FieldOperator, FieldQuery, MatchOperator, MultiMatchQuery,
    MultiMatchType, Query, QueryNode, QueryValue,
};
use super::sort::SortKey;

/// Query DSL translator
pub struct DslTranslator;

impl DslTranslator {
    /// Translate Query AST to a DSL clause
    pub fn translate(query: &Query) -> Value {
        Self::translate_node(&query.root)
    }

    /// Translate a sort list
    pub fn translate_sort(keys: &[SortKey]) -> Value {
        Value::Array(keys.iter().map(Self::translate_sort_key).collect())
    }

    /// Translate named aggregations into the `aggregations` object
    pub fn translate_aggregations(aggregations: &[(String, Aggregation)]) -> Value {
        let mut map = Map::new();
        for (name, aggregation) in aggregations {
            map.insert(name.clone(), Self::translate_aggregation(aggregation));
        }
        Value::Object(map)
    }

    fn translate_node(node: &QueryNode) -> Value {
        match node {
            QueryNode::MatchAll => json!({ "match_all": {} }),
            QueryNode::MultiMatch(multi) => Self::translate_multi_match(multi),
            QueryNode::Field(field_query) => Self::translate_field(field_query),
            QueryNode::Bool(bool_query) => Self::translate_bool(bool_query),
        }
    }

    fn translate_bool(query: &BoolQuery) -> Value {
        let mut clauses = Map::new();
        for (name, nodes) in [
            ("must", &query.must),
            ("filter", &query.filter),
            ("should", &query.should),
            ("must_not", &query.must_not),
        ] {
            if !nodes.is_empty() {
                let translated = nodes.iter().map(Self::translate_node).collect();
                clauses.insert(name.to_string(), Value::Array(translated));
            }
        }
        json!({ "bool": clauses })
    }

    fn translate_multi_match(query: &MultiMatchQuery) -> Value {
        let fields: Vec<String> = query.fields.iter().map(Self::boosted_field).collect();
        let operator = match query.operator {
            MatchOperator::And => "and",
        };
        let match_type = match query.match_type {
            MultiMatchType::CrossFields => "cross_fields",
        };
        json!({
            "multi_match": {
                "query": query.text,
                "fields": fields,
                "operator": operator,
                "type": match_type,
            }
        })
    }

    fn boosted_field(field: &BoostedField) -> String {
        match field.boost {
            Some(boost) => format!("{}^{}", field.field, boost),
            None => field.field.clone(),
        }
    }

    fn translate_field(query: &FieldQuery) -> Value {
        let field = query.field.as_str();

        match (&query.operator, &query.value) {
            (FieldOperator::Equals, QueryValue::Integer(n)) => json!({ "term": { field: n } }),
            (FieldOperator::In, QueryValue::Tags(values)) => json!({ "terms": { field: values } }),
            (FieldOperator::In, QueryValue::Ids(ids)) => json!({ "terms": { field: ids } }),
            (FieldOperator::Range, QueryValue::NumericRange { min, max }) => {
                let mut bounds = Map::new();
                if let Some(min) = min {
                    bounds.insert("gte".to_string(), json!(min));
                }
                if let Some(max) = max {
                    bounds.insert("lte".to_string(), json!(max));
                }
                json!({ "range": { field: bounds } })
            }
            (FieldOperator::Range, QueryValue::DateRange { gte, lte }) => {
                let mut bounds = Map::new();
                if let Some(gte) = gte {
                    bounds.insert("gte".to_string(), json!(gte));
                }
                if let Some(lte) = lte {
                    bounds.insert("lte".to_string(), json!(lte));
                }
                json!({ "range": { field: bounds } })
            }
            (FieldOperator::Exists, _) => json!({ "exists": { "field": field } }),
            _ => {
                // Mismatched operator/value pairs are not built by this crate
                tracing::warn!(field = %field, operator = ?query.operator, "Untranslatable field query, matching all");
                json!({ "match_all": {} })
            }
        }
    }

    fn translate_sort_key(key: &SortKey) -> Value {
        match key {
            SortKey::Score => json!("_score"),
            SortKey::Field { field, order } => json!({ field.as_str(): { "order": order.as_str() } }),
            SortKey::Nested {
                field,
                order,
                mode,
                path,
                filter,
            } => json!({
                field.as_str(): {
                    "order": order.as_str(),
                    "mode": mode.as_str(),
                    "nested": {
                        "path": path,
                        "filter": Self::translate(filter),
                    }
                }
            }),
        }
    }

    fn translate_aggregation(aggregation: &Aggregation) -> Value {
        match aggregation {
            Aggregation::Stats { field } => json!({ "stats": { "field": field } }),
            Aggregation::Terms { field, size, order } => {
                let mut terms = Map::new();
                terms.insert("field".to_string(), json!(field));
                terms.insert("size".to_string(), json!(size));
                if let Some(BucketOrder::CountAsc) = order {
                    terms.insert("order".to_string(), json!({ "_count": "asc" }));
                }
                json!({ "terms": terms })
            }
        }
    }
}
