// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query Builder - AST for search queries
//!
//! Provides a type-safe way to build the query clauses the compiler emits.
//! The AST is rendered to engine JSON by [`DslTranslator`](super::DslTranslator).
//!
//! # Example
//!
//! ```rust
//! use catalog_search::search::{Query, QueryBuilder};
//!
//! // Simple term filter
//! let query = Query::terms("properties", vec!["color||red".into()]);
//!
//! // Scored clause plus filters
//! let query = QueryBuilder::new()
//!     .ids("taxon_ids", vec![5, 9])
//!     .date_range("available_on", None, Some("now"))
//!     .build_bool(Query::match_all());
//!
//! // Boolean combinations
//! let query = Query::missing("discontinue_on")
//!     .or(Query::date_range("discontinue_on", Some("now/h"), None));
//! ```

use serde::{Deserialize, Serialize};

/// Search query AST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Root query node
    pub root: QueryNode,
}

impl Query {
    /// Create a new query from a root node
    pub fn new(root: QueryNode) -> Self {
        Self { root }
    }

    /// Match every document, no scoring bias
    pub fn match_all() -> Self {
        Self::new(QueryNode::MatchAll)
    }

    /// Full-text query across several fields
    pub fn multi_match(text: impl Into<String>, fields: Vec<BoostedField>) -> Self {
        Self::new(QueryNode::MultiMatch(MultiMatchQuery {
            text: text.into(),
            fields,
            operator: MatchOperator::And,
            match_type: MultiMatchType::CrossFields,
        }))
    }

    /// Exact single-value match
    pub fn term(field: impl Into<String>, value: QueryValue) -> Self {
        Self::new(QueryNode::Field(FieldQuery {
            field: field.into(),
            operator: FieldOperator::Equals,
            value,
        }))
    }

    /// Keyword membership (OR within the list)
    pub fn terms(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(QueryNode::Field(FieldQuery {
            field: field.into(),
            operator: FieldOperator::In,
            value: QueryValue::Tags(values),
        }))
    }

    /// Integer id membership (OR within the list)
    pub fn ids(field: impl Into<String>, ids: Vec<u64>) -> Self {
        Self::new(QueryNode::Field(FieldQuery {
            field: field.into(),
            operator: FieldOperator::In,
            value: QueryValue::Ids(ids),
        }))
    }

    /// Inclusive numeric range
    pub fn numeric_range(field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(QueryNode::Field(FieldQuery {
            field: field.into(),
            operator: FieldOperator::Range,
            value: QueryValue::NumericRange { min, max },
        }))
    }

    /// Inclusive date range, bounds are engine date-math expressions (`now`, `now/h`)
    pub fn date_range(field: impl Into<String>, gte: Option<&str>, lte: Option<&str>) -> Self {
        Self::new(QueryNode::Field(FieldQuery {
            field: field.into(),
            operator: FieldOperator::Range,
            value: QueryValue::DateRange {
                gte: gte.map(str::to_string),
                lte: lte.map(str::to_string),
            },
        }))
    }

    /// Field has a value
    pub fn exists(field: impl Into<String>) -> Self {
        Self::new(QueryNode::Field(FieldQuery {
            field: field.into(),
            operator: FieldOperator::Exists,
            value: QueryValue::Empty,
        }))
    }

    /// Field has no value
    pub fn missing(field: impl Into<String>) -> Self {
        Self::exists(field).negate()
    }

    /// Combine with OR
    pub fn or(self, other: Query) -> Self {
        Self::new(QueryNode::Bool(BoolQuery {
            should: vec![self.root, other.root],
            ..Default::default()
        }))
    }

    /// Negate query
    pub fn negate(self) -> Self {
        Self::new(QueryNode::Bool(BoolQuery {
            must_not: vec![self.root],
            ..Default::default()
        }))
    }
}

/// Query AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryNode {
    /// Matches everything: {"match_all": {}}
    MatchAll,
    /// Full-text: {"multi_match": {...}}
    MultiMatch(MultiMatchQuery),
    /// Field query: term / terms / range / exists
    Field(FieldQuery),
    /// Boolean compound: {"bool": {"must", "filter", "should", "must_not"}}
    Bool(BoolQuery),
}

/// Boolean compound query.
///
/// `must` clauses score, `filter` clauses only narrow. A bool with only
/// `should` clauses requires at least one to match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoolQuery {
    pub must: Vec<QueryNode>,
    pub filter: Vec<QueryNode>,
    pub should: Vec<QueryNode>,
    pub must_not: Vec<QueryNode>,
}

/// Full-text query over several fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiMatchQuery {
    pub text: String,
    pub fields: Vec<BoostedField>,
    pub operator: MatchOperator,
    pub match_type: MultiMatchType,
}

/// Field name with an optional score multiplier (`name^5`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostedField {
    pub field: String,
    pub boost: Option<f64>,
}

impl BoostedField {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            boost: None,
        }
    }

    pub fn boosted(field: impl Into<String>, boost: f64) -> Self {
        Self {
            field: field.into(),
            boost: Some(boost),
        }
    }
}

/// How query terms combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOperator {
    /// Every term must match
    And,
}

/// Multi-field scoring strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiMatchType {
    /// Term-centric: each term scored by its best field
    CrossFields,
}

/// Field query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldQuery {
    /// Field name (e.g., "price", "taxon_ids", "properties")
    pub field: String,
    /// Comparison operator
    pub operator: FieldOperator,
    /// Query value
    pub value: QueryValue,
}

/// Field comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldOperator {
    /// Exact match: {"term": ...}
    Equals,
    /// Range: {"range": ...}
    Range,
    /// Membership: {"terms": ...}
    In,
    /// Has a value: {"exists": ...}
    Exists,
}

/// Query value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryValue {
    /// No operand (exists)
    Empty,
    /// Integer value
    Integer(u64),
    /// Numeric range [min, max]
    NumericRange { min: Option<f64>, max: Option<f64> },
    /// Date range with date-math bounds
    DateRange { gte: Option<String>, lte: Option<String> },
    /// Keyword values (OR semantics)
    Tags(Vec<String>),
    /// Integer ids (OR semantics)
    Ids(Vec<u64>),
}

/// Builder for a bool query with a scored clause and a filter list
#[derive(Default)]
pub struct QueryBuilder {
    filters: Vec<QueryNode>,
}

impl QueryBuilder {
    /// Create a new query builder
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Add an arbitrary filter
    pub fn filter(mut self, query: Query) -> Self {
        self.filters.push(query.root);
        self
    }

    /// Add a keyword membership filter
    pub fn terms(self, field: impl Into<String>, values: Vec<String>) -> Self {
        self.filter(Query::terms(field, values))
    }

    /// Add an id membership filter
    pub fn ids(self, field: impl Into<String>, ids: Vec<u64>) -> Self {
        self.filter(Query::ids(field, ids))
    }

    /// Add a date range filter
    pub fn date_range(self, field: impl Into<String>, gte: Option<&str>, lte: Option<&str>) -> Self {
        self.filter(Query::date_range(field, gte, lte))
    }

    /// Build `bool { must: [scored], filter: [...] }`
    pub fn build_bool(self, scored: Query) -> Query {
        Query::new(QueryNode::Bool(BoolQuery {
            must: vec![scored.root],
            filter: self.filters,
            ..Default::default()
        }))
    }
}
