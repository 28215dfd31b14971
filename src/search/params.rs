// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search parameters and boundary parsing.
//!
//! The compiler trusts its input types. Anything coming from outside (a JSON
//! body, an HTTP query string) is parsed here first, and type errors are
//! rejected with [`SearchError::InvalidParams`]. Values that are well-typed
//! but contradictory (inverted price range, unknown sort) are accepted and
//! later ignored by the compiler.
//!
//! # Example
//!
//! ```
//! use catalog_search::search::{SearchParams, Sorting};
//!
//! let params = SearchParams::from_query_pairs([
//!     ("query", "red shoes"),
//!     ("taxons[]", "5"),
//!     ("taxons[]", "9"),
//!     ("properties[color][]", "red"),
//!     ("sorting", "price_asc"),
//!     ("from", "20"),
//! ])
//! .unwrap();
//!
//! assert_eq!(params.taxons, vec![5, 9]);
//! assert_eq!(params.sorting, Sorting::PriceAsc);
//! assert_eq!(params.from, 20);
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::sort::Sorting;
use crate::client::SearchError;

/// Everything a product search can ask for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Pagination offset
    pub from: u64,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// Property name to accepted values (OR within a name, AND across names)
    pub properties: BTreeMap<String, Vec<String>>,
    /// Free text, blank means match everything
    pub query: Option<String>,
    /// Taxon ids, any match qualifies; the first drives classification sorting
    pub taxons: Vec<u64>,
    /// Accepted for API compatibility, does not change the compiled request
    pub browse_mode: bool,
    pub sorting: Sorting,
}

impl SearchParams {
    /// Parse a JSON parameter object
    pub fn from_json(json: &str) -> Result<Self, SearchError> {
        serde_json::from_str(json).map_err(|e| SearchError::invalid("params", e.to_string()))
    }

    /// Convert an already-parsed JSON value
    pub fn from_value(value: Value) -> Result<Self, SearchError> {
        serde_json::from_value(value).map_err(|e| SearchError::invalid("params", e.to_string()))
    }

    /// Parse HTTP-style `key=value` pairs.
    ///
    /// Recognized keys: `query`, `from`, `price_min`, `price_max`,
    /// `taxons` / `taxons[]` (repeatable, comma-separated allowed),
    /// `properties[<name>]` / `properties[<name>][]` (repeatable), `sorting`,
    /// `browse_mode`. Other keys are ignored. Empty values count as absent.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }

            match key {
                "query" => params.query = Some(value.to_string()),
                "from" => params.from = parse_number(key, value)?,
                "price_min" => params.price_min = Some(parse_price(key, value)?),
                "price_max" => params.price_max = Some(parse_price(key, value)?),
                "taxons" | "taxons[]" => {
                    for id in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                        params.taxons.push(parse_number(key, id)?);
                    }
                }
                "sorting" => params.sorting = Sorting::parse(value),
                "browse_mode" => params.browse_mode = parse_flag(key, value)?,
                _ => match property_name(key) {
                    Some(name) => params
                        .properties
                        .entry(name.to_string())
                        .or_default()
                        .push(value.to_string()),
                    None => debug!(key = %key, "Ignoring unknown search parameter"),
                },
            }
        }

        Ok(params)
    }

    /// Trimmed free text, `None` when blank
    pub fn text(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Price bounds, only when both are present and min < max
    pub fn price_range(&self) -> Option<(f64, f64)> {
        match (self.price_min, self.price_max) {
            (Some(min), Some(max)) if min < max => Some((min, max)),
            _ => None,
        }
    }
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<T, SearchError> {
    value
        .parse()
        .map_err(|_| SearchError::invalid(name, format!("'{}' is not a valid number", value)))
}

/// `f64::from_str` accepts `inf` and `NaN`, neither bounds a range
fn parse_price(name: &str, value: &str) -> Result<f64, SearchError> {
    let price: f64 = parse_number(name, value)?;
    if price.is_finite() {
        Ok(price)
    } else {
        Err(SearchError::invalid(name, format!("'{}' is not a finite price", value)))
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, SearchError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(SearchError::invalid(name, format!("'{}' is not a boolean", value))),
    }
}

/// `properties[color]` or `properties[color][]` -> `color`
fn property_name(key: &str) -> Option<&str> {
    let rest = key.strip_prefix("properties[")?;
    let rest = rest.strip_suffix("[]").unwrap_or(rest);
    let name = rest.strip_suffix(']')?;
    if name.is_empty() || name.contains(['[', ']']) {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let params = SearchParams::default();
        assert_eq!(params.from, 0);
        assert_eq!(params.sorting, Sorting::Default);
        assert!(params.text().is_none());
        assert!(params.price_range().is_none());
    }

    #[test]
    fn test_from_json() {
        let params = SearchParams::from_json(
            r#"{"query": "red shoes", "taxons": [5, 9], "sorting": "price_asc", "from": 20,
                "properties": {"color": ["red", "blue"]}}"#,
        )
        .unwrap();
        assert_eq!(params.text(), Some("red shoes"));
        assert_eq!(params.taxons, vec![5, 9]);
        assert_eq!(params.sorting, Sorting::PriceAsc);
        assert_eq!(params.from, 20);
        assert_eq!(params.properties["color"], vec!["red", "blue"]);
    }

    #[test]
    fn test_from_json_rejects_malformed_price() {
        let err = SearchParams::from_json(r#"{"price_min": "cheap"}"#).unwrap_err();
        assert!(matches!(err, SearchError::InvalidParams { .. }));
    }

    #[test]
    fn test_from_value_unknown_sorting_is_default() {
        let params = SearchParams::from_value(json!({"sorting": "bestselling"})).unwrap();
        assert_eq!(params.sorting, Sorting::Default);
    }

    #[test]
    fn test_query_pairs_properties() {
        let params = SearchParams::from_query_pairs([
            ("properties[color][]", "red"),
            ("properties[color][]", "blue"),
            ("properties[size]", "M"),
        ])
        .unwrap();
        assert_eq!(params.properties.len(), 2);
        assert_eq!(params.properties["color"], vec!["red", "blue"]);
        assert_eq!(params.properties["size"], vec!["M"]);
    }

    #[test]
    fn test_query_pairs_comma_taxons() {
        let params = SearchParams::from_query_pairs([("taxons", "3, 4,")]).unwrap();
        assert_eq!(params.taxons, vec![3, 4]);
    }

    #[test]
    fn test_query_pairs_rejects_bad_number() {
        let err = SearchParams::from_query_pairs([("price_max", "ten")]).unwrap_err();
        match err {
            SearchError::InvalidParams { name, .. } => assert_eq!(name, "price_max"),
            other => panic!("Expected InvalidParams, got {:?}", other),
        }
        assert!(SearchParams::from_query_pairs([("from", "-1")]).is_err());
        assert!(SearchParams::from_query_pairs([("browse_mode", "maybe")]).is_err());
    }

    #[test]
    fn test_query_pairs_rejects_non_finite_price() {
        for (key, value) in [("price_max", "inf"), ("price_min", "-inf"), ("price_min", "NaN"), ("price_max", "infinity")] {
            match SearchParams::from_query_pairs([("price_min", "5"), (key, value)]) {
                Err(SearchError::InvalidParams { name, .. }) => assert_eq!(name, key),
                other => panic!("Expected InvalidParams for {}={}, got {:?}", key, value, other),
            }
        }
    }

    #[test]
    fn test_from_json_rejects_non_numeric_price_literals() {
        assert!(SearchParams::from_json(r#"{"price_max": "inf"}"#).is_err());
        assert!(SearchParams::from_json(r#"{"price_max": NaN}"#).is_err());
    }

    #[test]
    fn test_query_pairs_blank_values_are_absent() {
        let params = SearchParams::from_query_pairs([("price_min", ""), ("query", "  ")]).unwrap();
        assert_eq!(params.price_min, None);
        assert_eq!(params.query, None);
    }

    #[test]
    fn test_query_pairs_ignores_unknown_keys() {
        let params = SearchParams::from_query_pairs([("utm_source", "mail"), ("properties[]", "x")]).unwrap();
        assert_eq!(params, SearchParams::default());
    }

    #[test]
    fn test_blank_text() {
        let params = SearchParams {
            query: Some("   ".into()),
            ..Default::default()
        };
        assert!(params.text().is_none());
    }

    #[test]
    fn test_price_range() {
        let ordered = SearchParams {
            price_min: Some(5.0),
            price_max: Some(10.0),
            ..Default::default()
        };
        assert_eq!(ordered.price_range(), Some((5.0, 10.0)));

        let inverted = SearchParams {
            price_min: Some(10.0),
            price_max: Some(5.0),
            ..Default::default()
        };
        assert_eq!(inverted.price_range(), None);

        let equal = SearchParams {
            price_min: Some(5.0),
            price_max: Some(5.0),
            ..Default::default()
        };
        assert_eq!(equal.price_range(), None);

        let half = SearchParams {
            price_min: Some(5.0),
            ..Default::default()
        };
        assert_eq!(half.price_range(), None);
    }
}
