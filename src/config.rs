// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Configuration for product search.
//!
//! # Example
//!
//! ```
//! use catalog_search::SearchConfig;
//!
//! // Minimal config (uses defaults)
//! let config = SearchConfig::default();
//! assert_eq!(config.min_score, 0.1);
//! assert_eq!(config.name_boost, 5.0);
//!
//! // Override a few fields
//! let config = SearchConfig {
//!     index_name: "storefront".into(),
//!     page_size: Some(24),
//!     ..Default::default()
//! };
//! ```

use serde::Deserialize;

/// Tunables for the compiler and the search service.
///
/// All fields have defaults, so an empty config file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchConfig {
    /// Index holding product documents
    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// Hits scoring below this are dropped (does not affect facets)
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    /// Multiplier on `name` matches relative to description/sku
    #[serde(default = "default_name_boost")]
    pub name_boost: f64,

    /// Bucket ceiling for term facets, large enough to return every value
    #[serde(default = "default_facet_size")]
    pub facet_size: u64,

    /// Page size sent as `size`; engine default when unset
    #[serde(default)]
    pub page_size: Option<u64>,
}

fn default_index_name() -> String { "products".to_string() }
fn default_min_score() -> f64 { 0.1 }
fn default_name_boost() -> f64 { 5.0 }
fn default_facet_size() -> u64 { 1_000_000 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_name: default_index_name(),
            min_score: default_min_score(),
            name_boost: default_name_boost(),
            facet_size: default_facet_size(),
            page_size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"name_boost": 3.0, "page_size": 48}"#).unwrap();
        assert_eq!(config.name_boost, 3.0);
        assert_eq!(config.page_size, Some(48));
        assert_eq!(config.index_name, "products");
    }
}
