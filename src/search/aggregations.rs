// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Facet aggregation specs.

use super::document::fields;

/// Aggregation names, also the keys facets are decoded from
pub const PRICE: &str = "price";
pub const PROPERTIES: &str = "properties";
pub const TAXON_IDS: &str = "taxon_ids";

/// Bucket ordering for term aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketOrder {
    /// Fewest documents first
    CountAsc,
}

/// One aggregation request
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    /// min / max / sum / count / avg over a numeric field
    Stats { field: String },
    /// Distinct values with document counts
    Terms {
        field: String,
        size: u64,
        order: Option<BucketOrder>,
    },
}

/// The three facets every product search computes.
///
/// `bucket_size` bounds distinct values returned per term facet.
pub fn product_facets(bucket_size: u64) -> Vec<(String, Aggregation)> {
    vec![
        (
            PRICE.to_string(),
            Aggregation::Stats {
                field: fields::PRICE.to_string(),
            },
        ),
        (
            PROPERTIES.to_string(),
            Aggregation::Terms {
                field: fields::PROPERTIES.to_string(),
                size: bucket_size,
                order: Some(BucketOrder::CountAsc),
            },
        ),
        (
            TAXON_IDS.to_string(),
            Aggregation::Terms {
                field: fields::TAXON_IDS.to_string(),
                size: bucket_size,
                order: None,
            },
        ),
    ]
}
