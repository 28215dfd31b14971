// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Product Document Projection
//!
//! Flattens a [`CatalogProduct`] into the document stored in the index.
//!
//! ```text
//! {
//!   "name": "...", "description": "...",
//!   "available_on": "...", "discontinue_on": null,
//!   "price": 19.99, "sku": "ABC123",
//!   "classifications": [{"taxon_id": 5, "position": 1}],
//!   "variants": [{"sku": "...", "option_values": [{"name": "...", "presentation": "..."}]}],
//!   "taxon_ids": [5, 1],            <- absent when the product has no taxons
//!   "properties": ["color||red"]    <- absent when the product has no properties
//! }
//! ```
//!
//! Field names here are the contract the [`QueryCompiler`](super::QueryCompiler)
//! filters, sorts and aggregates on.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::product::CatalogProduct;

/// Document field names shared with the compiler.
pub mod fields {
    pub const NAME: &str = "name";
    pub const NAME_UNTOUCHED: &str = "name.untouched";
    pub const DESCRIPTION: &str = "description";
    pub const AVAILABLE_ON: &str = "available_on";
    pub const DISCONTINUE_ON: &str = "discontinue_on";
    pub const PRICE: &str = "price";
    pub const SKU: &str = "sku";
    pub const TAXON_IDS: &str = "taxon_ids";
    pub const PROPERTIES: &str = "properties";
    pub const CLASSIFICATIONS: &str = "classifications";
    pub const CLASSIFICATION_TAXON_ID: &str = "classifications.taxon_id";
    pub const CLASSIFICATION_POSITION: &str = "classifications.position";
}

/// `name||value` encoding of a product property.
///
/// Internal to the index boundary: produced by the projector, matched by the
/// compiler's property filters, decoded again for facets.
pub(crate) mod token {
    const SEPARATOR: &str = "||";

    pub(crate) fn encode(name: &str, value: &str) -> String {
        format!("{}{}{}", name, SEPARATOR, value)
    }

    /// Split a token at the first separator. `None` if there is no separator.
    pub(crate) fn decode(token: &str) -> Option<(&str, &str)> {
        token.split_once(SEPARATOR)
    }
}

/// Indexed form of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    pub name: String,
    pub description: Option<String>,
    pub available_on: Option<DateTime<Utc>>,
    pub discontinue_on: Option<DateTime<Utc>>,
    pub price: f64,
    pub sku: String,
    #[serde(default)]
    pub classifications: Vec<ClassificationDocument>,
    #[serde(default)]
    pub variants: Vec<VariantDocument>,
    /// Assigned taxons plus every ancestor, deduplicated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxon_ids: Option<Vec<u64>>,
    /// Property tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationDocument {
    pub taxon_id: u64,
    pub position: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantDocument {
    pub sku: String,
    #[serde(default)]
    pub option_values: Vec<OptionValueDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionValueDocument {
    pub name: String,
    pub presentation: String,
}

impl ProductDocument {
    /// Project a product into its index document.
    pub fn project<P: CatalogProduct + ?Sized>(product: &P) -> Self {
        let classifications = product
            .classifications()
            .iter()
            .map(|c| ClassificationDocument {
                taxon_id: c.taxon_id,
                position: c.position,
            })
            .collect();

        let variants = product
            .variants()
            .iter()
            .map(|v| VariantDocument {
                sku: v.sku.clone(),
                option_values: v
                    .option_values
                    .iter()
                    .map(|o| OptionValueDocument {
                        name: o.name.clone(),
                        presentation: o.presentation.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            name: product.name().to_string(),
            description: product.description().map(str::to_string),
            available_on: product.available_on(),
            discontinue_on: product.discontinue_on(),
            price: finite_price(product),
            sku: product.sku().to_string(),
            classifications,
            variants,
            taxon_ids: non_empty(taxon_closure(product)),
            properties: non_empty(property_tokens(product)),
        }
    }

    /// Serialize to the JSON body handed to the search client.
    pub fn to_json(&self) -> serde_json::Value {
        // Plain data with string keys, cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// JSON has no NaN or infinity, a non-finite price would be stored as null
fn finite_price<P: CatalogProduct + ?Sized>(product: &P) -> f64 {
    let price = product.price();
    if price.is_finite() {
        price
    } else {
        warn!(id = product.id(), price = %price, "Non-finite product price, indexing as 0");
        0.0
    }
}

/// Ids of every assigned taxon and its ancestors, first-seen order.
fn taxon_closure<P: CatalogProduct + ?Sized>(product: &P) -> Vec<u64> {
    let mut seen = HashSet::new();
    product
        .taxons()
        .iter()
        .flat_map(|taxon| taxon.self_and_ancestors())
        .map(|taxon| taxon.id)
        .filter(|id| seen.insert(*id))
        .collect()
}

fn property_tokens<P: CatalogProduct + ?Sized>(product: &P) -> Vec<String> {
    product
        .properties()
        .into_iter()
        .map(|(name, value)| token::encode(name, value))
        .collect()
}

fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
