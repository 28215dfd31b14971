// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Product entity model.
//!
//! The projector never reaches into a persistence layer. It reads products
//! through the [`CatalogProduct`] trait, so any ORM record that can answer
//! these questions can be indexed. [`Product`] is the plain-struct
//! implementation used by callers that load rows themselves (and by tests).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use catalog_search::{CatalogProduct, Product, Taxon, Variant};
//!
//! let root = Arc::new(Taxon::root(1, "Categories"));
//! let shoes = Taxon::child(2, "Shoes", root);
//!
//! let product = Product {
//!     id: 42,
//!     name: "Trail Runner".into(),
//!     master: Variant::new("TR-001", 89.5),
//!     taxons: vec![shoes],
//!     ..Default::default()
//! };
//!
//! assert_eq!(product.sku(), "TR-001");
//! assert_eq!(product.price(), 89.5);
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Read-only view of a product, as needed to build its search document.
///
/// `price` and `sku` are derived values: implementations compute them on
/// every call rather than returning a cached copy.
pub trait CatalogProduct {
    /// Primary key, used as the document id in the index
    fn id(&self) -> u64;
    fn name(&self) -> &str;
    fn description(&self) -> Option<&str>;
    /// `None` means the product is not yet available
    fn available_on(&self) -> Option<DateTime<Utc>>;
    /// `None` means the product is never discontinued
    fn discontinue_on(&self) -> Option<DateTime<Utc>>;
    /// Must be finite; NaN and infinity are indexed as 0
    fn price(&self) -> f64;
    fn sku(&self) -> &str;
    /// Taxons directly assigned to the product (ancestors reachable via each taxon)
    fn taxons(&self) -> &[Taxon];
    /// `(property name, value)` pairs
    fn properties(&self) -> Vec<(&str, &str)>;
    fn classifications(&self) -> &[Classification];
    /// Non-master variants
    fn variants(&self) -> &[Variant];
}

/// A node in the category tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxon {
    pub id: u64,
    pub name: String,
    pub parent: Option<Arc<Taxon>>,
}

impl Taxon {
    /// Create a taxon with no parent
    pub fn root(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent: None,
        }
    }

    /// Create a taxon under `parent`
    pub fn child(id: u64, name: impl Into<String>, parent: Arc<Taxon>) -> Self {
        Self {
            id,
            name: name.into(),
            parent: Some(parent),
        }
    }

    /// This taxon followed by each ancestor up to the root.
    pub fn self_and_ancestors(&self) -> impl Iterator<Item = &Taxon> {
        std::iter::successors(Some(self), |taxon| taxon.parent.as_deref())
    }
}

/// Product placement inside a taxon, with its display position.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub taxon_id: u64,
    pub position: i64,
}

/// Option value attached to a variant (e.g. `size` / `Medium`).
#[derive(Debug, Clone, PartialEq)]
pub struct OptionValue {
    pub name: String,
    pub presentation: String,
}

impl OptionValue {
    pub fn new(name: impl Into<String>, presentation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            presentation: presentation.into(),
        }
    }
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variant {
    pub sku: String,
    pub price: f64,
    pub option_values: Vec<OptionValue>,
}

impl Variant {
    pub fn new(sku: impl Into<String>, price: f64) -> Self {
        Self {
            sku: sku.into(),
            price,
            option_values: Vec::new(),
        }
    }

    /// Attach an option value
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, presentation: impl Into<String>) -> Self {
        self.option_values.push(OptionValue::new(name, presentation));
        self
    }
}

/// A custom attribute value on a product (e.g. `material` = `leather`).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductProperty {
    pub name: String,
    pub value: String,
}

impl ProductProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Plain product record.
///
/// Price and SKU live on the master variant, mirroring how catalogs usually
/// store them; [`CatalogProduct::price`] and [`CatalogProduct::sku`] read
/// through to it.
#[derive(Debug, Clone, Default)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub available_on: Option<DateTime<Utc>>,
    pub discontinue_on: Option<DateTime<Utc>>,
    pub master: Variant,
    pub variants: Vec<Variant>,
    pub taxons: Vec<Taxon>,
    pub classifications: Vec<Classification>,
    pub product_properties: Vec<ProductProperty>,
}

impl CatalogProduct for Product {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn available_on(&self) -> Option<DateTime<Utc>> {
        self.available_on
    }

    fn discontinue_on(&self) -> Option<DateTime<Utc>> {
        self.discontinue_on
    }

    fn price(&self) -> f64 {
        self.master.price
    }

    fn sku(&self) -> &str {
        &self.master.sku
    }

    fn taxons(&self) -> &[Taxon] {
        &self.taxons
    }

    fn properties(&self) -> Vec<(&str, &str)> {
        self.product_properties
            .iter()
            .map(|p| (p.name.as_str(), p.value.as_str()))
            .collect()
    }

    fn classifications(&self) -> &[Classification] {
        &self.classifications
    }

    fn variants(&self) -> &[Variant] {
        &self.variants
    }
}
