// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Sort keys and sort-mode resolution.
//!
//! Every mode resolves to an ordered key list; later keys break ties. The
//! relevance score is always present, last unless it is the primary key.

use serde::{Deserialize, Serialize};

use super::document::fields;
use super::query_builder::{Query, QueryValue};

/// Requested sort mode.
///
/// Unrecognized values deserialize to [`Sorting::Default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sorting {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    /// Position within the first requested taxon
    Classification,
    Score,
    #[default]
    #[serde(other)]
    Default,
}

impl Sorting {
    /// Parse a user-supplied value, unknown values fall back to default
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "name_asc" => Self::NameAsc,
            "name_desc" => Self::NameDesc,
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            "classification" => Self::Classification,
            "score" => Self::Score,
            _ => Self::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Classification => "classification",
            Self::Score => "score",
            Self::Default => "default",
        }
    }
}

impl std::fmt::Display for Sorting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// How a multi-valued field reduces to one sort value per document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Min,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min => "min",
        }
    }
}

/// One entry of the sort list
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// Relevance score
    Score,
    /// Plain field
    Field { field: String, order: SortOrder },
    /// Field inside a nested object list, restricted by `filter`
    Nested {
        field: String,
        order: SortOrder,
        mode: SortMode,
        path: String,
        filter: Query,
    },
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

/// Resolve a sort mode to its key list.
///
/// Classification sorting without any taxon degrades to the default order.
pub fn resolve(sorting: Sorting, taxons: &[u64]) -> Vec<SortKey> {
    match (sorting, taxons.first()) {
        (Sorting::NameAsc, _) => vec![
            SortKey::asc(fields::NAME_UNTOUCHED),
            SortKey::asc(fields::PRICE),
            SortKey::Score,
        ],
        (Sorting::NameDesc, _) => vec![
            SortKey::desc(fields::NAME_UNTOUCHED),
            SortKey::asc(fields::PRICE),
            SortKey::Score,
        ],
        (Sorting::PriceAsc, _) => vec![
            SortKey::asc(fields::PRICE),
            SortKey::asc(fields::NAME_UNTOUCHED),
            SortKey::Score,
        ],
        (Sorting::PriceDesc, _) => vec![
            SortKey::desc(fields::PRICE),
            SortKey::asc(fields::NAME_UNTOUCHED),
            SortKey::Score,
        ],
        (Sorting::Score, _) => vec![
            SortKey::Score,
            SortKey::asc(fields::NAME_UNTOUCHED),
            SortKey::asc(fields::PRICE),
        ],
        (Sorting::Classification, Some(&taxon_id)) => vec![
            SortKey::Nested {
                field: fields::CLASSIFICATION_POSITION.to_string(),
                order: SortOrder::Asc,
                mode: SortMode::Min,
                path: fields::CLASSIFICATIONS.to_string(),
                filter: Query::term(fields::CLASSIFICATION_TAXON_ID, QueryValue::Integer(taxon_id)),
            },
            SortKey::asc(fields::NAME_UNTOUCHED),
            SortKey::asc(fields::PRICE),
            SortKey::Score,
        ],
        (Sorting::Classification, None) | (Sorting::Default, _) => default_sort(),
    }
}

/// Name, then price, then score
pub fn default_sort() -> Vec<SortKey> {
    resolve(Sorting::NameAsc, &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_and_unknown() {
        assert_eq!(Sorting::parse("price_desc"), Sorting::PriceDesc);
        assert_eq!(Sorting::parse("classification"), Sorting::Classification);
        assert_eq!(Sorting::parse("popularity"), Sorting::Default);
        assert_eq!(Sorting::parse(""), Sorting::Default);
    }

    #[test]
    fn test_deserialize_unknown_is_default() {
        let sorting: Sorting = serde_json::from_str("\"newest\"").unwrap();
        assert_eq!(sorting, Sorting::Default);
        let sorting: Sorting = serde_json::from_str("\"name_desc\"").unwrap();
        assert_eq!(sorting, Sorting::NameDesc);
    }

    #[test]
    fn test_default_sort() {
        assert_eq!(
            resolve(Sorting::Default, &[1]),
            vec![SortKey::asc("name.untouched"), SortKey::asc("price"), SortKey::Score]
        );
    }

    #[test]
    fn test_price_asc() {
        assert_eq!(
            resolve(Sorting::PriceAsc, &[]),
            vec![SortKey::asc("price"), SortKey::asc("name.untouched"), SortKey::Score]
        );
    }

    #[test]
    fn test_score_first() {
        let keys = resolve(Sorting::Score, &[]);
        assert_eq!(keys[0], SortKey::Score);
        assert_eq!(keys.iter().filter(|k| **k == SortKey::Score).count(), 1);
    }

    #[test]
    fn test_classification_without_taxons_is_default() {
        assert_eq!(resolve(Sorting::Classification, &[]), default_sort());
    }

    #[test]
    fn test_classification_uses_first_taxon_only() {
        let keys = resolve(Sorting::Classification, &[8, 3]);
        match &keys[0] {
            SortKey::Nested { field, mode, path, filter, .. } => {
                assert_eq!(field, "classifications.position");
                assert_eq!(*mode, SortMode::Min);
                assert_eq!(path, "classifications");
                assert_eq!(
                    *filter,
                    Query::term("classifications.taxon_id", QueryValue::Integer(8))
                );
            }
            other => panic!("Expected nested sort, got {:?}", other),
        }
        assert_eq!(keys.last(), Some(&SortKey::Score));
    }
}
