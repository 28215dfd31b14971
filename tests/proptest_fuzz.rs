//! Property-based tests for projection and compilation.
//!
//! Uses proptest to generate products and parameter sets and checks the
//! invariants that must hold for every input, plus that boundary parsing
//! never panics on arbitrary input.
//!
//! Run with: `cargo test --test proptest_fuzz`

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use proptest::prelude::*;
use serde_json::{json, Value};

use catalog_search::{
    Product, ProductDocument, ProductProperty, QueryCompiler, SearchParams, Sorting, Taxon,
};

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// A chain of taxons from the root down, ids are unique within the chain
fn taxon_chain_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::hash_set(1u64..200, 1..5).prop_map(|ids| ids.into_iter().collect())
}

/// Build the leaf taxon of a chain (first id is the root)
fn build_chain(ids: &[u64]) -> Taxon {
    let mut parent: Option<Arc<Taxon>> = None;
    for id in &ids[..ids.len() - 1] {
        let taxon = match parent.take() {
            Some(p) => Taxon::child(*id, "node", p),
            None => Taxon::root(*id, "root"),
        };
        parent = Some(Arc::new(taxon));
    }
    let leaf = ids[ids.len() - 1];
    match parent {
        Some(p) => Taxon::child(leaf, "leaf", p),
        None => Taxon::root(leaf, "leaf"),
    }
}

fn sorting_strategy() -> impl Strategy<Value = Sorting> {
    prop_oneof![
        Just(Sorting::NameAsc),
        Just(Sorting::NameDesc),
        Just(Sorting::PriceAsc),
        Just(Sorting::PriceDesc),
        Just(Sorting::Classification),
        Just(Sorting::Score),
        Just(Sorting::Default),
    ]
}

fn params_strategy() -> impl Strategy<Value = SearchParams> {
    (
        0u64..10_000,
        prop::option::of(-1000.0f64..1000.0),
        prop::option::of(-1000.0f64..1000.0),
        prop::collection::btree_map("[a-z]{1,6}", prop::collection::vec("[a-zA-Z0-9 ]{1,6}", 0..4), 0..4),
        prop::option::of("[a-z ]{0,20}"),
        prop::collection::vec(1u64..500, 0..5),
        any::<bool>(),
        sorting_strategy(),
    )
        .prop_map(
            |(from, price_min, price_max, properties, query, taxons, browse_mode, sorting)| SearchParams {
                from,
                price_min,
                price_max,
                properties,
                query,
                taxons,
                browse_mode,
                sorting,
            },
        )
}

fn default_sort_json() -> Value {
    json!([{"name.untouched": {"order": "asc"}}, {"price": {"order": "asc"}}, "_score"])
}

fn compile(params: &SearchParams) -> Value {
    QueryCompiler::default().compile(params).to_json()
}

// =============================================================================
// Projection Properties
// =============================================================================

proptest! {
    /// Taxon ids are the deduplicated union of every chain, ancestors included
    #[test]
    fn prop_taxon_closure(chains in prop::collection::vec(taxon_chain_strategy(), 0..4)) {
        let product = Product {
            taxons: chains.iter().map(|c| build_chain(c)).collect(),
            ..Default::default()
        };
        let expected: HashSet<u64> = chains.iter().flatten().copied().collect();

        let doc = ProductDocument::project(&product);
        match doc.taxon_ids {
            None => prop_assert!(expected.is_empty()),
            Some(ids) => {
                let unique: HashSet<u64> = ids.iter().copied().collect();
                prop_assert_eq!(unique.len(), ids.len());
                prop_assert_eq!(unique, expected);
            }
        }
    }

    /// Products without properties never carry a properties key
    #[test]
    fn prop_properties_absent_or_tokens(props in prop::collection::vec(("[a-z]{1,5}", "[a-z]{1,5}"), 0..5)) {
        let product = Product {
            product_properties: props.iter().map(|(n, v)| ProductProperty::new(n.clone(), v.clone())).collect(),
            ..Default::default()
        };
        let json = ProductDocument::project(&product).to_json();

        if props.is_empty() {
            prop_assert!(json.get("properties").is_none());
        } else {
            let expected: Vec<Value> = props.iter().map(|(n, v)| json!(format!("{}||{}", n, v))).collect();
            prop_assert_eq!(&json["properties"], &Value::Array(expected));
        }
    }
}

// =============================================================================
// Compilation Properties
// =============================================================================

proptest! {
    /// Compilation never panics and always carries the fixed top-level shape
    #[test]
    fn prop_request_shape(params in params_strategy()) {
        let body = compile(&params);
        prop_assert!(body["min_score"].is_number());
        prop_assert!(body["query"]["bool"]["must"].is_array());
        prop_assert!(body["query"]["bool"]["filter"].is_array());
        prop_assert!(body["sort"].is_array());
        prop_assert_eq!(&body["from"], &json!(params.from));
        prop_assert!(body["aggregations"]["price"].is_object());
        prop_assert!(body["aggregations"]["properties"].is_object());
        prop_assert!(body["aggregations"]["taxon_ids"].is_object());
    }

    /// Blank text matches everything, otherwise all terms are required
    #[test]
    fn prop_text_clause(params in params_strategy()) {
        let body = compile(&params);
        let must = &body["query"]["bool"]["must"][0];
        let blank = params.query.as_deref().map_or(true, |q| q.trim().is_empty());
        if blank {
            prop_assert_eq!(must, &json!({"match_all": {}}));
        } else {
            prop_assert_eq!(&must["multi_match"]["operator"], &json!("and"));
            let fields = must["multi_match"]["fields"].as_array().unwrap();
            prop_assert!(fields[0].as_str().unwrap().starts_with("name^"));
            prop_assert!(fields.contains(&json!("description")));
            prop_assert!(fields.contains(&json!("sku")));
        }
    }

    /// Post filter exists exactly when min < max, and never leaks into the filter list
    #[test]
    fn prop_price_is_post_filter_only(params in params_strategy()) {
        let body = compile(&params);
        let expected = match (params.price_min, params.price_max) {
            (Some(min), Some(max)) if min < max => Some(json!({"range": {"price": {"gte": min, "lte": max}}})),
            _ => None,
        };
        prop_assert_eq!(body.get("post_filter").cloned(), expected);

        for filter in body["query"]["bool"]["filter"].as_array().unwrap() {
            prop_assert!(filter.get("range").and_then(|r| r.get("price")).is_none());
        }
    }

    /// One terms filter per property name with values, plus taxons and the two availability filters
    #[test]
    fn prop_filter_count(params in params_strategy()) {
        let body = compile(&params);
        let with_values = params.properties.values().filter(|v| !v.is_empty()).count();
        let taxon = usize::from(!params.taxons.is_empty());
        let filters = body["query"]["bool"]["filter"].as_array().unwrap();
        prop_assert_eq!(filters.len(), with_values + taxon + 2);
    }

    /// Classification sorting without taxons is the default sort
    #[test]
    fn prop_classification_needs_taxons(mut params in params_strategy()) {
        params.sorting = Sorting::Classification;
        params.taxons.clear();
        prop_assert_eq!(&compile(&params)["sort"], &default_sort_json());
    }

    /// Score is in every sort list exactly once
    #[test]
    fn prop_score_always_present(params in params_strategy()) {
        let body = compile(&params);
        let scores = body["sort"].as_array().unwrap().iter().filter(|k| **k == json!("_score")).count();
        prop_assert_eq!(scores, 1);
    }

    /// browse_mode has no effect on the compiled request
    #[test]
    fn prop_browse_mode_inert(params in params_strategy()) {
        let mut flipped = params.clone();
        flipped.browse_mode = !params.browse_mode;
        prop_assert_eq!(compile(&params), compile(&flipped));
    }
}

// =============================================================================
// Boundary Fuzz Tests
// =============================================================================

proptest! {
    /// Query-string parsing never panics, only returns clean errors
    #[test]
    fn fuzz_query_pairs(pairs in prop::collection::vec((".{0,20}", ".{0,20}"), 0..10)) {
        let _ = SearchParams::from_query_pairs(pairs);
    }

    /// JSON parsing never panics on arbitrary bytes
    #[test]
    fn fuzz_params_from_random_bytes(bytes in prop::collection::vec(any::<u8>(), 0..2000)) {
        let text = String::from_utf8_lossy(&bytes);
        let _ = SearchParams::from_json(&text);
    }
}

#[test]
fn property_example_from_table() {
    let mut properties = BTreeMap::new();
    properties.insert("color".to_string(), vec!["red".to_string(), "blue".to_string()]);
    properties.insert("size".to_string(), vec!["M".to_string()]);
    let params = SearchParams {
        properties,
        ..Default::default()
    };

    let body = compile(&params);
    let terms: Vec<&Value> = body["query"]["bool"]["filter"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|f| f.get("terms").is_some())
        .collect();
    assert_eq!(
        terms,
        vec![
            &json!({"terms": {"properties": ["color||red", "color||blue"]}}),
            &json!({"terms": {"properties": ["size||M"]}}),
        ]
    );
}
