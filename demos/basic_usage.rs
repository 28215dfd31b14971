// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Basic catalog-search usage example.
//!
//! Demonstrates:
//! 1. Indexing a few products into the in-memory client
//! 2. Parsing storefront query-string parameters
//! 3. Inspecting the compiled request body
//! 4. Searching and reading hits
//! 5. Fetching a document back by id
//! 6. Displaying metrics
//!
//! # Run
//!
//! ```bash
//! cargo run --example basic_usage
//! ```

use std::sync::Arc;

use catalog_search::{
    Classification, InMemorySearchClient, Product, ProductProperty, ProductSearch, SearchConfig,
    SearchParams, Taxon, Variant,
};
use chrono::{Duration, Utc};
use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder.install().expect("failed to install metrics recorder");

    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    println!("\n== catalog-search: Basic Usage Example ==\n");

    // ─────────────────────────────────────────────────────────────────────────
    // 1. Index products
    // ─────────────────────────────────────────────────────────────────────────
    let client = Arc::new(InMemorySearchClient::new());
    let search = ProductSearch::new(client.clone(), SearchConfig::default());

    let clothing = Arc::new(Taxon::root(1, "Clothing"));
    let shirts = Taxon::child(2, "Shirts", clothing);

    for (id, name, price, color) in [
        (1, "Oxford Shirt", 45.0, "blue"),
        (2, "Flannel Shirt", 39.5, "red"),
        (3, "Linen Shirt", 52.0, "white"),
    ] {
        let product = Product {
            id,
            name: name.into(),
            available_on: Some(Utc::now() - Duration::days(7)),
            master: Variant::new(format!("SH-{}", id), price),
            taxons: vec![shirts.clone()],
            classifications: vec![Classification { taxon_id: 2, position: id as i64 }],
            product_properties: vec![ProductProperty::new("color", color)],
            ..Default::default()
        };
        let document = search.index_product(&product).await?;
        println!("   indexed {} -> taxon_ids {:?}", document.name, document.taxon_ids);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 2-3. Parse parameters and show the compiled body
    // ─────────────────────────────────────────────────────────────────────────
    let params = SearchParams::from_query_pairs([
        ("query", "shirt"),
        ("taxons[]", "2"),
        ("properties[color][]", "blue"),
        ("properties[color][]", "red"),
        ("price_min", "30"),
        ("price_max", "50"),
        ("sorting", "classification"),
    ])?;

    let body = search.compile(&params).to_json();
    println!("\n   compiled request:\n{}", serde_json::to_string_pretty(&body)?);

    // ─────────────────────────────────────────────────────────────────────────
    // 4. Search
    // ─────────────────────────────────────────────────────────────────────────
    let response = search.search(&params).await?;
    println!("\n   {} hits", response.total);
    for hit in &response.hits {
        println!("   └─ {} {} ({})", hit.id, hit.document.name, hit.document.price);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 5. Get by id
    // ─────────────────────────────────────────────────────────────────────────
    match search.get_by_id(2).await? {
        Some(document) => println!("\n   product 2: {} sku={}", document.name, document.sku),
        None => println!("\n   product 2: NOT FOUND"),
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 6. Metrics
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n   metrics:");
    dump_metrics(&snapshotter);

    Ok(())
}

fn dump_metrics(snapshotter: &Snapshotter) {
    let mut lines: Vec<String> = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .map(|(composite_key, _, _, value)| {
            let (_, key) = composite_key.into_parts();
            let labels: Vec<_> = key.labels().map(|l| format!("{}={}", l.key(), l.value())).collect();
            let label_str = if labels.is_empty() { String::new() } else { format!("{{{}}}", labels.join(",")) };
            let value = match value {
                DebugValue::Counter(v) => v.to_string(),
                DebugValue::Gauge(v) => v.into_inner().to_string(),
                DebugValue::Histogram(samples) => format!("{} samples", samples.len()),
            };
            format!("   └─ {}{} = {}", key.name(), label_str, value)
        })
        .collect();

    lines.sort();
    for line in lines {
        println!("{}", line);
    }
}
