// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for catalog-search.
//!
//! Uses the `metrics` crate for backend-agnostic metrics collection.
//! The host application is responsible for choosing the exporter (Prometheus, OTEL, etc.)
//!
//! # Metric Naming Convention
//! - `catalog_search_` prefix for all metrics
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Labels
//! - `sorting`: resolved sort mode
//! - `operation`: index, get, delete
//! - `status`: success, error

use metrics::{counter, histogram};
use std::time::Duration;

/// Record a compiled request
pub fn record_compile(sorting: &str, has_text: bool, has_post_filter: bool) {
    counter!(
        "catalog_search_compiled_requests_total",
        "sorting" => sorting.to_string(),
        "text" => has_text.to_string(),
        "post_filter" => has_post_filter.to_string()
    )
    .increment(1);
}

/// Record a projected document
pub fn record_projection() {
    counter!("catalog_search_projected_documents_total").increment(1);
}

/// Record a search round-trip outcome
pub fn record_search_query(status: &str) {
    counter!(
        "catalog_search_queries_total",
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record search latency
pub fn record_search_latency(duration: Duration) {
    histogram!("catalog_search_query_seconds").record(duration.as_secs_f64());
}

/// Record number of hits returned
pub fn record_search_results(count: usize) {
    histogram!("catalog_search_results").record(count as f64);
}

/// Record a document operation (index, get, delete)
pub fn record_document_operation(operation: &str, success: bool) {
    let status = if success { "success" } else { "error" };
    counter!(
        "catalog_search_document_operations_total",
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}
