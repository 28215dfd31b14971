// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query Compiler
//!
//! Turns [`SearchParams`] into a [`SearchRequest`].
//!
//! # Filter placement
//!
//! ```text
//! query.bool.must     text clause (multi_match, or match_all when blank)
//! query.bool.filter   properties, taxons, available_on, discontinue_on
//!                     -> narrow hits AND facets
//! post_filter         price range
//!                     -> narrow hits only, price facet still spans everything
//! ```
//!
//! Compilation never fails. Contradictory input weakens the request instead:
//! an inverted price range drops the post filter, classification sorting
//! without a taxon falls back to the default order.

use tracing::debug;

use super::aggregations;
use super::document::{fields, token};
use super::params::SearchParams;
use super::query_builder::{BoostedField, Query, QueryBuilder};
use super::request::SearchRequest;
use super::sort::{self, Sorting};
use crate::config::SearchConfig;
use crate::metrics;

/// Availability cutoff, engine date math
const NOW: &str = "now";
/// Discontinuation cutoff, current time rounded down to the hour
const NOW_ROUNDED_TO_HOUR: &str = "now/h";

/// Stateless compiler; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct QueryCompiler {
    config: SearchConfig,
}

impl QueryCompiler {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Compile parameters into a full request
    pub fn compile(&self, params: &SearchParams) -> SearchRequest {
        let text = self.text_clause(params);

        let mut filters = QueryBuilder::new();
        for (name, values) in &params.properties {
            if values.is_empty() {
                continue;
            }
            let tokens = values.iter().map(|value| token::encode(name, value)).collect();
            filters = filters.terms(fields::PROPERTIES, tokens);
        }
        if !params.taxons.is_empty() {
            filters = filters.ids(fields::TAXON_IDS, params.taxons.clone());
        }
        let query = filters
            .date_range(fields::AVAILABLE_ON, None, Some(NOW))
            .filter(
                Query::missing(fields::DISCONTINUE_ON)
                    .or(Query::date_range(fields::DISCONTINUE_ON, Some(NOW_ROUNDED_TO_HOUR), None)),
            )
            .build_bool(text);

        let sorting = effective_sorting(params);
        let post_filter = params
            .price_range()
            .map(|(min, max)| Query::numeric_range(fields::PRICE, Some(min), Some(max)));

        if params.browse_mode {
            debug!("browse_mode requested, filter placement unchanged");
        }
        debug!(
            sorting = %sorting,
            taxons = params.taxons.len(),
            properties = params.properties.len(),
            from = params.from,
            post_filter = post_filter.is_some(),
            "Compiled product search"
        );
        metrics::record_compile(sorting.as_str(), params.text().is_some(), post_filter.is_some());

        SearchRequest {
            min_score: self.config.min_score,
            query,
            sort: sort::resolve(sorting, &params.taxons),
            from: params.from,
            size: self.config.page_size,
            aggregations: aggregations::product_facets(self.config.facet_size),
            post_filter,
        }
    }

    fn text_clause(&self, params: &SearchParams) -> Query {
        match params.text() {
            None => Query::match_all(),
            Some(text) => Query::multi_match(
                text,
                vec![
                    BoostedField::boosted(fields::NAME, self.config.name_boost),
                    BoostedField::new(fields::DESCRIPTION),
                    BoostedField::new(fields::SKU),
                ],
            ),
        }
    }
}

/// Requested sort after dropping requests that cannot be honored
fn effective_sorting(params: &SearchParams) -> Sorting {
    match params.sorting {
        Sorting::Classification if params.taxons.is_empty() => Sorting::Default,
        sorting => sorting,
    }
}
