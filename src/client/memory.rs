// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::{json, Value};

use super::traits::{SearchClient, SearchError};

/// Engine default page size when a request carries no `size`
const DEFAULT_PAGE_SIZE: u64 = 10;

/// (index, document id)
type DocumentKey = (String, String);

/// In-process document store.
///
/// Stores documents and records every search body it receives. It does not
/// evaluate queries: `search` returns all documents of the index ordered by
/// id, paged by the request's `from`/`size`, with empty aggregations.
pub struct InMemorySearchClient {
    documents: DashMap<DocumentKey, Value>,
    requests: Mutex<Vec<(String, Value)>>,
    unavailable: AtomicBool,
}

impl InMemorySearchClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
            requests: Mutex::new(Vec::new()),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Get current document count across all indexes
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// `(index, body)` of each search received so far, oldest first
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().clone()
    }

    /// Make every call fail with a backend error (outage simulation)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), SearchError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(SearchError::Backend("in-memory engine marked unavailable".into()))
        } else {
            Ok(())
        }
    }
}

impl Default for InMemorySearchClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchClient for InMemorySearchClient {
    async fn index(&self, index: &str, id: &str, document: &Value) -> Result<(), SearchError> {
        self.check_available()?;
        self.documents
            .insert((index.to_string(), id.to_string()), document.clone());
        Ok(())
    }

    async fn search(&self, index: &str, request: &Value) -> Result<Value, SearchError> {
        self.check_available()?;
        self.requests.lock().push((index.to_string(), request.clone()));

        let from = request.get("from").and_then(Value::as_u64).unwrap_or(0) as usize;
        let size = request
            .get("size")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_PAGE_SIZE) as usize;

        let mut matching: Vec<(String, Value)> = self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == index)
            .map(|entry| (entry.key().1.clone(), entry.value().clone()))
            .collect();
        matching.sort_by(|a, b| a.0.cmp(&b.0));
        let total = matching.len();

        let hits: Vec<Value> = matching
            .into_iter()
            .skip(from)
            .take(size)
            .map(|(id, source)| json!({"_id": id, "_score": 1.0, "_source": source}))
            .collect();
        let max_score = if hits.is_empty() { Value::Null } else { json!(1.0) };

        Ok(json!({
            "hits": {
                "total": {"value": total, "relation": "eq"},
                "max_score": max_score,
                "hits": hits,
            },
            "aggregations": {},
        }))
    }

    async fn get(&self, index: &str, id: &str) -> Result<Option<Value>, SearchError> {
        self.check_available()?;
        let key = (index.to_string(), id.to_string());
        Ok(self.documents.get(&key).map(|r| r.value().clone()))
    }

    async fn delete(&self, index: &str, id: &str) -> Result<(), SearchError> {
        self.check_available()?;
        self.documents.remove(&(index.to_string(), id.to_string()));
        Ok(())
    }
}
