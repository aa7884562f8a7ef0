// --- File: crates/storefront_catalog/src/search.rs ---
//! Last-query-wins product search.
//!
//! Each search runs on its own task. Starting a new search under the same key
//! aborts the one still in flight, whose caller gets [`CatalogError::Cancelled`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tracing::debug;

use crate::client::ProductApi;
use crate::error::CatalogError;
use crate::models::Product;

struct InFlight {
    id: u64,
    handle: AbortHandle,
}

pub struct SearchCoordinator {
    api: Arc<ProductApi>,
    in_flight: Mutex<HashMap<String, InFlight>>,
    next_id: AtomicU64,
}

impl SearchCoordinator {
    pub fn new(api: Arc<ProductApi>) -> Self {
        Self {
            api,
            in_flight: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Searches for `query` on behalf of `key`, aborting that key's previous search.
    pub async fn search(&self, key: &str, query: String) -> Result<Vec<Product>, CatalogError> {
        let api = self.api.clone();
        let task = tokio::spawn(async move { api.search(&query).await });
        let id = self
            .next_id
            .fetch_add(1, Ordering::Relaxed);

        {
            let mut in_flight = self.in_flight.lock().await;
            let previous = in_flight.insert(
                key.to_string(),
                InFlight {
                    id,
                    handle: task.abort_handle(),
                },
            );
            if let Some(previous) = previous {
                debug!("[Catalog] Aborting previous search for {}", key);
                previous.handle.abort();
            }
        }

        let result = task.await;

        {
            let mut in_flight = self.in_flight.lock().await;
            if in_flight.get(key).is_some_and(|entry| entry.id == id) {
                in_flight.remove(key);
            }
        }

        match result {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => Err(CatalogError::Cancelled),
            Err(e) => Err(CatalogError::Upstream(format!("search task failed: {}", e))),
        }
    }

    /// Number of keys with a search still running.
    pub async fn in_flight(&self) -> usize {
        self.in_flight.lock().await.len()
    }
}
