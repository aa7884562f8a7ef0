// --- File: crates/storefront_chat/src/test_store.rs ---
//! In-memory [`RealtimeStore`] for service and router tests.

use futures_util::stream::{self, BoxStream, StreamExt};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use storefront_common::services::{BoxFuture, RealtimeEvent, RealtimeStore};
use storefront_common::{external_service_error, StorefrontError};

#[derive(Default)]
pub struct MemoryStore {
    root: Mutex<Value>,
    next_key: AtomicU64,
    pub failing: AtomicBool,
    pub events: Vec<RealtimeEvent>,
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<RealtimeEvent>) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), StorefrontError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(external_service_error("Realtime database", "unreachable"))
        } else {
            Ok(())
        }
    }

    pub fn read(&self, path: &str) -> Value {
        let root = self.root.lock().unwrap();
        let mut node = &*root;
        for segment in segments(path) {
            match node.get(segment) {
                Some(child) => node = child,
                None => return Value::Null,
            }
        }
        node.clone()
    }

    pub fn set(&self, path: &str, value: Value) {
        let mut root = self.root.lock().unwrap();
        let parts = segments(path);
        let Some((last, parents)) = parts.split_last() else {
            *root = value;
            return;
        };
        let mut node = &mut *root;
        for segment in parents {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            node = node
                .as_object_mut()
                .unwrap()
                .entry(segment.to_string())
                .or_insert(Value::Null);
        }
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        let map = node.as_object_mut().unwrap();
        if value.is_null() {
            map.remove(*last);
        } else {
            map.insert(last.to_string(), value);
        }
    }
}

impl RealtimeStore for MemoryStore {
    fn write(&self, path: &str, value: Value) -> BoxFuture<'_, (), StorefrontError> {
        let result = self.check().map(|_| self.set(path, value));
        Box::pin(async move { result })
    }

    fn push(&self, path: &str, value: Value) -> BoxFuture<'_, String, StorefrontError> {
        let result = self.check().map(|_| {
            let key = format!("k{:08}", self.next_key.fetch_add(1, Ordering::SeqCst));
            self.set(&format!("{}/{}", path, key), value);
            key
        });
        Box::pin(async move { result })
    }

    fn update(&self, path: &str, value: Value) -> BoxFuture<'_, (), StorefrontError> {
        let result = self.check().map(|_| {
            if let Value::Object(fields) = value {
                for (key, child) in fields {
                    self.set(&format!("{}/{}", path, key), child);
                }
            }
        });
        Box::pin(async move { result })
    }

    fn delete(&self, path: &str) -> BoxFuture<'_, (), StorefrontError> {
        let result = self.check().map(|_| self.set(path, Value::Null));
        Box::pin(async move { result })
    }

    fn get(&self, path: &str) -> BoxFuture<'_, Value, StorefrontError> {
        let result = self.check().map(|_| self.read(path));
        Box::pin(async move { result })
    }

    fn subscribe(&self, _path: &str) -> BoxStream<'static, Result<RealtimeEvent, StorefrontError>> {
        stream::iter(self.events.clone().into_iter().map(Ok)).boxed()
    }
}
