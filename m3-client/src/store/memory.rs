//! In-process document store
//!
//! Backs tests and offline demos. Supports fault injection so callers can
//! exercise their error paths: [`MemoryStore::set_offline`] makes every call
//! fail as unreachable, [`MemoryStore::fail_next`] fails only the next N calls,
//! and [`MemoryStore::deny`] rejects a collection with a permission error.

use super::DocumentStore;
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use shared::document::{DocumentData, to_data};
use shared::{Document, FieldFilter};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

type Collection = BTreeMap<String, DocumentData>;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
    denied: RwLock<HashSet<String>>,
    offline: AtomicBool,
    fail_next: AtomicUsize,
    queries: AtomicUsize,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let collections = self.collections.read().len();
        f.debug_struct("MemoryStore")
            .field("collections", &collections)
            .field("offline", &self.offline.load(Ordering::Relaxed))
            .finish()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a typed record (id taken from the argument, not the model)
    pub fn insert<T: Serialize>(&self, collection: &str, id: &str, model: &T) -> StoreResult<()> {
        let data = to_data(model).map_err(|e| StoreError::malformed(collection, e))?;
        self.insert_raw(collection, id, data);
        Ok(())
    }

    /// Seed a raw JSON body, including bodies a model would reject
    pub fn insert_json(&self, collection: &str, id: &str, body: serde_json::Value) {
        let data = match body {
            serde_json::Value::Object(map) => map,
            _ => DocumentData::new(),
        };
        self.insert_raw(collection, id, data);
    }

    fn insert_raw(&self, collection: &str, id: &str, data: DocumentData) {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
    }

    /// Number of documents currently in a collection
    pub fn len(&self, collection: &str) -> usize {
        self.collections.read().get(collection).map_or(0, |c| c.len())
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// Toggle the unreachable state
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Fail the next `n` calls with `Unreachable`
    pub fn fail_next(&self, n: usize) {
        self.fail_next.store(n, Ordering::SeqCst);
    }

    /// Reject every call touching `collection` with `PermissionDenied`
    pub fn deny(&self, collection: &str) {
        self.denied.write().insert(collection.to_string());
    }

    /// Number of `query` calls served so far
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn check(&self, collection: &str) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unreachable("store is offline".into()));
        }
        let consumed = self
            .fail_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if consumed.is_ok() {
            return Err(StoreError::Unreachable("injected failure".into()));
        }
        if self.denied.read().contains(collection) {
            return Err(StoreError::PermissionDenied(collection.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.check(collection)?;
        let guard = self.collections.read();
        Ok(guard
            .get(collection)
            .and_then(|c| c.get(id))
            .map(|data| Document::new(id, data.clone())))
    }

    async fn query(&self, collection: &str, filters: &[FieldFilter]) -> StoreResult<Vec<Document>> {
        self.check(collection)?;
        self.queries.fetch_add(1, Ordering::SeqCst);
        let guard = self.collections.read();
        let Some(docs) = guard.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(docs
            .iter()
            .map(|(id, data)| Document::new(id.clone(), data.clone()))
            .filter(|doc| doc.matches(filters))
            .collect())
    }

    async fn set(&self, collection: &str, id: &str, data: DocumentData, merge: bool) -> StoreResult<()> {
        self.check(collection)?;
        let mut guard = self.collections.write();
        let docs = guard.entry(collection.to_string()).or_default();
        match docs.get_mut(id) {
            Some(existing) if merge => existing.extend(data),
            _ => {
                docs.insert(id.to_string(), data);
            }
        }
        Ok(())
    }

    async fn add(&self, collection: &str, data: DocumentData) -> StoreResult<String> {
        self.check(collection)?;
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.insert_raw(collection, &id, data);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, data: DocumentData) -> StoreResult<()> {
        self.check(collection)?;
        let mut guard = self.collections.write();
        let existing = guard
            .get_mut(collection)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| StoreError::NotFound(format!("{collection}/{id}")))?;
        existing.extend(data);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.check(collection)?;
        if let Some(docs) = self.collections.write().get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }
}
