//! In-memory document store.
//!
//! Used for local development and tests. Nothing is durable; every collection is a
//! `Vec` of JSON documents in insertion order behind one `tokio::sync::RwLock`.
//! Unique keys from `Collection::unique_keys` are enforced on insert, matching the
//! unique indexes the PostgreSQL migration creates.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::info;
use umroh_core::{Collection, DocumentStore, Filter, StoreError, StoreResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Values of a unique key group, or `None` when any field is absent or null.
fn key_values<'a>(document: &'a Value, fields: &[&str]) -> Option<Vec<&'a Value>> {
    fields
        .iter()
        .map(|f| document.get(*f).filter(|v| !v.is_null()))
        .collect()
}

fn check_unique(collection: Collection, existing: &[Value], document: &Value) -> StoreResult<()> {
    for fields in collection.unique_keys() {
        let Some(candidate) = key_values(document, fields) else {
            continue;
        };
        let clash = existing
            .iter()
            .any(|doc| key_values(doc, fields).is_some_and(|values| values == candidate));
        if clash {
            return Err(StoreError::Duplicate {
                collection,
                detail: format!("duplicate key ({})", fields.join(", ")),
            });
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(&self, collection: Collection, filter: &Filter) -> StoreResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)))
            .cloned())
    }

    async fn find_many(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: usize,
    ) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn insert(&self, collection: Collection, document: Value) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        check_unique(collection, docs, &document)?;
        docs.push(document);
        Ok(())
    }

    async fn insert_many(&self, collection: Collection, documents: Vec<Value>) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        // Validate the whole batch first so a clash inserts nothing.
        let mut staged: Vec<Value> = Vec::with_capacity(documents.len());
        for document in documents {
            check_unique(collection, docs, &document)?;
            check_unique(collection, &staged, &document)?;
            staged.push(document);
        }

        info!("Inserted {} documents into {}", staged.len(), collection);
        docs.extend(staged);
        Ok(())
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Map<String, Value>,
    ) -> StoreResult<u64> {
        let mut collections = self.collections.write().await;
        let Some(target) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| filter.matches(d)))
        else {
            return Ok(0);
        };

        if let Value::Object(fields) = target {
            fields.extend(changes);
        }
        Ok(1)
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> StoreResult<u64> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(0);
        };

        match docs.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> StoreResult<u64> {
        let collections = self.collections.read().await;
        let count = collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).count())
            .unwrap_or(0);
        Ok(count as u64)
    }

    async fn close(&self) {
        info!("Memory store closed");
    }
}
