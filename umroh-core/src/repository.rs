use std::fmt;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// The document collections persisted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Sessions,
    Packages,
    Bookings,
    Payments,
    Wishlist,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Users,
        Collection::Sessions,
        Collection::Packages,
        Collection::Bookings,
        Collection::Payments,
        Collection::Wishlist,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Sessions => "user_sessions",
            Collection::Packages => "packages",
            Collection::Bookings => "bookings",
            Collection::Payments => "payments",
            Collection::Wishlist => "wishlist",
        }
    }

    /// Field groups whose combined values must be unique within the collection.
    pub fn unique_keys(self) -> &'static [&'static [&'static str]] {
        match self {
            Collection::Sessions => &[&["session_token"]],
            Collection::Wishlist => &[&["id"], &["user_id", "package_id"]],
            Collection::Users
            | Collection::Packages
            | Collection::Bookings
            | Collection::Payments => &[&["id"]],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single predicate on a top-level document field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq { field: &'static str, value: Value },
    Gte { field: &'static str, value: i64 },
    Lte { field: &'static str, value: i64 },
}

impl Condition {
    pub fn field(&self) -> &'static str {
        match self {
            Condition::Eq { field, .. } | Condition::Gte { field, .. } | Condition::Lte { field, .. } => field,
        }
    }

    pub fn matches(&self, document: &Value) -> bool {
        let actual = document.get(self.field());
        match self {
            Condition::Eq { value, .. } => actual == Some(value),
            Condition::Gte { value, .. } => actual.and_then(Value::as_i64).is_some_and(|v| v >= *value),
            Condition::Lte { value, .. } => actual.and_then(Value::as_i64).is_some_and(|v| v <= *value),
        }
    }
}

/// Conjunction of conditions. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Eq { field, value: value.into() });
        self
    }

    pub fn gte(mut self, field: &'static str, value: i64) -> Self {
        self.conditions.push(Condition::Gte { field, value });
        self
    }

    pub fn lte(mut self, field: &'static str, value: i64) -> Self {
        self.conditions.push(Condition::Lte { field, value });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn matches(&self, document: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(document))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate document in {collection}: {detail}")]
    Duplicate { collection: Collection, detail: String },
    #[error("malformed document in {collection}: {source}")]
    Malformed {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
    #[error("document store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Collection-scoped document persistence.
///
/// Single-document writes are atomic. Nothing spans documents: callers that update
/// two documents in sequence must tolerate the first write landing without the second.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(&self, collection: Collection, filter: &Filter) -> StoreResult<Option<Value>>;

    /// Matching documents in insertion order, at most `limit` of them.
    async fn find_many(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: usize,
    ) -> StoreResult<Vec<Value>>;

    async fn insert(&self, collection: Collection, document: Value) -> StoreResult<()>;

    async fn insert_many(&self, collection: Collection, documents: Vec<Value>) -> StoreResult<()>;

    /// Merges `changes` into the first matching document. Returns the number matched (0 or 1).
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Map<String, Value>,
    ) -> StoreResult<u64>;

    /// Deletes the first matching document. Returns the number deleted (0 or 1).
    async fn delete_one(&self, collection: Collection, filter: &Filter) -> StoreResult<u64>;

    async fn count(&self, collection: Collection, filter: &Filter) -> StoreResult<u64>;

    /// Releases backend resources. The store must not be used afterwards.
    async fn close(&self);
}

pub fn to_document<T: Serialize>(collection: Collection, value: &T) -> StoreResult<Value> {
    serde_json::to_value(value).map_err(|source| StoreError::Malformed { collection, source })
}

pub fn from_document<T: DeserializeOwned>(collection: Collection, document: Value) -> StoreResult<T> {
    serde_json::from_value(document).map_err(|source| StoreError::Malformed { collection, source })
}

pub async fn find_one_as<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    filter: &Filter,
) -> StoreResult<Option<T>> {
    store
        .find_one(collection, filter)
        .await?
        .map(|doc| from_document(collection, doc))
        .transpose()
}

pub async fn find_many_as<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    filter: &Filter,
    limit: usize,
) -> StoreResult<Vec<T>> {
    store
        .find_many(collection, filter, limit)
        .await?
        .into_iter()
        .map(|doc| from_document(collection, doc))
        .collect()
}

pub async fn insert_as<T: Serialize + Sync>(
    store: &dyn DocumentStore,
    collection: Collection,
    value: &T,
) -> StoreResult<()> {
    let document = to_document(collection, value)?;
    store.insert(collection, document).await
}
