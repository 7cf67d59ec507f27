use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use umroh_core::{Collection, Condition, DocumentStore, Filter, StoreError, StoreResult};

/// Document store on a single PostgreSQL JSONB table (see `migrations/`).
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(Box::new(err))
}

fn insert_error(collection: Collection, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return StoreError::Duplicate { collection, detail: db.message().to_string() };
        }
    }
    backend(err)
}

/// Appends `WHERE collection = .. AND <conditions>` with every value bound.
fn push_where(qb: &mut QueryBuilder<'_, Postgres>, collection: Collection, filter: &Filter) {
    qb.push(" WHERE collection = ").push_bind(collection.name());
    for condition in filter.conditions() {
        match condition {
            Condition::Eq { field, value } => {
                qb.push(" AND body -> ").push_bind(*field);
                qb.push(" = ").push_bind(Json(value.clone()));
            }
            Condition::Gte { field, value } => push_range(qb, field, ">=", *value),
            Condition::Lte { field, value } => push_range(qb, field, "<=", *value),
        }
    }
}

// Non-numeric fields never match a range, mirroring the in-memory store.
fn push_range(qb: &mut QueryBuilder<'_, Postgres>, field: &'static str, op: &str, value: i64) {
    qb.push(" AND CASE WHEN jsonb_typeof(body -> ").push_bind(field);
    qb.push(") = 'number' THEN (body ->> ").push_bind(field);
    qb.push(format!(")::numeric {} ", op)).push_bind(value);
    qb.push(" ELSE FALSE END");
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_one(&self, collection: Collection, filter: &Filter) -> StoreResult<Option<Value>> {
        let mut qb = QueryBuilder::new("SELECT body FROM documents");
        push_where(&mut qb, collection, filter);
        qb.push(" ORDER BY seq LIMIT 1");

        let row: Option<Json<Value>> = qb
            .build_query_scalar()
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        Ok(row.map(|Json(doc)| doc))
    }

    async fn find_many(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: usize,
    ) -> StoreResult<Vec<Value>> {
        let mut qb = QueryBuilder::new("SELECT body FROM documents");
        push_where(&mut qb, collection, filter);
        qb.push(" ORDER BY seq LIMIT ").push_bind(i64::try_from(limit).unwrap_or(i64::MAX));

        let rows: Vec<Json<Value>> = qb
            .build_query_scalar()
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn insert(&self, collection: Collection, document: Value) -> StoreResult<()> {
        sqlx::query("INSERT INTO documents (collection, body) VALUES ($1, $2)")
            .bind(collection.name())
            .bind(Json(document))
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error(collection, e))?;
        Ok(())
    }

    async fn insert_many(&self, collection: Collection, documents: Vec<Value>) -> StoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(backend)?;
        let count = documents.len();

        for document in documents {
            sqlx::query("INSERT INTO documents (collection, body) VALUES ($1, $2)")
                .bind(collection.name())
                .bind(Json(document))
                .execute(&mut *tx)
                .await
                .map_err(|e| insert_error(collection, e))?;
        }

        tx.commit().await.map_err(backend)?;
        info!("Inserted {} documents into {}", count, collection);
        Ok(())
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Map<String, Value>,
    ) -> StoreResult<u64> {
        let mut qb = QueryBuilder::new("UPDATE documents SET body = body || ");
        qb.push_bind(Json(Value::Object(changes)));
        qb.push(" WHERE seq = (SELECT seq FROM documents");
        push_where(&mut qb, collection, filter);
        qb.push(" ORDER BY seq LIMIT 1)");

        let result = qb.build().execute(&self.pool).await.map_err(backend)?;
        Ok(result.rows_affected())
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> StoreResult<u64> {
        let mut qb = QueryBuilder::new("DELETE FROM documents WHERE seq = (SELECT seq FROM documents");
        push_where(&mut qb, collection, filter);
        qb.push(" ORDER BY seq LIMIT 1)");

        let result = qb.build().execute(&self.pool).await.map_err(backend)?;
        Ok(result.rows_affected())
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> StoreResult<u64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM documents");
        push_where(&mut qb, collection, filter);

        let count: i64 = qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(backend)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn close(&self) {
        info!("Closing database pool");
        self.pool.close().await;
    }
}
