use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use super::DocumentStore;
use crate::db::DbPool;
use crate::error::{AppError, Result};

/// Documents kept as JSON text in a single SQLite table.
pub struct SqliteDocumentStore {
    pool: DbPool,
}

impl SqliteDocumentStore {
    /// Wrap a pool, creating the `documents` table if needed.
    pub async fn new(pool: DbPool) -> Result<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                key TEXT PRIMARY KEY NOT NULL,
                body TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let body = sqlx::query_scalar::<_, String>("SELECT body FROM documents WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match body {
            Some(body) => {
                let value = serde_json::from_str(&body).map_err(|e| {
                    AppError::StorageUnavailable(format!("document {} is not valid JSON: {}", key, e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: Value) -> Result<()> {
        let body = serde_json::to_string(&value)?;

        sqlx::query(
            r#"
            INSERT INTO documents (key, body, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(body)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use serde_json::json;

    async fn memory_store() -> SqliteDocumentStore {
        let pool = db::connect("sqlite::memory:").await.unwrap();
        SqliteDocumentStore::new(pool).await.unwrap()
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = memory_store().await;
        assert_eq!(store.get("plants").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_upserts() {
        let store = memory_store().await;
        store.put("plants", json!([{"id": "a"}])).await.unwrap();
        store.put("plants", json!([{"id": "b"}])).await.unwrap();

        assert_eq!(store.get("plants").await.unwrap(), Some(json!([{"id": "b"}])));

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("nested/solar.db").display());

        {
            let store = SqliteDocumentStore::new(db::connect(&url).await.unwrap())
                .await
                .unwrap();
            store.put("alerts", json!([])).await.unwrap();
            store.pool.close().await;
        }

        let store = SqliteDocumentStore::new(db::connect(&url).await.unwrap())
            .await
            .unwrap();
        assert_eq!(store.get("alerts").await.unwrap(), Some(json!([])));
    }
}
