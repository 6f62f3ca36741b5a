//! Whole-document persistence keyed by name.
//!
//! Every component that persists state reads a JSON document, changes it, and
//! writes it back. Callers serialise their own read-modify-write cycles; the
//! backends only guarantee that a single `put` replaces the document whole.

pub mod file;
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::Result;

pub use file::FileDocumentStore;
pub use memory::MemoryDocumentStore;
pub use sqlite::SqliteDocumentStore;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the document stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the document stored under `key`.
    async fn put(&self, key: &str, value: Value) -> Result<()>;
}

pub type SharedStore = Arc<dyn DocumentStore>;

/// Read and deserialize a typed document.
pub async fn load<T: DeserializeOwned>(store: &dyn DocumentStore, key: &str) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize and write a typed document.
pub async fn save<T: Serialize>(store: &dyn DocumentStore, key: &str, doc: &T) -> Result<()> {
    let value = serde_json::to_value(doc)?;
    store.put(key, value).await
}

/// Open the backend selected in configuration.
pub async fn open(config: &StorageConfig) -> Result<SharedStore> {
    let store: SharedStore = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryDocumentStore::new()),
        StorageBackend::File => Arc::new(FileDocumentStore::open(&config.path).await?),
        StorageBackend::Sqlite => {
            let pool = crate::db::connect(&config.url).await?;
            Arc::new(SqliteDocumentStore::new(pool).await?)
        }
    };

    tracing::info!(backend = ?config.backend, "Document store opened");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        values: Vec<u32>,
    }

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let store = MemoryDocumentStore::new();
        let doc: Option<Doc> = load(&store, "missing").await.unwrap();
        assert!(doc.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryDocumentStore::new();
        let doc = Doc {
            name: "a".into(),
            values: vec![1, 2, 3],
        };
        save(&store, "doc", &doc).await.unwrap();
        let loaded: Option<Doc> = load(&store, "doc").await.unwrap();
        assert_eq!(loaded, Some(doc));
    }

    #[tokio::test]
    async fn test_load_wrong_shape_is_error() {
        let store = MemoryDocumentStore::new();
        store.put("doc", serde_json::json!({"unexpected": true})).await.unwrap();
        let result: Result<Option<Doc>> = load(&store, "doc").await;
        assert!(matches!(result, Err(AppError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_open_memory_backend() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..Default::default()
        };
        let store = open(&config).await.unwrap();
        store.put("k", serde_json::json!(1)).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(serde_json::json!(1)));
    }
}
