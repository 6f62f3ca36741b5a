use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::error::Result;

/// Process-lifetime store, used by tests and the `memory` backend.
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: RwLock<HashMap<String, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.docs.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Value) -> Result<()> {
        self.docs.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_replaces_document() {
        let store = MemoryDocumentStore::new();
        store.put("plants", json!([1])).await.unwrap();
        store.put("plants", json!([1, 2])).await.unwrap();
        assert_eq!(store.get("plants").await.unwrap(), Some(json!([1, 2])));
        assert_eq!(store.get("alerts").await.unwrap(), None);
    }
}
