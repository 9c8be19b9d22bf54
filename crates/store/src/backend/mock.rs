//! In-memory store backend for testing.

use crate::DataStore;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory store for testing.
///
/// Entries are held in a `HashMap` behind a [`RwLock`], so all trait methods
/// can operate on `&self` without external synchronisation. Ideal for unit
/// tests that need a [`DataStore`] without touching the filesystem.
///
/// # Examples
///
/// ```
/// use cellar_store::backend::{DataStore, MockStore};
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MockStore::with_entries([("releases", json!([]))]);
/// assert!(store.has("releases").await?);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct MockStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MockStore {
    /// Create a mock store pre-populated with entries.
    pub fn with_entries(entries: impl IntoIterator<Item = (impl Into<String>, Value)>) -> Self {
        let map = entries.into_iter().map(|(name, value)| (name.into(), value)).collect();
        Self { entries: RwLock::new(map) }
    }

    /// Snapshot an entry without going through the trait, for assertions.
    pub async fn snapshot(&self, name: &str) -> Option<Value> {
        self.entries.read().await.get(name).cloned()
    }
}

#[async_trait]
impl DataStore for MockStore {
    async fn has(&self, name: &str) -> Result<bool> {
        Ok(self.entries.read().await.contains_key(name))
    }

    async fn get(&self, name: &str, default: Value) -> Result<Value> {
        Ok(self.entries.read().await.get(name).cloned().unwrap_or(default))
    }

    async fn set(&self, name: &str, value: Value) -> Result<()> {
        self.entries.write().await.insert(name.to_string(), value);
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<()> {
        self.entries.write().await.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MockStore::default();
        store.set("entry", json!({"k": "v"})).await.unwrap();
        assert_eq!(store.get("entry", json!(null)).await.unwrap(), json!({"k": "v"}));
    }

    #[tokio::test]
    async fn test_get_absent_returns_default() {
        let store = MockStore::default();
        assert_eq!(store.get("missing", json!(42)).await.unwrap(), json!(42));
    }

    #[tokio::test]
    async fn test_with_entries() {
        let store = MockStore::with_entries([("a", json!(1)), ("b", json!(2))]);
        assert!(store.has("a").await.unwrap());
        assert!(store.has("b").await.unwrap());
        assert!(!store.has("c").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MockStore::with_entries([("a", json!(1))]);
        store.delete("a").await.unwrap();
        store.delete("a").await.unwrap();
        assert!(!store.has("a").await.unwrap());
    }
}
