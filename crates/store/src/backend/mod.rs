//! Durable store trait and implementations.
//!
//! This module defines the `DataStore` trait, a minimal named-entry JSON
//! store. Each entry is an opaque [`serde_json::Value`] written and read in
//! full; there is no partial update, no transactions, no schema. Consumers
//! that need structure layer it on top (see `cellar-catalog`).

mod local;
#[cfg(feature = "mock")]
mod mock;

pub use self::local::LocalStore;
#[cfg(feature = "mock")]
pub use self::mock::MockStore;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Unified interface for durable named-entry stores.
///
/// Entries are identified by a flat name (no hierarchy) and hold a single
/// JSON value each. Writes replace the whole value; reads return the whole
/// value. Read-after-write consistency within a single process is required
/// of every implementation.
///
/// # Examples
///
/// ```
/// use cellar_store::{DataStore, error::Result};
/// use serde_json::{Value, json};
///
/// async fn bump_counter(store: &dyn DataStore) -> Result<u64> {
///     let current = store.get("counter", json!(0)).await?.as_u64().unwrap_or(0);
///     store.set("counter", json!(current + 1)).await?;
///     Ok(current + 1)
/// }
/// ```
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Check whether a named entry exists.
    async fn has(&self, name: &str) -> Result<bool>;

    /// Read a named entry in full, returning `default` when it is absent.
    ///
    /// A present-but-unparseable entry is an error
    /// ([`Malformed`](crate::error::ErrorKind::Malformed)), not the default:
    /// silently replacing corrupt data would destroy whatever the user had.
    async fn get(&self, name: &str, default: Value) -> Result<Value>;

    /// Create or overwrite a named entry in full.
    async fn set(&self, name: &str, value: Value) -> Result<()>;

    /// Delete a named entry. Deleting an absent entry is a no-op, so that
    /// delete-then-set sequences don't need an existence check first.
    async fn delete(&self, name: &str) -> Result<()>;
}
