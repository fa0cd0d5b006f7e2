//! On-device key-value persistence
//!
//! The mirror only needs string values under a handful of well-known keys,
//! so storage backends implement a minimal async get/set/remove contract.

mod libsql_store;
mod memory;

use async_trait::async_trait;

use crate::error::Result;

pub use libsql_store::{LibSqlKeyValueStore, DATABASE_FILE_NAME};
pub use memory::MemoryKeyValueStore;

/// Durable string storage keyed by name
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `Ok(None)` when the key was never written or was removed
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
