//! `KeyValueStore` trait: the boundary store port.
//!
//! The quiz writes its one submission record through this port and the
//! results surface reads it back. Values are JSON; last write wins.

use async_trait::async_trait;

use crate::error::DatabaseError;

/// Backend-agnostic key/value store holding JSON values.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DatabaseError>;

    /// Insert or overwrite the value under `key`.
    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), DatabaseError>;

    /// Remove `key`. Returns whether anything was removed.
    async fn clear(&self, key: &str) -> Result<bool, DatabaseError>;
}
