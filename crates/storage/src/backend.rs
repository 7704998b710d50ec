//! Core storage traits and types.
//!
//! # Types
//!
//! - [`StorageBackend`] - Core trait for key-value storage operations
//! - [`Transaction`] - Trait for atomic multi-operation commits
//! - [`StorageError`] - Canonical error types for storage operations
//! - [`StorageResult`] - Result type alias for storage operations
//! - [`KeyValue`] - Key-value pair for range query results

use std::ops::RangeBounds;

use async_trait::async_trait;
use bytes::Bytes;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Error types for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Internal backend failure
    #[error("internal storage error: {0}")]
    Internal(String),

    /// A transactional insert guard was violated at commit time
    #[error("write conflict: {0}")]
    Conflict(String),
}

/// Key-value pair returned by range queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: Bytes,
    pub value: Bytes,
}

/// Core trait for key-value storage operations
///
/// Implementations must be safe for concurrent use; each method is one
/// atomic operation against the store. Multi-operation atomicity goes
/// through [`StorageBackend::transaction`].
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Get the value for a key
    async fn get(&self, key: &[u8]) -> StorageResult<Option<Bytes>>;

    /// Set a key to a value, overwriting any existing value
    async fn set(&self, key: Vec<u8>, value: Vec<u8>) -> StorageResult<()>;

    /// Delete a key (no-op if absent)
    async fn delete(&self, key: &[u8]) -> StorageResult<()>;

    /// Get all key-value pairs in a key range, ordered by key
    async fn get_range<R>(&self, range: R) -> StorageResult<Vec<KeyValue>>
    where
        R: RangeBounds<Vec<u8>> + Send;

    /// Start a transaction for atomic multi-operation commits
    async fn transaction(&self) -> StorageResult<Box<dyn Transaction>>;

    /// Check that the backend is reachable and healthy
    async fn health_check(&self) -> StorageResult<()>;
}

/// Trait for atomic multi-operation commits
///
/// Writes are buffered until [`Transaction::commit`]; either every
/// buffered operation is applied or none is. [`Transaction::insert`] is a
/// guarded create-if-absent: commit fails with [`StorageError::Conflict`]
/// if the key exists at commit time, which makes the store the final
/// arbiter for uniqueness constraints under concurrent writers.
#[async_trait]
pub trait Transaction: Send {
    /// Read a key, observing this transaction's buffered writes first
    async fn get(&mut self, key: &[u8]) -> StorageResult<Option<Bytes>>;

    /// Buffer an unconditional write
    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);

    /// Buffer a deletion
    fn delete(&mut self, key: Vec<u8>);

    /// Buffer a guarded create-if-absent write
    fn insert(&mut self, key: Vec<u8>, value: Vec<u8>);

    /// Atomically apply all buffered operations
    async fn commit(self: Box<Self>) -> StorageResult<()>;
}
