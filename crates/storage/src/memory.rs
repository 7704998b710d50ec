//! In-memory storage backend.
//!
//! Thread-safe ordered key-value storage over a `BTreeMap` behind an async
//! `RwLock`. Transactions buffer their writes and apply them all-or-nothing
//! under the write lock, so commit is atomic with respect to every other
//! operation. Intended for development and tests; data is lost on drop.

use std::{
    collections::{BTreeMap, HashMap},
    ops::RangeBounds,
    sync::Arc,
};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::backend::{KeyValue, StorageBackend, StorageError, StorageResult, Transaction};

type Map = BTreeMap<Vec<u8>, Bytes>;

/// In-memory storage backend
#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<RwLock<Map>>,
}

impl MemoryBackend {
    /// Create a new, empty in-memory backend
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn get(&self, key: &[u8]) -> StorageResult<Option<Bytes>> {
        let map = self.inner.read().await;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: Vec<u8>, value: Vec<u8>) -> StorageResult<()> {
        let mut map = self.inner.write().await;
        map.insert(key, Bytes::from(value));
        Ok(())
    }

    async fn delete(&self, key: &[u8]) -> StorageResult<()> {
        let mut map = self.inner.write().await;
        map.remove(key);
        Ok(())
    }

    async fn get_range<R>(&self, range: R) -> StorageResult<Vec<KeyValue>>
    where
        R: RangeBounds<Vec<u8>> + Send,
    {
        let map = self.inner.read().await;
        Ok(map
            .range(range)
            .map(|(key, value)| KeyValue {
                key: Bytes::from(key.clone()),
                value: value.clone(),
            })
            .collect())
    }

    async fn transaction(&self) -> StorageResult<Box<dyn Transaction>> {
        Ok(Box::new(MemoryTransaction { inner: Arc::clone(&self.inner), ops: Vec::new() }))
    }

    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}

/// A buffered operation inside a [`MemoryTransaction`]
enum Op {
    Set(Vec<u8>, Bytes),
    Delete(Vec<u8>),
    Insert(Vec<u8>, Bytes),
}

/// Transaction over [`MemoryBackend`]
///
/// Writes are buffered in order; commit validates every insert guard and
/// applies the buffer under a single write lock.
struct MemoryTransaction {
    inner: Arc<RwLock<Map>>,
    ops: Vec<Op>,
}

#[async_trait]
impl Transaction for MemoryTransaction {
    async fn get(&mut self, key: &[u8]) -> StorageResult<Option<Bytes>> {
        // Read-your-writes: the most recent buffered op for the key wins
        for op in self.ops.iter().rev() {
            match op {
                Op::Set(k, v) | Op::Insert(k, v) if k.as_slice() == key => {
                    return Ok(Some(v.clone()));
                },
                Op::Delete(k) if k.as_slice() == key => return Ok(None),
                _ => {},
            }
        }

        let map = self.inner.read().await;
        Ok(map.get(key).cloned())
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.ops.push(Op::Set(key, Bytes::from(value)));
    }

    fn delete(&mut self, key: Vec<u8>) {
        self.ops.push(Op::Delete(key));
    }

    fn insert(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.ops.push(Op::Insert(key, Bytes::from(value)));
    }

    async fn commit(self: Box<Self>) -> StorageResult<()> {
        let MemoryTransaction { inner, ops } = *self;
        let mut map = inner.write().await;

        // Validate insert guards against committed state plus earlier
        // buffered operations before touching the map
        {
            let mut overlay: HashMap<&[u8], bool> = HashMap::new();
            for op in &ops {
                match op {
                    Op::Set(k, _) => {
                        overlay.insert(k, true);
                    },
                    Op::Delete(k) => {
                        overlay.insert(k, false);
                    },
                    Op::Insert(k, _) => {
                        let exists = overlay
                            .get(k.as_slice())
                            .copied()
                            .unwrap_or_else(|| map.contains_key(k.as_slice()));
                        if exists {
                            return Err(StorageError::Conflict(format!(
                                "key '{}' already exists",
                                String::from_utf8_lossy(k)
                            )));
                        }
                        overlay.insert(k, true);
                    },
                }
            }
        }

        for op in ops {
            match op {
                Op::Set(key, value) | Op::Insert(key, value) => {
                    map.insert(key, value);
                },
                Op::Delete(key) => {
                    map.remove(&key);
                },
            }
        }

        Ok(())
    }
}
