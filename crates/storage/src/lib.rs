#![deny(unsafe_code)]

//! # Roster Storage
//!
//! Durable keyed storage abstraction for account records.
//!
//! The account repository talks to storage exclusively through the
//! [`StorageBackend`] trait, so the core never sees persistence mechanics.
//! [`Transaction`] provides atomic multi-operation commits; its guarded
//! `insert` is the storage-level uniqueness constraint that arbitrates
//! concurrent registrations with the same email.

pub mod backend;
pub mod factory;
pub mod memory;

pub use backend::{KeyValue, StorageBackend, StorageError, StorageResult, Transaction};
pub use factory::{Backend, StorageBackendType, StorageConfig, create_storage_backend};
pub use memory::MemoryBackend;
