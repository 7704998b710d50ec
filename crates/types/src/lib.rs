//! # Roster Types
//!
//! Shared type definitions for Roster.
//!
//! This crate provides all core types used across the Roster ecosystem,
//! ensuring a single source of truth and preventing circular dependencies.
//!
//! ## Builder Patterns
//!
//! Entity and DTO types in this crate use the [`bon`](https://docs.rs/bon) crate
//! for builder pattern generation. There are two patterns used:
//!
//! ### Derived Builders (Struct-level)
//!
//! Types without validation use `#[derive(bon::Builder)]` directly on the struct.
//! Optional fields get `.maybe_*()` methods for passing `Option<T>` values:
//!
//! ```ignore
//! use roster_types::dto::AccountSearchFilter;
//!
//! let filter = AccountSearchFilter::builder()
//!     .maybe_name(Some("alice".to_string()))
//!     .build();
//! ```
//!
//! ### Fallible Builders (Constructor-level)
//!
//! Types with validation use `#[builder]` on the `new()` function. These return
//! `Result<Self>` and use `create` as the finishing call:
//!
//! ```ignore
//! use roster_types::entities::Account;
//!
//! let account = Account::builder()
//!     .id(12345)
//!     .email("alice@example.com")
//!     .password_hash("$argon2id$...")
//!     .name("Alice")
//!     .create()
//!     .expect("valid account");
//! ```

#![deny(unsafe_code)]

// ============================================================================
// Error Types
// ============================================================================

pub mod error;

pub use error::{Error, Result};

// ============================================================================
// ID Generation
// ============================================================================

pub mod id;

pub use id::IdGenerator;

// ============================================================================
// Pagination Types
// ============================================================================

pub mod pagination;

pub use pagination::{Page, PageRequest, PaginationMeta};

// ============================================================================
// Entity Types
// ============================================================================

pub mod entities;

pub use entities::{Account, Actor, AuthPrincipal, Role};

// ============================================================================
// Request Types
// ============================================================================

pub mod dto;

pub use dto::{AccountPatch, AccountSearchFilter, ProfileUpdate, RegisterAccount};
