#![deny(unsafe_code)]

//! # Roster Core
//!
//! Account lifecycle and credential-verification logic for Roster.
//!
//! The [`AccountManager`] is the single entry point the (external) web
//! layer calls: registration, authentication lookup, password
//! verification, profile and administrative updates, deletion, and the
//! administrative search. It enforces the domain invariants — email
//! uniqueness, hashed-only passwords, all-or-nothing mutations — and
//! leaves routing, sessions, and form validation to its callers.
//!
//! ## Imports
//!
//! Import types from their source crates:
//! - Entity types: `roster_types::entities`
//! - DTOs: `roster_types::dto`
//! - Errors: `roster_types::Error`
//! - Config: `roster_config::Config`

pub mod auth;
pub mod logging;
pub mod manager;
pub mod repository;

pub use auth::{PasswordHasher, hash_password, verify_password};
pub use manager::AccountManager;
pub use repository::AccountRepository;
