//! # Roster Constants
//!
//! Zero-dependency crate containing constants used across the Roster codebase.
//!
//! This crate centralizes:
//! - Credential hashing cost parameters (Argon2id)
//! - Paging limit constants for the administrative account listing

pub mod auth;
pub mod limits;

// Re-export commonly used constants at crate root
pub use auth::{ARGON2_M_COST, ARGON2_P_COST, ARGON2_T_COST};
pub use limits::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MAX_WORKER_ID};
