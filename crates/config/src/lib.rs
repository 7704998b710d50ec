//! # Roster Configuration
//!
//! CLI-first configuration for the account core. Uses `clap::Parser` for
//! argument parsing with environment variable fallbacks, and `bon::Builder`
//! for ergonomic test construction without CLI/env interference. A host
//! binary flattens [`Config`] into its own CLI:
//!
//! ```no_run
//! use clap::Parser;
//! use roster_config::Config;
//!
//! let config = Config::parse();
//! config.validate().expect("invalid configuration");
//! ```
//!
//! ```no_run
//! use roster_config::{Config, StorageBackend};
//!
//! let config = Config::builder()
//!     .storage(StorageBackend::Memory)
//!     .admin_page_size(25)
//!     .build();
//! ```

#![deny(unsafe_code)]

use bon::Builder;
use clap::Parser;
use roster_const::limits::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MAX_WORKER_ID};
use roster_types::error::{Error, Result};

/// Default log level filter string.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum StorageBackend {
    /// In-memory storage (data lost on restart).
    #[default]
    Memory,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// Automatically detect: JSON for non-TTY stdout, text otherwise.
    #[default]
    Auto,
    /// JSON structured logging (recommended for production).
    Json,
    /// Human-readable text format.
    Text,
}

/// Configuration for the Roster account core.
///
/// All fields are configurable via CLI flags or environment variables.
/// Precedence: CLI arg > env var > default value.
#[derive(Debug, Clone, Builder, Parser)]
#[command(name = "roster")]
#[command(version)]
#[builder(on(String, into))]
pub struct Config {
    // ── Logging ──────────────────────────────────────────────────────
    /// Tracing-subscriber filter string (e.g., info, debug, trace).
    #[arg(long = "log-level", env = "ROSTER__LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    #[builder(default = DEFAULT_LOG_LEVEL.to_string())]
    pub log_level: String,

    /// Log output format: auto, json, or text.
    #[arg(long = "log-format", env = "ROSTER__LOG_FORMAT", value_enum, default_value = "auto")]
    #[builder(default)]
    pub log_format: LogFormat,

    // ── Storage ──────────────────────────────────────────────────────
    /// Storage backend for account records.
    #[arg(long = "storage", env = "ROSTER__STORAGE", value_enum, default_value = "memory")]
    #[builder(default)]
    pub storage: StorageBackend,

    // ── Identity ─────────────────────────────────────────────────────
    /// Worker ID (0-1023) for snowflake account IDs. Must be unique per
    /// instance; required when running more than one instance.
    #[arg(long = "worker-id", env = "ROSTER__WORKER_ID")]
    pub worker_id: Option<u16>,

    // ── Administration ───────────────────────────────────────────────
    /// Page size for the administrative account listing.
    #[arg(long = "admin-page-size", env = "ROSTER__ADMIN_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    #[builder(default = DEFAULT_PAGE_SIZE)]
    pub admin_page_size: usize,
}

impl Config {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a [`Error::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if let Some(worker_id) = self.worker_id
            && worker_id > MAX_WORKER_ID
        {
            return Err(Error::config(format!(
                "Worker ID must be between 0 and {MAX_WORKER_ID}, got {worker_id}"
            )));
        }

        if self.admin_page_size == 0 || self.admin_page_size > MAX_PAGE_SIZE {
            return Err(Error::config(format!(
                "Admin page size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.admin_page_size
            )));
        }

        Ok(())
    }
}
