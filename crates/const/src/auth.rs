//! Credential hashing constants.

/// Argon2id memory cost in KiB (19 MiB).
///
/// Matches the OWASP minimum recommendation for Argon2id. Raising this
/// slows every registration and password verification proportionally.
pub const ARGON2_M_COST: u32 = 19 * 1024;

/// Argon2id time cost (iterations).
pub const ARGON2_T_COST: u32 = 2;

/// Argon2id parallelism (lanes).
pub const ARGON2_P_COST: u32 = 1;
