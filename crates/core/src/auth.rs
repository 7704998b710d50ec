//! Password hashing and verification.
//!
//! Wraps Argon2id with explicit cost parameters. Raw passwords exist only
//! as transient arguments here; everything stored or compared downstream
//! is a PHC-format hash string.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use roster_const::auth::{ARGON2_M_COST, ARGON2_P_COST, ARGON2_T_COST};
use roster_types::error::{Error, Result};

/// Argon2id password hasher
///
/// The credential hasher the account manager calls through. One-way: a
/// stored hash can only be checked with [`PasswordHasher::verify`], never
/// reversed.
pub struct PasswordHasher {
    argon: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the workspace cost parameters
    pub fn new() -> Self {
        // Cost parameters are compile-time constants known to be in range
        #[allow(clippy::expect_used)]
        let params = Params::new(ARGON2_M_COST, ARGON2_T_COST, ARGON2_P_COST, None)
            .expect("valid Argon2 cost parameters");
        Self { argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params) }
    }

    /// Hash a raw password
    ///
    /// Returns a PHC-format string embedding the salt and cost parameters.
    /// Two hashes of the same password differ (fresh random salt each call).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty password.
    pub fn hash(&self, raw: &str) -> Result<String> {
        if raw.is_empty() {
            return Err(Error::validation("Password must not be empty".to_string()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon
            .hash_password(raw.as_bytes(), &salt)
            .map_err(|e| Error::internal(format!("Failed to hash password: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verify a candidate password against a stored hash
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the stored hash is not a valid PHC
    /// string; a mismatched candidate is `Ok(false)`, not an error.
    pub fn verify(&self, raw: &str, stored_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| Error::internal(format!("Stored password hash is malformed: {e}")))?;

        Ok(self.argon.verify_password(raw.as_bytes(), &parsed).is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a raw password with the default hasher
pub fn hash_password(raw: &str) -> Result<String> {
    PasswordHasher::new().hash(raw)
}

/// Verify a candidate password against a stored hash with the default hasher
pub fn verify_password(raw: &str, stored_hash: &str) -> Result<bool> {
    PasswordHasher::new().verify(raw, stored_hash)
}
