use bon::bon;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    dto::AccountPatch,
    error::{Error, Result},
};

/// Authorization level of an account
///
/// Set at creation and never changed by profile self-update. No
/// role-change path is exposed in the current scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// A persisted user identity record
///
/// # Invariants
///
/// - `id` is assigned at creation and never reused or mutated
/// - `email` is unique across all accounts (exact-match, case-sensitive)
/// - `password_hash` is always the Argon2 hash of a non-empty password,
///   never a raw password
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// Unique account ID (Snowflake ID)
    pub id: i64,

    /// Login identifier, unique across all accounts
    pub email: String,

    /// Argon2 PHC-format hash of the account password
    pub password_hash: String,

    /// Display name
    pub name: String,

    /// Free-form postal address, may be empty
    pub address: String,

    /// Authorization level
    pub role: Role,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last modified
    pub updated_at: DateTime<Utc>,
}

#[bon]
impl Account {
    /// Create a new account
    ///
    /// # Arguments
    ///
    /// * `id` - Snowflake ID for the account
    /// * `email` - Login identifier (must be non-empty)
    /// * `password_hash` - Hashed password (must be non-empty; never a raw password)
    /// * `name` - Display name (must be non-empty)
    /// * `address` - Postal address (may be empty)
    /// * `role` - Authorization level (defaults to `Role::User`)
    #[builder(on(String, into), finish_fn = create)]
    pub fn new(
        id: i64,
        email: String,
        password_hash: String,
        name: String,
        #[builder(default)] address: String,
        #[builder(default = Role::User)] role: Role,
    ) -> Result<Self> {
        validate_email(&email)?;
        validate_password_hash(&password_hash)?;
        validate_name(&name)?;

        let now = Utc::now();
        Ok(Self { id, email, password_hash, name, address, role, created_at: now, updated_at: now })
    }

    /// Change the display name
    pub fn set_name(&mut self, name: String) -> Result<()> {
        validate_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    /// Change the login email
    ///
    /// Uniqueness against other accounts is the repository's concern; this
    /// only enforces the field-level invariant.
    pub fn set_email(&mut self, email: String) -> Result<()> {
        validate_email(&email)?;
        self.email = email;
        self.touch();
        Ok(())
    }

    /// Change the postal address
    pub fn set_address(&mut self, address: String) {
        self.address = address;
        self.touch();
    }

    /// Replace the password hash
    pub fn set_password_hash(&mut self, password_hash: String) -> Result<()> {
        validate_password_hash(&password_hash)?;
        self.password_hash = password_hash;
        self.touch();
        Ok(())
    }

    /// Apply an administrative patch
    ///
    /// Fields that are `None` in the patch are left unchanged. The patch
    /// deliberately cannot touch `id`, `role`, or `password_hash`.
    pub fn apply_patch(&mut self, patch: &AccountPatch) -> Result<()> {
        if let Some(name) = &patch.name {
            self.set_name(name.clone())?;
        }
        if let Some(email) = &patch.email {
            self.set_email(email.clone())?;
        }
        if let Some(address) = &patch.address {
            self.set_address(address.clone());
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(Error::validation("Email must not be empty".to_string()));
    }
    Ok(())
}

fn validate_password_hash(password_hash: &str) -> Result<()> {
    if password_hash.is_empty() {
        return Err(Error::validation("Password hash must not be empty".to_string()));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation("Name must not be empty".to_string()));
    }
    Ok(())
}
