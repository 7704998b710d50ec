use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::entities::{Account, Role};

/// Input for registering a new account
///
/// The caller is expected to have done structural validation (email
/// format, field lengths) upstream; the core enforces domain invariants
/// only (email uniqueness, non-empty password).
#[derive(Debug, Clone, Builder, Deserialize)]
#[builder(on(String, into))]
pub struct RegisterAccount {
    pub email: String,
    pub password: String,
    pub name: String,
    #[builder(default)]
    #[serde(default)]
    pub address: String,
}

/// Input for a member updating their own profile
///
/// `current_password` is verified against the stored hash before any field
/// is touched. A password change is requested by supplying `new_password`;
/// `confirm_password` must then match it exactly.
#[derive(Debug, Clone, Builder, Deserialize)]
#[builder(on(String, into))]
pub struct ProfileUpdate {
    pub current_password: String,
    pub name: String,
    pub email: String,
    #[builder(default)]
    #[serde(default)]
    pub address: String,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Administrative partial update of an account
///
/// Fields that are `None` are left unchanged. There is deliberately no
/// role or password field here: role changes are out of scope, and
/// password changes go through the profile-update path.
#[derive(Debug, Clone, Default, Builder, Deserialize)]
#[builder(on(String, into))]
pub struct AccountPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Filter for the administrative account listing
///
/// All fields are optional; an empty filter matches every account. Name
/// and email match on case-insensitive substring, role on equality.
#[derive(Debug, Clone, Default, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct AccountSearchFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl AccountSearchFilter {
    /// Whether the given account satisfies every present filter field
    pub fn matches(&self, account: &Account) -> bool {
        if let Some(name) = &self.name
            && !account.name.to_lowercase().contains(&name.to_lowercase())
        {
            return false;
        }
        if let Some(email) = &self.email
            && !account.email.to_lowercase().contains(&email.to_lowercase())
        {
            return false;
        }
        if let Some(role) = &self.role
            && account.role != *role
        {
            return false;
        }
        true
    }
}
