use serde::{Deserialize, Serialize};

use super::account::{Account, Role};

/// The authentication layer's view of an account
///
/// Carries exactly the fields the external authentication layer needs to
/// verify a login attempt and establish identity. Returned by the account
/// manager's authentication lookup; no session state is created here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthPrincipal {
    /// Login identifier
    pub email: String,

    /// Argon2 hash the authentication layer verifies the candidate against
    pub password_hash: String,

    /// Authorization level to establish for the session
    pub role: Role,
}

impl From<&Account> for AuthPrincipal {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            role: account.role,
        }
    }
}

/// The acting principal for an account operation
///
/// Every authorization-sensitive operation takes the actor explicitly
/// instead of reading ambient security context. The core records the actor
/// on tracing events; the authorization decision itself stays with the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// Account ID of the acting principal
    pub id: i64,

    /// Authorization level of the acting principal
    pub role: Role,
}

impl Actor {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }
}

impl From<&Account> for Actor {
    fn from(account: &Account) -> Self {
        Self { id: account.id, role: account.role }
    }
}
