use roster_storage::StorageBackend;
use roster_types::{
    IdGenerator,
    dto::{AccountPatch, AccountSearchFilter, ProfileUpdate, RegisterAccount},
    entities::{Account, Actor, AuthPrincipal, Role},
    error::{Error, Result},
    pagination::{Page, PageRequest},
};

use crate::{auth::PasswordHasher, repository::AccountRepository};

/// The account manager
///
/// Orchestrates the account lifecycle over an [`AccountRepository`] and a
/// [`PasswordHasher`]. Every operation is all-or-nothing: when any
/// precondition check fails, no field mutation reaches the store.
///
/// Authorization-sensitive operations take the acting principal as an
/// explicit [`Actor`] argument; there is no ambient security context. The
/// actor is recorded on tracing events — the authorization decision itself
/// belongs to the caller.
pub struct AccountManager<S: StorageBackend> {
    repository: AccountRepository<S>,
    hasher: PasswordHasher,
}

impl<S: StorageBackend> AccountManager<S> {
    /// Create an account manager over the given storage backend
    pub fn new(storage: S) -> Self {
        Self { repository: AccountRepository::new(storage), hasher: PasswordHasher::new() }
    }

    /// Register a new account
    ///
    /// Hashes the raw password, assigns a fresh snowflake ID, and persists
    /// the account with role `User`.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyExists`] when the email is already registered. The
    ///   pre-check here is backed by the store's email-index uniqueness
    ///   guard, which arbitrates concurrent registrations.
    /// - [`Error::Validation`] for an empty password.
    pub async fn register(&self, request: RegisterAccount) -> Result<Account> {
        if self.repository.is_email_in_use(&request.email).await? {
            return Err(Error::already_exists(format!(
                "Account with email '{}' already exists",
                request.email
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let account = Account::builder()
            .id(IdGenerator::next_id())
            .email(request.email)
            .password_hash(password_hash)
            .name(request.name)
            .address(request.address)
            .role(Role::User)
            .create()?;

        self.repository.create(account.clone()).await?;

        tracing::info!(account_id = account.id, "Account registered");
        Ok(account)
    }

    /// Look up the authentication principal for a login attempt
    ///
    /// The external authentication layer verifies the candidate password
    /// against the returned hash and establishes the session; no session
    /// state is created here. Callers must surface [`Error::NotFound`] as
    /// a generic "authentication denied" so the response never reveals
    /// whether the email exists or the password mismatched.
    pub async fn authenticate_lookup(&self, email: &str) -> Result<AuthPrincipal> {
        let account = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or_else(|| Error::not_found(format!("No account for email '{email}'")))?;

        Ok(AuthPrincipal::from(&account))
    }

    /// Verify a candidate password for an account
    ///
    /// Pure read used to gate sensitive operations; never mutates state.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the account id does not resolve.
    pub async fn verify_password(&self, account_id: i64, candidate: &str) -> Result<bool> {
        let account = self
            .repository
            .get(account_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Account {account_id} not found")))?;

        self.hasher.verify(candidate, &account.password_hash)
    }

    /// Update an account's own profile
    ///
    /// The current-password check runs before any field mutation. A
    /// password change is requested via `new_password` and must be
    /// confirmed; name, email, and address are always overwritten. When
    /// the email changes, uniqueness is re-validated.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] when the account id does not resolve
    /// - [`Error::Auth`] when `current_password` does not verify
    /// - [`Error::Validation`] when `new_password` and `confirm_password`
    ///   do not match
    /// - [`Error::AlreadyExists`] when the new email is already registered
    pub async fn update_profile(
        &self,
        actor: &Actor,
        account_id: i64,
        update: ProfileUpdate,
    ) -> Result<Account> {
        let mut account = self
            .repository
            .get(account_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Account {account_id} not found")))?;

        if !self.hasher.verify(&update.current_password, &account.password_hash)? {
            return Err(Error::auth("Current password does not match".to_string()));
        }

        if let Some(new_password) = update.new_password.as_deref().filter(|p| !p.is_empty()) {
            if update.confirm_password.as_deref() != Some(new_password) {
                return Err(Error::validation(
                    "New password and confirmation do not match".to_string(),
                ));
            }
            let password_hash = self.hasher.hash(new_password)?;
            account.set_password_hash(password_hash)?;
        }

        if update.email != account.email {
            self.ensure_email_available(&update.email).await?;
        }

        account.set_name(update.name)?;
        account.set_email(update.email)?;
        account.set_address(update.address);

        self.repository.update(account.clone()).await?;

        tracing::debug!(actor_id = actor.id, account_id, "Account profile updated");
        Ok(account)
    }

    /// Administrative partial update of an account
    ///
    /// Applies the patch and persists, returning the account id. Skips the
    /// current-password check: this path is only reachable from a
    /// trusted, admin-authorized context, and that authorization decision
    /// is the caller's.
    pub async fn admin_update(
        &self,
        actor: &Actor,
        account_id: i64,
        patch: AccountPatch,
    ) -> Result<i64> {
        let mut account = self
            .repository
            .get(account_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Account {account_id} not found")))?;

        if let Some(email) = &patch.email
            && *email != account.email
        {
            self.ensure_email_available(email).await?;
        }

        account.apply_patch(&patch)?;
        self.repository.update(account).await?;

        tracing::debug!(actor_id = actor.id, account_id, "Account updated administratively");
        Ok(account_id)
    }

    /// Hard-delete an account
    ///
    /// Any active session for the account must be invalidated by the
    /// caller afterwards.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the account id does not resolve — including
    /// on a second delete of the same id.
    pub async fn delete_account(&self, actor: &Actor, account_id: i64) -> Result<()> {
        self.repository.delete(account_id).await?;

        tracing::info!(actor_id = actor.id, account_id, "Account deleted");
        Ok(())
    }

    /// Query one page of the administrative account listing
    ///
    /// Pure read. Ordering is by id ascending, so repeated queries against
    /// an unchanged store are deterministic. Zero matches yield an empty
    /// page with total 0.
    pub async fn search_admin_page(
        &self,
        actor: &Actor,
        filter: &AccountSearchFilter,
        request: PageRequest,
    ) -> Result<Page<Account>> {
        let page = self.repository.query_page(filter, request).await?;

        tracing::debug!(
            actor_id = actor.id,
            total = page.pagination.total,
            page = page.pagination.page,
            "Admin account search"
        );
        Ok(page)
    }

    /// Get an account by id
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the account id does not resolve.
    pub async fn get_account(&self, account_id: i64) -> Result<Account> {
        self.repository
            .get(account_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Account {account_id} not found")))
    }

    /// Get an account by its login email (exact match)
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no account has this email.
    pub async fn get_by_email(&self, email: &str) -> Result<Account> {
        self.repository
            .get_by_email(email)
            .await?
            .ok_or_else(|| Error::not_found(format!("No account for email '{email}'")))
    }

    async fn ensure_email_available(&self, email: &str) -> Result<()> {
        if self.repository.is_email_in_use(email).await? {
            return Err(Error::already_exists(format!(
                "Account with email '{email}' already exists"
            )));
        }
        Ok(())
    }
}
