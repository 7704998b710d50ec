use roster_storage::{StorageBackend, StorageError};
use roster_types::{
    dto::AccountSearchFilter,
    entities::Account,
    error::{Error, Result},
    pagination::{Page, PageRequest},
};

/// Repository for Account entity operations
///
/// Key schema:
/// - account:{id} -> Account data
/// - account_email:{email} -> account_id (unique login-email index)
///
/// The email index is written with the transactional insert guard, so the
/// store itself rejects a second account for an email that a concurrent
/// writer committed between the manager's pre-check and this commit.
pub struct AccountRepository<S: StorageBackend> {
    storage: S,
}

impl<S: StorageBackend> AccountRepository<S> {
    /// Create a new account repository
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Generate key for account by ID
    fn account_key(id: i64) -> Vec<u8> {
        format!("account:{id}").into_bytes()
    }

    /// Generate key for the login-email index
    ///
    /// Emails are indexed exactly as stored: matching is case-sensitive.
    fn email_index_key(email: &str) -> Vec<u8> {
        format!("account_email:{email}").into_bytes()
    }

    /// Create a new account
    ///
    /// Fails with [`Error::AlreadyExists`] when the email index key is
    /// already taken at commit time.
    pub async fn create(&self, account: Account) -> Result<()> {
        let account_data = serde_json::to_vec(&account)
            .map_err(|e| Error::internal(format!("Failed to serialize account: {e}")))?;

        let mut txn = self
            .storage
            .transaction()
            .await
            .map_err(|e| Error::internal(format!("Failed to start transaction: {e}")))?;

        // Guarded insert: the store arbitrates email uniqueness
        txn.insert(Self::email_index_key(&account.email), account.id.to_le_bytes().to_vec());
        txn.set(Self::account_key(account.id), account_data);

        txn.commit().await.map_err(|e| match e {
            StorageError::Conflict(_) => Error::already_exists(format!(
                "Account with email '{}' already exists",
                account.email
            )),
            other => Error::internal(format!("Failed to commit account creation: {other}")),
        })?;

        Ok(())
    }

    /// Get an account by ID
    pub async fn get(&self, id: i64) -> Result<Option<Account>> {
        let key = Self::account_key(id);
        let data = self
            .storage
            .get(&key)
            .await
            .map_err(|e| Error::internal(format!("Failed to get account: {e}")))?;

        match data {
            Some(bytes) => {
                let account: Account = serde_json::from_slice(&bytes)
                    .map_err(|e| Error::internal(format!("Failed to deserialize account: {e}")))?;
                Ok(Some(account))
            },
            None => Ok(None),
        }
    }

    /// Get an account by its login email (exact match)
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Account>> {
        let index_key = Self::email_index_key(email);
        let data = self
            .storage
            .get(&index_key)
            .await
            .map_err(|e| Error::internal(format!("Failed to get account by email: {e}")))?;

        match data {
            Some(bytes) => {
                if bytes.len() != 8 {
                    return Err(Error::internal("Invalid account email index data".to_string()));
                }
                let id = super::parse_i64_id(&bytes)?;
                self.get(id).await
            },
            None => Ok(None),
        }
    }

    /// Check whether an email is already registered
    pub async fn is_email_in_use(&self, email: &str) -> Result<bool> {
        Ok(self.get_by_email(email).await?.is_some())
    }

    /// Update an existing account
    ///
    /// When the email changed, the old index entry is removed and the new
    /// one inserted under the uniqueness guard, all in one transaction.
    pub async fn update(&self, account: Account) -> Result<()> {
        let old_account = self
            .get(account.id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Account {} not found", account.id)))?;

        let account_data = serde_json::to_vec(&account)
            .map_err(|e| Error::internal(format!("Failed to serialize account: {e}")))?;

        if old_account.email != account.email {
            let mut txn = self
                .storage
                .transaction()
                .await
                .map_err(|e| Error::internal(format!("Failed to start transaction: {e}")))?;

            txn.set(Self::account_key(account.id), account_data);
            txn.delete(Self::email_index_key(&old_account.email));
            txn.insert(Self::email_index_key(&account.email), account.id.to_le_bytes().to_vec());

            txn.commit().await.map_err(|e| match e {
                StorageError::Conflict(_) => Error::already_exists(format!(
                    "Account with email '{}' already exists",
                    account.email
                )),
                other => Error::internal(format!("Failed to commit account update: {other}")),
            })?;
        } else {
            self.storage
                .set(Self::account_key(account.id), account_data)
                .await
                .map_err(|e| Error::internal(format!("Failed to update account: {e}")))?;
        }

        Ok(())
    }

    /// Hard-delete an account and its email index entry
    pub async fn delete(&self, id: i64) -> Result<()> {
        let account = self
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Account {id} not found")))?;

        let mut txn = self
            .storage
            .transaction()
            .await
            .map_err(|e| Error::internal(format!("Failed to start transaction: {e}")))?;

        txn.delete(Self::account_key(id));
        txn.delete(Self::email_index_key(&account.email));

        txn.commit()
            .await
            .map_err(|e| Error::internal(format!("Failed to commit account deletion: {e}")))?;

        Ok(())
    }

    /// Query one page of accounts matching a filter
    ///
    /// Results are ordered by id ascending, so repeated queries against an
    /// unchanged store return identical pages. A filter matching nothing
    /// yields an empty page with total 0.
    pub async fn query_page(
        &self,
        filter: &AccountSearchFilter,
        request: PageRequest,
    ) -> Result<Page<Account>> {
        let request = request.validate();

        // Record keys are "account:{id}"; '~' sorts after every digit, and
        // the index prefix "account_email:" sorts after "account:~"
        let kvs = self
            .storage
            .get_range(b"account:".to_vec()..b"account:~".to_vec())
            .await
            .map_err(|e| Error::internal(format!("Failed to scan accounts: {e}")))?;

        let mut matches = Vec::new();
        for kv in kvs {
            let account: Account = serde_json::from_slice(&kv.value)
                .map_err(|e| Error::internal(format!("Failed to deserialize account: {e}")))?;
            if filter.matches(&account) {
                matches.push(account);
            }
        }

        // Key order is lexicographic over decimal ids; re-sort numerically
        matches.sort_unstable_by_key(|account| account.id);

        let total = matches.len();
        let items: Vec<Account> =
            matches.into_iter().skip(request.offset()).take(request.size).collect();

        Ok(Page::from_total(items, total, &request))
    }
}
