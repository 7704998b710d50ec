#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Integration tests for the account lifecycle.
//!
//! These tests exercise the account manager end-to-end against the
//! in-memory backend: registration uniqueness, credential verification,
//! the all-or-nothing profile update, deletion, and the administrative
//! search.

use roster_core::AccountManager;
use roster_storage::Backend;
use roster_types::{
    Error, IdGenerator,
    dto::{AccountSearchFilter, ProfileUpdate, RegisterAccount},
    entities::{Actor, Role},
    pagination::PageRequest,
};

fn create_test_manager() -> AccountManager<Backend> {
    let _ = IdGenerator::init(40);
    AccountManager::new(Backend::memory())
}

fn register_request(email: &str, password: &str, name: &str) -> RegisterAccount {
    RegisterAccount::builder()
        .email(email)
        .password(password)
        .name(name)
        .address("1 Test Lane")
        .build()
}

fn profile_update(current_password: &str, name: &str, email: &str) -> ProfileUpdate {
    ProfileUpdate::builder()
        .current_password(current_password)
        .name(name)
        .email(email)
        .address("1 Test Lane")
        .build()
}

// ---------------------------------------------------------------------------
// Registration uniqueness
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let manager = create_test_manager();

    let first =
        manager.register(register_request("a@x.com", "p1", "First")).await.unwrap();

    let result = manager.register(register_request("a@x.com", "p2", "Second")).await;
    assert!(matches!(result.unwrap_err(), Error::AlreadyExists { .. }));

    // Exactly one record exists for the email, and it is the first one
    let stored = manager.get_by_email("a@x.com").await.unwrap();
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.name, "First");
}

// ---------------------------------------------------------------------------
// Credential verification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_verify_password_only_accepts_original() {
    let manager = create_test_manager();
    let account =
        manager.register(register_request("a@x.com", "p1", "Alice")).await.unwrap();

    assert!(manager.verify_password(account.id, "p1").await.unwrap());
    assert!(!manager.verify_password(account.id, "wrong").await.unwrap());
    assert!(!manager.verify_password(account.id, "").await.unwrap());
    // The stored hash is salted; the plaintext never equals it
    assert!(!manager.verify_password(account.id, &account.password_hash).await.unwrap());
}

#[tokio::test]
async fn test_verify_password_stable_across_rehash_runs() {
    let manager = create_test_manager();

    // Two accounts with the same password get different salted hashes,
    // yet each verifies its own password
    let first = manager.register(register_request("a@x.com", "shared", "A")).await.unwrap();
    let second = manager.register(register_request("b@x.com", "shared", "B")).await.unwrap();

    assert_ne!(first.password_hash, second.password_hash);
    assert!(manager.verify_password(first.id, "shared").await.unwrap());
    assert!(manager.verify_password(second.id, "shared").await.unwrap());
}

#[tokio::test]
async fn test_verify_password_unknown_account() {
    let manager = create_test_manager();

    let result = manager.verify_password(424242, "p1").await;
    assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));
}

// ---------------------------------------------------------------------------
// Authentication lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_authenticate_lookup_returns_principal() {
    let manager = create_test_manager();
    manager.register(register_request("a@x.com", "p1", "A")).await.unwrap();

    let principal = manager.authenticate_lookup("a@x.com").await.unwrap();
    assert_eq!(principal.email, "a@x.com");
    assert_eq!(principal.role, Role::User);
    // The principal carries the hash for the auth layer, never the plaintext
    assert!(principal.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_authenticate_lookup_unknown_email() {
    let manager = create_test_manager();

    let result = manager.authenticate_lookup("nobody@x.com").await;
    assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));
}

#[tokio::test]
async fn test_authenticate_lookup_is_case_sensitive() {
    let manager = create_test_manager();
    manager.register(register_request("a@x.com", "p1", "A")).await.unwrap();

    let result = manager.authenticate_lookup("A@X.COM").await;
    assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));
}

// ---------------------------------------------------------------------------
// Profile update — all-or-nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_with_wrong_current_password_changes_nothing() {
    let manager = create_test_manager();
    let account =
        manager.register(register_request("a@x.com", "p1", "Alice")).await.unwrap();
    let actor = Actor::from(&account);

    let mut update = profile_update("wrong", "Hijacked", "evil@x.com");
    update.new_password = Some("owned".to_string());
    update.confirm_password = Some("owned".to_string());

    let result = manager.update_profile(&actor, account.id, update).await;
    assert!(matches!(result.unwrap_err(), Error::Auth { .. }));

    // Stored record is byte-for-byte unchanged
    let stored = manager.get_account(account.id).await.unwrap();
    assert_eq!(stored, account);
}

#[tokio::test]
async fn test_update_with_mismatched_confirmation_changes_nothing() {
    let manager = create_test_manager();
    let account =
        manager.register(register_request("a@x.com", "p1", "Alice")).await.unwrap();
    let actor = Actor::from(&account);

    let mut update = profile_update("p1", "Alice", "a@x.com");
    update.new_password = Some("abc".to_string());
    update.confirm_password = Some("xyz".to_string());

    let result = manager.update_profile(&actor, account.id, update).await;
    assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

    // No hash was recomputed or stored; the old password still works
    let stored = manager.get_account(account.id).await.unwrap();
    assert_eq!(stored.password_hash, account.password_hash);
    assert!(manager.verify_password(account.id, "p1").await.unwrap());
}

#[tokio::test]
async fn test_update_overwrites_profile_fields() {
    let manager = create_test_manager();
    let account =
        manager.register(register_request("a@x.com", "p1", "Alice")).await.unwrap();
    let actor = Actor::from(&account);

    let mut update = profile_update("p1", "Alice Prime", "prime@x.com");
    update.address = "2 Renamed Road".to_string();

    let updated = manager.update_profile(&actor, account.id, update).await.unwrap();
    assert_eq!(updated.name, "Alice Prime");
    assert_eq!(updated.email, "prime@x.com");
    assert_eq!(updated.address, "2 Renamed Road");
    // Role survives a profile self-update
    assert_eq!(updated.role, Role::User);

    // Login lookup follows the new email
    assert!(manager.authenticate_lookup("a@x.com").await.is_err());
    assert!(manager.authenticate_lookup("prime@x.com").await.is_ok());
}

#[tokio::test]
async fn test_update_changes_password_when_confirmed() {
    let manager = create_test_manager();
    let account =
        manager.register(register_request("a@x.com", "old-pass", "Alice")).await.unwrap();
    let actor = Actor::from(&account);

    let mut update = profile_update("old-pass", "Alice", "a@x.com");
    update.new_password = Some("new-pass".to_string());
    update.confirm_password = Some("new-pass".to_string());

    manager.update_profile(&actor, account.id, update).await.unwrap();

    assert!(!manager.verify_password(account.id, "old-pass").await.unwrap());
    assert!(manager.verify_password(account.id, "new-pass").await.unwrap());
}

#[tokio::test]
async fn test_update_without_new_password_keeps_old_credential() {
    let manager = create_test_manager();
    let account =
        manager.register(register_request("a@x.com", "p1", "Alice")).await.unwrap();
    let actor = Actor::from(&account);

    // Empty new_password means "no password change"
    let mut update = profile_update("p1", "Alice Renamed", "a@x.com");
    update.new_password = Some(String::new());

    manager.update_profile(&actor, account.id, update).await.unwrap();

    assert!(manager.verify_password(account.id, "p1").await.unwrap());
    assert_eq!(manager.get_account(account.id).await.unwrap().name, "Alice Renamed");
}

#[tokio::test]
async fn test_update_to_taken_email_rejected() {
    let manager = create_test_manager();
    manager.register(register_request("a@x.com", "p1", "Alice")).await.unwrap();
    let bob = manager.register(register_request("b@x.com", "p2", "Bob")).await.unwrap();
    let actor = Actor::from(&bob);

    let update = profile_update("p2", "Bob", "a@x.com");
    let result = manager.update_profile(&actor, bob.id, update).await;
    assert!(matches!(result.unwrap_err(), Error::AlreadyExists { .. }));

    assert_eq!(manager.get_account(bob.id).await.unwrap().email, "b@x.com");
}

#[tokio::test]
async fn test_update_unknown_account() {
    let manager = create_test_manager();
    let actor = Actor::new(1, Role::User);

    let result = manager.update_profile(&actor, 424242, profile_update("p", "N", "e@x.com")).await;
    assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_unknown_account() {
    let manager = create_test_manager();
    let actor = Actor::new(1, Role::Admin);

    let result = manager.delete_account(&actor, 424242).await;
    assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_twice_fails_the_second_time() {
    let manager = create_test_manager();
    let account =
        manager.register(register_request("a@x.com", "p1", "Alice")).await.unwrap();
    let actor = Actor::from(&account);

    manager.delete_account(&actor, account.id).await.unwrap();

    let result = manager.delete_account(&actor, account.id).await;
    assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

    // Deletion is terminal: lookups fail and the email is free again
    assert!(manager.get_account(account.id).await.is_err());
    assert!(manager.authenticate_lookup("a@x.com").await.is_err());
    manager.register(register_request("a@x.com", "p3", "Alice II")).await.unwrap();
}

// ---------------------------------------------------------------------------
// Administrative search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_search_with_no_matches_returns_empty_page() {
    let manager = create_test_manager();
    manager.register(register_request("a@x.com", "p1", "Alice")).await.unwrap();
    let admin = Actor::new(999, Role::Admin);

    let filter = AccountSearchFilter::builder().name("does-not-exist".to_string()).build();
    let page = manager.search_admin_page(&admin, &filter, PageRequest::default()).await.unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.pagination.total, 0);
    assert!(!page.pagination.has_more);
}

#[tokio::test]
async fn test_search_is_deterministic_and_ordered_by_id() {
    let manager = create_test_manager();
    let admin = Actor::new(999, Role::Admin);

    for i in 0..5 {
        manager
            .register(register_request(&format!("user{i}@x.com"), "p1", &format!("User {i}")))
            .await
            .unwrap();
    }

    let request = PageRequest::new(0, 3);
    let first = manager
        .search_admin_page(&admin, &AccountSearchFilter::default(), request)
        .await
        .unwrap();
    let second = manager
        .search_admin_page(&admin, &AccountSearchFilter::default(), request)
        .await
        .unwrap();

    let first_ids: Vec<i64> = first.items.iter().map(|a| a.id).collect();
    let second_ids: Vec<i64> = second.items.iter().map(|a| a.id).collect();
    assert_eq!(first_ids, second_ids);
    assert!(first_ids.windows(2).all(|w| w[0] < w[1]));

    assert_eq!(first.pagination.total, 5);
    assert_eq!(first.pagination.total_pages, 2);
    assert!(first.pagination.has_more);
}

#[tokio::test]
async fn test_search_filters_by_email_substring() {
    let manager = create_test_manager();
    let admin = Actor::new(999, Role::Admin);

    manager.register(register_request("alice@first.com", "p1", "Alice")).await.unwrap();
    manager.register(register_request("bob@second.com", "p1", "Bob")).await.unwrap();

    let filter = AccountSearchFilter::builder().email("first.com".to_string()).build();
    let page = manager.search_admin_page(&admin, &filter, PageRequest::default()).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].email, "alice@first.com");
}

// ---------------------------------------------------------------------------
// End-to-end lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_full_lifecycle() {
    let manager = create_test_manager();

    // Register
    let account = manager
        .register(register_request("a@x.com", "p1", "A"))
        .await
        .unwrap();

    // Authentication lookup returns a USER principal
    let principal = manager.authenticate_lookup("a@x.com").await.unwrap();
    assert_eq!(principal.role, Role::User);

    // Credential verification
    assert!(manager.verify_password(account.id, "p1").await.unwrap());
    assert!(!manager.verify_password(account.id, "wrong").await.unwrap());

    // The account shows up in the admin listing
    let admin = Actor::new(999, Role::Admin);
    let page = manager
        .search_admin_page(&admin, &AccountSearchFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert!(page.items.iter().any(|a| a.id == account.id));

    // Delete, then everything about it is gone
    let actor = Actor::from(&account);
    manager.delete_account(&actor, account.id).await.unwrap();

    assert!(matches!(
        manager.verify_password(account.id, "p1").await.unwrap_err(),
        Error::NotFound { .. }
    ));
    let page = manager
        .search_admin_page(&admin, &AccountSearchFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 0);
}
