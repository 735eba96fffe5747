//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::accounts_model::{Account, AccountCredentials, AccountUpdate, NewAccount};
use crate::errors::Result;
use crate::identity::Identity;

/// Trait defining the contract for Account repository operations.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Creates a new account with the `user` role.
    async fn create(&self, new_account: NewAccount) -> Result<Account>;

    /// Applies the supplied fields of an admin update.
    async fn update(&self, account_id: &str, account_update: AccountUpdate) -> Result<Account>;

    /// Deletes an account together with its goals and installments.
    ///
    /// Returns the number of deleted account records.
    async fn delete(&self, account_id: &str) -> Result<usize>;

    /// Retrieves an account by its ID.
    fn get_by_id(&self, account_id: &str) -> Result<Account>;

    /// Retrieves the login projection for an email address.
    fn get_credentials_by_email(&self, email: &str) -> Result<AccountCredentials>;

    /// Lists all accounts, newest first.
    fn list(&self) -> Result<Vec<Account>>;
}

/// Trait defining the contract for Account service operations.
///
/// Directory operations are admin-only; registration and credential lookup
/// back the unauthenticated login flow.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Registers a new account with business validation.
    async fn register_account(&self, new_account: NewAccount) -> Result<Account>;

    /// Looks up credentials for the login flow.
    fn find_credentials(&self, email: &str) -> Result<AccountCredentials>;

    /// Lists every account (admin only).
    fn list_accounts(&self, identity: Option<&Identity>) -> Result<Vec<Account>>;

    /// Retrieves an account by ID (admin only).
    fn get_account(&self, identity: Option<&Identity>, account_id: &str) -> Result<Account>;

    /// Updates email, username or role of an account (admin only).
    async fn update_account(
        &self,
        identity: Option<&Identity>,
        account_id: &str,
        account_update: AccountUpdate,
    ) -> Result<Account>;

    /// Deletes an account and everything it owns (admin only).
    async fn delete_account(&self, identity: Option<&Identity>, account_id: &str) -> Result<()>;
}
