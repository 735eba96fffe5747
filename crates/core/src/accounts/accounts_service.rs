use log::{debug, info};
use std::sync::Arc;

use super::accounts_model::{Account, AccountCredentials, AccountUpdate, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::access::{ensure_authorized, Operation};
use crate::errors::{Error, Result};
use crate::identity::Identity;

/// Service for managing accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    async fn register_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        let normalized = NewAccount {
            email: new_account.email.trim().to_lowercase(),
            username: new_account.username.trim().to_string(),
            password_credential: new_account.password_credential,
        };
        debug!("Registering account for {}", normalized.email);
        self.repository.create(normalized).await
    }

    fn find_credentials(&self, email: &str) -> Result<AccountCredentials> {
        self.repository
            .get_credentials_by_email(&email.trim().to_lowercase())
    }

    fn list_accounts(&self, identity: Option<&Identity>) -> Result<Vec<Account>> {
        ensure_authorized(identity, Operation::ListAccounts, None)?;
        self.repository.list()
    }

    fn get_account(&self, identity: Option<&Identity>, account_id: &str) -> Result<Account> {
        ensure_authorized(identity, Operation::ReadAccount, None)?;
        self.repository.get_by_id(account_id)
    }

    async fn update_account(
        &self,
        identity: Option<&Identity>,
        account_id: &str,
        account_update: AccountUpdate,
    ) -> Result<Account> {
        ensure_authorized(identity, Operation::UpdateAccount, None)?;
        account_update.validate()?;
        let normalized = AccountUpdate {
            email: account_update.email.map(|e| e.trim().to_lowercase()),
            username: account_update.username.map(|u| u.trim().to_string()),
            role: account_update.role,
        };
        self.repository.update(account_id, normalized).await
    }

    async fn delete_account(&self, identity: Option<&Identity>, account_id: &str) -> Result<()> {
        ensure_authorized(identity, Operation::DeleteAccount, None)?;
        let deleted = self.repository.delete(account_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Account {}", account_id)));
        }
        info!("Deleted account {} and its goals", account_id);
        Ok(())
    }
}
