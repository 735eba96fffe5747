use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use kepengen_core::accounts::{
    Account, AccountCredentials, AccountRepositoryTrait, AccountUpdate, NewAccount,
};
use kepengen_core::errors::{Error, Result};

use super::model::{AccountChangesetDB, AccountDB, NewAccountDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::accounts::dsl::*;
use crate::schema::{accounts, goals, installments};

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn find_account(conn: &mut SqliteConnection, account_id: &str) -> Result<Account> {
    accounts
        .select(AccountDB::as_select())
        .find(account_id)
        .first::<AccountDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::NotFound(format!("Account {}", account_id)))?
        .try_into()
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        self.writer
            .exec(move |conn| {
                let account_db =
                    NewAccountDB::from_domain(Uuid::now_v7().to_string(), new_account);

                diesel::insert_into(accounts::table)
                    .values(&account_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                find_account(conn, &account_db.id)
            })
            .await
    }

    async fn update(&self, account_id: &str, account_update: AccountUpdate) -> Result<Account> {
        let account_id = account_id.to_string();
        let changeset: AccountChangesetDB = account_update.into();

        self.writer
            .exec(move |conn| {
                let affected = diesel::update(accounts.find(&account_id))
                    .set(&changeset)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("Account {}", account_id)));
                }
                find_account(conn, &account_id)
            })
            .await
    }

    async fn delete(&self, account_id: &str) -> Result<usize> {
        let account_id = account_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(installments::table.filter(installments::owner_id.eq(&account_id)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::delete(goals::table.filter(goals::owner_id.eq(&account_id)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let affected_rows = diesel::delete(accounts.find(&account_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected_rows)
            })
            .await
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;
        find_account(&mut conn, account_id)
    }

    fn get_credentials_by_email(&self, email_param: &str) -> Result<AccountCredentials> {
        let mut conn = get_connection(&self.pool)?;

        accounts
            .select(AccountDB::as_select())
            .filter(email.eq(email_param))
            .first::<AccountDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound("Account".to_string()))?
            .try_into()
    }

    fn list(&self) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        accounts
            .select(AccountDB::as_select())
            .order((created_at.desc(), id.desc()))
            .load::<AccountDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }
}
