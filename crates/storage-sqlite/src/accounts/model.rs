//! Database models for accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::str::FromStr;

use kepengen_core::accounts::{Account, AccountCredentials, NewAccount};
use kepengen_core::identity::Role;
use kepengen_core::Error;

/// Database model for accounts
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub email: String,
    pub username: String,
    pub password_credential: String,
    pub role: String,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a new account
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
pub struct NewAccountDB {
    pub id: String,
    pub email: String,
    pub username: String,
    pub password_credential: String,
    pub role: String,
    pub created_at: NaiveDateTime,
}

/// Partial update; `None` columns are left untouched.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::accounts)]
pub struct AccountChangesetDB {
    pub email: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
}

impl NewAccountDB {
    pub fn from_domain(id: String, domain: NewAccount) -> Self {
        Self {
            id,
            email: domain.email,
            username: domain.username,
            password_credential: domain.password_credential,
            role: Role::User.as_str().to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl From<kepengen_core::accounts::AccountUpdate> for AccountChangesetDB {
    fn from(domain: kepengen_core::accounts::AccountUpdate) -> Self {
        Self {
            email: domain.email,
            username: domain.username,
            role: domain.role.map(|r| r.as_str().to_string()),
        }
    }
}

// Conversion implementations
impl TryFrom<AccountDB> for Account {
    type Error = Error;

    fn try_from(db: AccountDB) -> Result<Self, Self::Error> {
        Ok(Self {
            role: Role::from_str(&db.role)?,
            id: db.id,
            email: db.email,
            username: db.username,
            created_at: db.created_at,
        })
    }
}

impl TryFrom<AccountDB> for AccountCredentials {
    type Error = Error;

    fn try_from(mut db: AccountDB) -> Result<Self, Self::Error> {
        let password_credential = std::mem::take(&mut db.password_credential);
        Ok(Self {
            account: Account::try_from(db)?,
            password_credential,
        })
    }
}
