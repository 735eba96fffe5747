//! Account domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::identity::{Identity, Role};
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a user account.
///
/// The password credential is never part of this model; see
/// [`AccountCredentials`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
}

impl Account {
    pub fn identity(&self) -> Identity {
        Identity::new(self.id.clone(), self.role)
    }
}

/// Login-only projection carrying the opaque password hash.
#[derive(Debug, Clone)]
pub struct AccountCredentials {
    pub account: Account,
    pub password_credential: String,
}

/// Input model for registering a new account.
///
/// `password_credential` is an already-hashed, opaque string. New accounts
/// always start with [`Role::User`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub password_credential: String,
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        validate_username(&self.username)?;
        if self.password_credential.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "password".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for the admin update of an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub email: Option<String>,
    pub username: Option<String>,
    pub role: Option<Role>,
}

impl AccountUpdate {
    /// Validates the account update data.
    pub fn validate(&self) -> Result<()> {
        if self.email.is_none() && self.username.is_none() && self.role.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "At least one of email, username or role is required".to_string(),
            )));
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(username) = &self.username {
            validate_username(username)?;
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<()> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "email".to_string(),
        )));
    }
    if !trimmed.contains('@') {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "'{}' is not a valid email address",
            trimmed
        ))));
    }
    Ok(())
}

fn validate_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "username".to_string(),
        )));
    }
    Ok(())
}
