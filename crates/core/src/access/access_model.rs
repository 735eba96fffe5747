//! Access guard domain models.

use serde::Serialize;

use crate::errors::{Error, Result};

/// Every action that passes through the access guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    CreateGoal,
    ReadGoal,
    ListGoals,
    UpdateGoal,
    DeleteGoal,
    AppendInstallment,
    ReadHistory,
    ListAccounts,
    ReadAccount,
    UpdateAccount,
    DeleteAccount,
}

impl Operation {
    pub const ALL: [Operation; 11] = [
        Operation::CreateGoal,
        Operation::ReadGoal,
        Operation::ListGoals,
        Operation::UpdateGoal,
        Operation::DeleteGoal,
        Operation::AppendInstallment,
        Operation::ReadHistory,
        Operation::ListAccounts,
        Operation::ReadAccount,
        Operation::UpdateAccount,
        Operation::DeleteAccount,
    ];

    /// Account directory operations are reserved to admins.
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Operation::ListAccounts
                | Operation::ReadAccount
                | Operation::UpdateAccount
                | Operation::DeleteAccount
        )
    }

    /// Goal and installment operations only apply to the caller's own data.
    pub fn is_owner_scoped(&self) -> bool {
        !self.requires_admin()
    }
}

/// Why the guard refused an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenyReason {
    Unauthenticated,
    Forbidden,
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    /// Converts a denial into the matching typed error.
    pub fn into_result(self) -> Result<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(DenyReason::Unauthenticated) => Err(Error::Unauthenticated),
            Decision::Deny(DenyReason::Forbidden) => Err(Error::Forbidden(
                "Operation is not permitted".to_string(),
            )),
        }
    }
}
