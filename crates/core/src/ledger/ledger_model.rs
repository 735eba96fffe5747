//! Ledger domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// One immutable contribution toward a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub id: String,
    pub goal_id: String,
    pub owner_id: String,
    pub amount: i64,
    pub created_at: NaiveDateTime,
}

/// Input model for appending an installment
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct NewInstallment {
    pub amount: i64,
}

impl NewInstallment {
    pub fn validate(&self) -> Result<()> {
        if self.amount <= 0 {
            return Err(Error::Validation(ValidationError::NonPositiveAmount(
                self.amount,
            )));
        }
        Ok(())
    }
}
