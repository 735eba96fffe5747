//! Goals domain models.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::ledger::Installment;

/// Derived funding state of a goal. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundingStatus {
    Unfunded,
    InProgress,
    Funded,
}

/// Domain model representing a savings goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: i64,
    /// Cached sum of the goal's installments.
    pub collected_amount: i64,
    /// Opaque reference to an image held by the blob store.
    pub image_ref: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Goal {
    pub fn funding_status(&self) -> FundingStatus {
        if self.collected_amount <= 0 {
            FundingStatus::Unfunded
        } else if self.collected_amount >= self.target_amount {
            FundingStatus::Funded
        } else {
            FundingStatus::InProgress
        }
    }

    /// Collected share of the target as a percentage, capped at 100 and
    /// rounded to two decimal places.
    pub fn progress_percent(&self) -> Decimal {
        if self.target_amount <= 0 {
            return Decimal::ZERO;
        }
        let ratio = Decimal::from(self.collected_amount) * Decimal::ONE_HUNDRED
            / Decimal::from(self.target_amount);
        ratio
            .min(Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Amount still missing to reach the target; zero once funded.
    pub fn remaining_amount(&self) -> i64 {
        (self.target_amount - self.collected_amount).max(0)
    }
}

/// A goal together with its installment history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalDetail {
    #[serde(flatten)]
    pub goal: Goal,
    pub history: Vec<Installment>,
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub description: Option<String>,
    pub target_amount: i64,
    pub image_ref: Option<String>,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_target(self.target_amount)
    }
}

/// Input model for updating the editable fields of a goal.
///
/// `collected_amount` is deliberately absent: it only moves through the
/// ledger.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub name: String,
    pub description: Option<String>,
    pub target_amount: i64,
}

impl GoalUpdate {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_target(self.target_amount)
    }
}

/// Dashboard statistics over one owner's goals.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GoalsSummary {
    pub total_goals: usize,
    pub funded_goals: usize,
    pub total_collected: i64,
    pub total_target: i64,
}

impl GoalsSummary {
    pub fn from_goals(goals: &[Goal]) -> Self {
        goals.iter().fold(Self::default(), |mut acc, goal| {
            acc.total_goals += 1;
            if goal.funding_status() == FundingStatus::Funded {
                acc.funded_goals += 1;
            }
            acc.total_collected = acc.total_collected.saturating_add(goal.collected_amount);
            acc.total_target = acc.total_target.saturating_add(goal.target_amount);
            acc
        })
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "name".to_string(),
        )));
    }
    Ok(())
}

fn validate_target(target_amount: i64) -> Result<()> {
    if target_amount <= 0 {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Target amount must be greater than zero, got {}",
            target_amount
        ))));
    }
    Ok(())
}
