use async_trait::async_trait;

use super::ledger_model::{Installment, NewInstallment};
use crate::errors::Result;
use crate::goals::Goal;
use crate::identity::Identity;

/// Trait for ledger repository operations.
#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Atomically adds `amount` to the goal's collected aggregate and appends
    /// the matching installment row.
    ///
    /// Implementations must evaluate the increment in the store (never a
    /// client-side read-modify-write) and commit both writes or neither.
    /// Returns the goal as it stands after the commit. An increment that
    /// would overflow the aggregate fails with `InvalidInput` and records
    /// nothing.
    async fn append_installment(&self, goal_id: &str, owner_id: &str, amount: i64) -> Result<Goal>;

    /// Installments of one goal, newest first.
    fn load_history(&self, goal_id: &str, owner_id: &str) -> Result<Vec<Installment>>;
}

/// Trait for ledger service operations.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    async fn append_installment(
        &self,
        identity: Option<&Identity>,
        goal_id: &str,
        owner_id: &str,
        installment: NewInstallment,
    ) -> Result<Goal>;

    fn get_history(
        &self,
        identity: Option<&Identity>,
        goal_id: &str,
        owner_id: &str,
    ) -> Result<Vec<Installment>>;
}
