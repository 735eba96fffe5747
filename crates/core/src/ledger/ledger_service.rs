use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::ledger_model::{Installment, NewInstallment};
use super::ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
use crate::access::{ensure_authorized, Operation};
use crate::errors::Result;
use crate::goals::Goal;
use crate::identity::Identity;

/// Service recording installments against goals
pub struct LedgerService {
    repository: Arc<dyn LedgerRepositoryTrait>,
}

impl LedgerService {
    pub fn new(repository: Arc<dyn LedgerRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl LedgerServiceTrait for LedgerService {
    async fn append_installment(
        &self,
        identity: Option<&Identity>,
        goal_id: &str,
        owner_id: &str,
        installment: NewInstallment,
    ) -> Result<Goal> {
        ensure_authorized(identity, Operation::AppendInstallment, Some(owner_id))?;
        installment.validate()?;

        let goal = self
            .repository
            .append_installment(goal_id, owner_id, installment.amount)
            .await?;
        debug!(
            "Appended installment of {} to goal {}, collected now {}",
            installment.amount, goal.id, goal.collected_amount
        );
        Ok(goal)
    }

    fn get_history(
        &self,
        identity: Option<&Identity>,
        goal_id: &str,
        owner_id: &str,
    ) -> Result<Vec<Installment>> {
        ensure_authorized(identity, Operation::ReadHistory, Some(owner_id))?;
        self.repository.load_history(goal_id, owner_id)
    }
}
