use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::goals_model::{Goal, GoalDetail, GoalUpdate, GoalsSummary, NewGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::access::{ensure_authorized, Operation};
use crate::errors::{Error, Result};
use crate::identity::Identity;

/// Service for managing goals
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, identity: Option<&Identity>, owner_id: &str) -> Result<Vec<Goal>> {
        ensure_authorized(identity, Operation::ListGoals, Some(owner_id))?;
        self.repository.load_goals(owner_id)
    }

    fn get_goal(
        &self,
        identity: Option<&Identity>,
        goal_id: &str,
        owner_id: &str,
    ) -> Result<GoalDetail> {
        ensure_authorized(identity, Operation::ReadGoal, Some(owner_id))?;
        self.repository.load_goal_detail(goal_id, owner_id)
    }

    fn get_summary(&self, identity: Option<&Identity>, owner_id: &str) -> Result<GoalsSummary> {
        ensure_authorized(identity, Operation::ListGoals, Some(owner_id))?;
        let goals = self.repository.load_goals(owner_id)?;
        Ok(GoalsSummary::from_goals(&goals))
    }

    async fn create_goal(
        &self,
        identity: Option<&Identity>,
        owner_id: &str,
        new_goal: NewGoal,
    ) -> Result<Goal> {
        ensure_authorized(identity, Operation::CreateGoal, Some(owner_id))?;
        new_goal.validate()?;
        debug!("Creating goal '{}' for owner {}", new_goal.name, owner_id);
        self.repository.insert_new_goal(owner_id, new_goal).await
    }

    async fn update_goal(
        &self,
        identity: Option<&Identity>,
        goal_id: &str,
        owner_id: &str,
        update: GoalUpdate,
    ) -> Result<Goal> {
        ensure_authorized(identity, Operation::UpdateGoal, Some(owner_id))?;
        update.validate()?;
        // A target below the collected amount is allowed: goals may be over-funded.
        self.repository.update_goal(goal_id, owner_id, update).await
    }

    async fn delete_goal(
        &self,
        identity: Option<&Identity>,
        goal_id: &str,
        owner_id: &str,
    ) -> Result<()> {
        ensure_authorized(identity, Operation::DeleteGoal, Some(owner_id))?;
        let deleted = self.repository.delete_goal(goal_id, owner_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Goal {}", goal_id)));
        }
        debug!("Deleted goal {} for owner {}", goal_id, owner_id);
        Ok(())
    }
}
