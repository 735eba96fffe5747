use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalDetail, GoalUpdate, GoalsSummary, NewGoal};
use crate::identity::Identity;
use async_trait::async_trait;

/// Trait for goal repository operations.
///
/// Every lookup is scoped by owner: a goal owned by someone else is reported
/// exactly like a missing one.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Goals of one owner, newest first.
    fn load_goals(&self, owner_id: &str) -> Result<Vec<Goal>>;

    /// Goal plus history, read from a single snapshot so the aggregate and
    /// the history agree.
    fn load_goal_detail(&self, goal_id: &str, owner_id: &str) -> Result<GoalDetail>;

    async fn insert_new_goal(&self, owner_id: &str, new_goal: NewGoal) -> Result<Goal>;

    async fn update_goal(&self, goal_id: &str, owner_id: &str, update: GoalUpdate) -> Result<Goal>;

    /// Deletes the goal and its installment history in one transaction.
    /// Returns the number of deleted goal rows.
    async fn delete_goal(&self, goal_id: &str, owner_id: &str) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self, identity: Option<&Identity>, owner_id: &str) -> Result<Vec<Goal>>;

    fn get_goal(
        &self,
        identity: Option<&Identity>,
        goal_id: &str,
        owner_id: &str,
    ) -> Result<GoalDetail>;

    fn get_summary(&self, identity: Option<&Identity>, owner_id: &str) -> Result<GoalsSummary>;

    async fn create_goal(
        &self,
        identity: Option<&Identity>,
        owner_id: &str,
        new_goal: NewGoal,
    ) -> Result<Goal>;

    async fn update_goal(
        &self,
        identity: Option<&Identity>,
        goal_id: &str,
        owner_id: &str,
        update: GoalUpdate,
    ) -> Result<Goal>;

    async fn delete_goal(
        &self,
        identity: Option<&Identity>,
        goal_id: &str,
        owner_id: &str,
    ) -> Result<()>;
}
