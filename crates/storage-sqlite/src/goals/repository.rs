use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use kepengen_core::goals::{Goal, GoalDetail, GoalRepositoryTrait, GoalUpdate, NewGoal};
use kepengen_core::{Error, Result};

use super::model::{GoalChangesetDB, GoalDB, NewGoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::ledger::load_history_with;
use crate::schema::goals::dsl::*;
use crate::schema::{goals, installments};

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

/// Owner-scoped lookup; a goal held by someone else reads as missing.
pub(crate) fn find_owned_goal(
    conn: &mut SqliteConnection,
    goal_id: &str,
    owner: &str,
) -> Result<Goal> {
    goals
        .select(GoalDB::as_select())
        .filter(id.eq(goal_id))
        .filter(owner_id.eq(owner))
        .first::<GoalDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .map(Goal::from)
        .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn load_goals(&self, owner: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let goals_db = goals
            .select(GoalDB::as_select())
            .filter(owner_id.eq(owner))
            .order((created_at.desc(), id.desc()))
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(goals_db.into_iter().map(Goal::from).collect())
    }

    fn load_goal_detail(&self, goal_id: &str, owner: &str) -> Result<GoalDetail> {
        let mut conn = get_connection(&self.pool)?;
        // One read transaction so the aggregate and the history come from
        // the same snapshot.
        conn.transaction::<_, StorageError, _>(|c| {
            let goal = find_owned_goal(c, goal_id, owner)?;
            let history = load_history_with(c, goal_id)?;
            Ok(GoalDetail { goal, history })
        })
        .map_err(Error::from)
    }

    async fn insert_new_goal(&self, owner: &str, new_goal: NewGoal) -> Result<Goal> {
        let owner = owner.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let new_goal_db =
                    NewGoalDB::from_domain(Uuid::now_v7().to_string(), &owner, new_goal);

                let result_db = diesel::insert_into(goals::table)
                    .values(&new_goal_db)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::from(result_db))
            })
            .await
    }

    async fn update_goal(&self, goal_id: &str, owner: &str, update: GoalUpdate) -> Result<Goal> {
        let goal_id = goal_id.to_string();
        let owner = owner.to_string();
        let changeset: GoalChangesetDB = update.into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let result_db = diesel::update(
                    goals.filter(id.eq(&goal_id)).filter(owner_id.eq(&owner)),
                )
                .set(&changeset)
                .returning(GoalDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?;

                result_db
                    .map(Goal::from)
                    .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))
            })
            .await
    }

    async fn delete_goal(&self, goal_id: &str, owner: &str) -> Result<usize> {
        let goal_id = goal_id.to_string();
        let owner = owner.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let deleted = diesel::delete(
                    goals.filter(id.eq(&goal_id)).filter(owner_id.eq(&owner)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;

                if deleted > 0 {
                    diesel::delete(
                        installments::table.filter(installments::goal_id.eq(&goal_id)),
                    )
                    .execute(conn)
                    .map_err(StorageError::from)?;
                }
                Ok(deleted)
            })
            .await
    }
}
