use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use kepengen_core::goals::Goal;
use kepengen_core::ledger::{Installment, LedgerRepositoryTrait};
use kepengen_core::{Error, Result};

use super::model::InstallmentDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::goals::find_owned_goal;
use crate::schema::{goals, installments};

pub struct LedgerRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LedgerRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// History of one goal, newest first. UUIDv7 ids break timestamp ties in
/// insertion order.
pub(crate) fn load_history_with(
    conn: &mut SqliteConnection,
    goal_id: &str,
) -> Result<Vec<Installment>> {
    let rows = installments::table
        .select(InstallmentDB::as_select())
        .filter(installments::goal_id.eq(goal_id))
        .order((installments::created_at.desc(), installments::id.desc()))
        .load::<InstallmentDB>(conn)
        .map_err(StorageError::from)?;
    Ok(rows.into_iter().map(Installment::from).collect())
}

#[async_trait]
impl LedgerRepositoryTrait for LedgerRepository {
    async fn append_installment(&self, goal_id: &str, owner_id: &str, amount: i64) -> Result<Goal> {
        let goal_id = goal_id.to_string();
        let owner_id = owner_id.to_string();

        if amount <= 0 {
            return Err(Error::invalid_input("Installment amount must be positive"));
        }
        let headroom = i64::MAX - amount;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                find_owned_goal(conn, &goal_id, &owner_id)?;

                // The increment is evaluated by SQLite against the current
                // row, never from a value read earlier. SQLite would promote
                // an overflowing sum to REAL, so the row must have headroom.
                let updated = diesel::update(
                    goals::table
                        .filter(goals::id.eq(&goal_id))
                        .filter(goals::owner_id.eq(&owner_id))
                        .filter(goals::collected_amount.le(headroom)),
                )
                .set(goals::collected_amount.eq(goals::collected_amount + amount))
                .execute(conn)
                .map_err(StorageError::from)?;

                if updated == 0 {
                    return Err(Error::invalid_input(format!(
                        "Installment of {} would overflow the collected amount of goal {}",
                        amount, goal_id
                    )));
                }

                let installment = InstallmentDB {
                    id: Uuid::now_v7().to_string(),
                    goal_id: goal_id.clone(),
                    owner_id: owner_id.clone(),
                    amount,
                    created_at: chrono::Utc::now().naive_utc(),
                };
                diesel::insert_into(installments::table)
                    .values(&installment)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                debug!("Recorded installment {} on goal {}", installment.id, goal_id);
                find_owned_goal(conn, &goal_id, &owner_id)
            })
            .await
    }

    fn load_history(&self, goal_id: &str, owner_id: &str) -> Result<Vec<Installment>> {
        let mut conn = get_connection(&self.pool)?;
        conn.transaction::<_, StorageError, _>(|c| {
            find_owned_goal(c, goal_id, owner_id)?;
            Ok(load_history_with(c, goal_id)?)
        })
        .map_err(Error::from)
    }
}
