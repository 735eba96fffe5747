//! Database models for installments.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::goals::GoalDB;
use kepengen_core::ledger::Installment;

/// Database model for installments. Rows are never updated.
#[derive(Queryable, Insertable, Identifiable, Associations, Selectable, PartialEq, Debug, Clone)]
#[diesel(belongs_to(GoalDB, foreign_key = goal_id))]
#[diesel(table_name = crate::schema::installments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InstallmentDB {
    pub id: String,
    pub goal_id: String,
    pub owner_id: String,
    pub amount: i64,
    pub created_at: NaiveDateTime,
}

impl From<InstallmentDB> for Installment {
    fn from(db: InstallmentDB) -> Self {
        Self {
            id: db.id,
            goal_id: db.goal_id,
            owner_id: db.owner_id,
            amount: db.amount,
            created_at: db.created_at,
        }
    }
}
