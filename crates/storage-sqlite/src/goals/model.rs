//! Database models for goals.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::accounts::AccountDB;
use kepengen_core::goals::{Goal, GoalUpdate, NewGoal};

/// Database model for goals
#[derive(Queryable, Identifiable, Associations, Selectable, PartialEq, Debug, Clone)]
#[diesel(belongs_to(AccountDB, foreign_key = owner_id))]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: i64,
    pub collected_amount: i64,
    pub image_ref: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a new goal
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
pub struct NewGoalDB {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: i64,
    pub collected_amount: i64,
    pub image_ref: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Editable columns. `collected_amount` only moves through the ledger.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(treat_none_as_null = true)]
pub struct GoalChangesetDB {
    pub name: String,
    pub description: Option<String>,
    pub target_amount: i64,
}

impl NewGoalDB {
    pub fn from_domain(id: String, owner_id: &str, domain: NewGoal) -> Self {
        Self {
            id,
            owner_id: owner_id.to_string(),
            name: domain.name,
            description: domain.description,
            target_amount: domain.target_amount,
            collected_amount: 0,
            image_ref: domain.image_ref,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

// Conversion to domain models
impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            id: db.id,
            owner_id: db.owner_id,
            name: db.name,
            description: db.description,
            target_amount: db.target_amount,
            collected_amount: db.collected_amount,
            image_ref: db.image_ref,
            created_at: db.created_at,
        }
    }
}

impl From<GoalUpdate> for GoalChangesetDB {
    fn from(domain: GoalUpdate) -> Self {
        Self {
            name: domain.name,
            description: domain.description,
            target_amount: domain.target_amount,
        }
    }
}
