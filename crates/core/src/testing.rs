//! In-memory repositories shared by the service tests.

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Utc};
use std::sync::Mutex;

use crate::accounts::{
    Account, AccountCredentials, AccountRepositoryTrait, AccountUpdate, NewAccount,
};
use crate::errors::{DatabaseError, Error, Result};
use crate::goals::{Goal, GoalDetail, GoalRepositoryTrait, GoalUpdate, NewGoal};
use crate::identity::Role;
use crate::ledger::{Installment, LedgerRepositoryTrait};

#[derive(Default)]
struct State {
    seq: i64,
    accounts: Vec<(Account, String)>,
    goals: Vec<Goal>,
    installments: Vec<Installment>,
}

impl State {
    fn next(&mut self) -> (i64, NaiveDateTime) {
        self.seq += 1;
        let base = NaiveDateTime::parse_from_str("2024-01-01 00:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap_or_else(|_| Utc::now().naive_utc());
        (self.seq, base + Duration::seconds(self.seq))
    }

    fn goal_mut(&mut self, goal_id: &str, owner_id: &str) -> Result<&mut Goal> {
        self.goals
            .iter_mut()
            .find(|g| g.id == goal_id && g.owner_id == owner_id)
            .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))
    }
}

/// One lock guards all relations, so every write is atomic.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn installment_count(&self, goal_id: &str) -> usize {
        let state = self.state.lock().unwrap();
        state
            .installments
            .iter()
            .filter(|i| i.goal_id == goal_id)
            .count()
    }

    pub fn goal_count(&self, owner_id: &str) -> usize {
        let state = self.state.lock().unwrap();
        state.goals.iter().filter(|g| g.owner_id == owner_id).count()
    }
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryStore {
    fn load_goals(&self, owner_id: &str) -> Result<Vec<Goal>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .goals
            .iter()
            .rev()
            .filter(|g| g.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn load_goal_detail(&self, goal_id: &str, owner_id: &str) -> Result<GoalDetail> {
        let goal = self
            .load_goals(owner_id)?
            .into_iter()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))?;
        let history = self.load_history(goal_id, owner_id)?;
        Ok(GoalDetail { goal, history })
    }

    async fn insert_new_goal(&self, owner_id: &str, new_goal: NewGoal) -> Result<Goal> {
        let mut state = self.state.lock().unwrap();
        let (seq, created_at) = state.next();
        let goal = Goal {
            id: format!("goal-{}", seq),
            owner_id: owner_id.to_string(),
            name: new_goal.name,
            description: new_goal.description,
            target_amount: new_goal.target_amount,
            collected_amount: 0,
            image_ref: new_goal.image_ref,
            created_at,
        };
        state.goals.push(goal.clone());
        Ok(goal)
    }

    async fn update_goal(&self, goal_id: &str, owner_id: &str, update: GoalUpdate) -> Result<Goal> {
        let mut state = self.state.lock().unwrap();
        let goal = state.goal_mut(goal_id, owner_id)?;
        goal.name = update.name;
        goal.description = update.description;
        goal.target_amount = update.target_amount;
        Ok(goal.clone())
    }

    async fn delete_goal(&self, goal_id: &str, owner_id: &str) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.goals.len();
        state
            .goals
            .retain(|g| !(g.id == goal_id && g.owner_id == owner_id));
        let deleted = before - state.goals.len();
        if deleted > 0 {
            state.installments.retain(|i| i.goal_id != goal_id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl LedgerRepositoryTrait for InMemoryStore {
    async fn append_installment(&self, goal_id: &str, owner_id: &str, amount: i64) -> Result<Goal> {
        // Let concurrent callers interleave before taking the lock.
        tokio::task::yield_now().await;
        let mut state = self.state.lock().unwrap();
        let (seq, created_at) = state.next();
        let goal = state.goal_mut(goal_id, owner_id)?;
        goal.collected_amount = goal
            .collected_amount
            .checked_add(amount)
            .ok_or_else(|| Error::invalid_input("Installment would overflow"))?;
        let updated = goal.clone();
        state.installments.push(Installment {
            id: format!("inst-{}", seq),
            goal_id: goal_id.to_string(),
            owner_id: owner_id.to_string(),
            amount,
            created_at,
        });
        Ok(updated)
    }

    fn load_history(&self, goal_id: &str, owner_id: &str) -> Result<Vec<Installment>> {
        let state = self.state.lock().unwrap();
        if !state
            .goals
            .iter()
            .any(|g| g.id == goal_id && g.owner_id == owner_id)
        {
            return Err(Error::NotFound(format!("Goal {}", goal_id)));
        }
        Ok(state
            .installments
            .iter()
            .rev()
            .filter(|i| i.goal_id == goal_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AccountRepositoryTrait for InMemoryStore {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        let mut state = self.state.lock().unwrap();
        if state.accounts.iter().any(|(a, _)| a.email == new_account.email) {
            return Err(Error::Database(DatabaseError::UniqueViolation(
                "accounts.email".to_string(),
            )));
        }
        let (seq, created_at) = state.next();
        let account = Account {
            id: format!("user-{}", seq),
            email: new_account.email,
            username: new_account.username,
            role: Role::User,
            created_at,
        };
        state
            .accounts
            .push((account.clone(), new_account.password_credential));
        Ok(account)
    }

    async fn update(&self, account_id: &str, account_update: AccountUpdate) -> Result<Account> {
        let mut state = self.state.lock().unwrap();
        let (account, _) = state
            .accounts
            .iter_mut()
            .find(|(a, _)| a.id == account_id)
            .ok_or_else(|| Error::NotFound(format!("Account {}", account_id)))?;
        if let Some(email) = account_update.email {
            account.email = email;
        }
        if let Some(username) = account_update.username {
            account.username = username;
        }
        if let Some(role) = account_update.role {
            account.role = role;
        }
        Ok(account.clone())
    }

    async fn delete(&self, account_id: &str) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.accounts.len();
        state.accounts.retain(|(a, _)| a.id != account_id);
        let deleted = before - state.accounts.len();
        if deleted > 0 {
            state.installments.retain(|i| i.owner_id != account_id);
            state.goals.retain(|g| g.owner_id != account_id);
        }
        Ok(deleted)
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let state = self.state.lock().unwrap();
        state
            .accounts
            .iter()
            .find(|(a, _)| a.id == account_id)
            .map(|(a, _)| a.clone())
            .ok_or_else(|| Error::NotFound(format!("Account {}", account_id)))
    }

    fn get_credentials_by_email(&self, email: &str) -> Result<AccountCredentials> {
        let state = self.state.lock().unwrap();
        state
            .accounts
            .iter()
            .find(|(a, _)| a.email == email)
            .map(|(a, hash)| AccountCredentials {
                account: a.clone(),
                password_credential: hash.clone(),
            })
            .ok_or_else(|| Error::NotFound("Account".to_string()))
    }

    fn list(&self) -> Result<Vec<Account>> {
        let state = self.state.lock().unwrap();
        Ok(state.accounts.iter().rev().map(|(a, _)| a.clone()).collect())
    }
}
