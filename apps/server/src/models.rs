use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use kepengen_core::accounts as core_accounts;
use kepengen_core::goals::{self as core_goals, FundingStatus};
use kepengen_core::identity::{Identity, Role};
use kepengen_core::ledger as core_ledger;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub id: String,
    pub email: String,
    pub username: String,
    #[schema(value_type = String, example = "user")]
    pub role: Role,
    pub created_at: NaiveDateTime,
}

impl From<core_accounts::Account> for AccountDto {
    fn from(a: core_accounts::Account) -> Self {
        Self {
            id: a.id,
            email: a.email,
            username: a.username,
            role: a.role,
            created_at: a.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdateRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    #[schema(value_type = Option<String>, example = "admin")]
    pub role: Option<Role>,
}

impl From<AccountUpdateRequest> for core_accounts::AccountUpdate {
    fn from(r: AccountUpdateRequest) -> Self {
        Self {
            email: r.email,
            username: r.username,
            role: r.role,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IdentityDto {
    pub user_id: String,
    #[schema(value_type = String, example = "user")]
    pub role: Role,
}

impl From<Identity> for IdentityDto {
    fn from(i: Identity) -> Self {
        Self {
            user_id: i.user_id,
            role: i.role,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub account: AccountDto,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Goal as served to clients, with the derived funding figures.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalDto {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: i64,
    pub collected_amount: i64,
    pub image_ref: Option<String>,
    pub created_at: NaiveDateTime,
    #[schema(value_type = String, example = "IN_PROGRESS")]
    pub funding_status: FundingStatus,
    #[schema(value_type = f64, example = 70.0)]
    pub progress_percent: Decimal,
    pub remaining_amount: i64,
}

impl From<core_goals::Goal> for GoalDto {
    fn from(g: core_goals::Goal) -> Self {
        let funding_status = g.funding_status();
        let progress_percent = g.progress_percent();
        let remaining_amount = g.remaining_amount();
        Self {
            id: g.id,
            owner_id: g.owner_id,
            name: g.name,
            description: g.description,
            target_amount: g.target_amount,
            collected_amount: g.collected_amount,
            image_ref: g.image_ref,
            created_at: g.created_at,
            funding_status,
            progress_percent,
            remaining_amount,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalDetailDto {
    #[serde(flatten)]
    pub goal: GoalDto,
    pub history: Vec<InstallmentDto>,
}

impl From<core_goals::GoalDetail> for GoalDetailDto {
    fn from(d: core_goals::GoalDetail) -> Self {
        Self {
            goal: GoalDto::from(d.goal),
            history: d.history.into_iter().map(InstallmentDto::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentDto {
    pub id: String,
    pub goal_id: String,
    pub amount: i64,
    pub created_at: NaiveDateTime,
}

impl From<core_ledger::Installment> for InstallmentDto {
    fn from(i: core_ledger::Installment) -> Self {
        Self {
            id: i.id,
            goal_id: i.goal_id,
            amount: i.amount,
            created_at: i.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoalRequest {
    pub name: String,
    pub description: Option<String>,
    pub target_amount: i64,
    pub image_ref: Option<String>,
}

impl From<NewGoalRequest> for core_goals::NewGoal {
    fn from(r: NewGoalRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            target_amount: r.target_amount,
            image_ref: r.image_ref,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdateRequest {
    pub name: String,
    pub description: Option<String>,
    pub target_amount: i64,
}

impl From<GoalUpdateRequest> for core_goals::GoalUpdate {
    fn from(r: GoalUpdateRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            target_amount: r.target_amount,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy)]
pub struct InstallmentRequest {
    pub amount: i64,
}

impl From<InstallmentRequest> for core_ledger::NewInstallment {
    fn from(r: InstallmentRequest) -> Self {
        Self { amount: r.amount }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalsSummaryDto {
    pub total_goals: usize,
    pub funded_goals: usize,
    pub total_collected: i64,
    pub total_target: i64,
}

impl From<core_goals::GoalsSummary> for GoalsSummaryDto {
    fn from(s: core_goals::GoalsSummary) -> Self {
        Self {
            total_goals: s.total_goals,
            funded_goals: s.funded_goals,
            total_collected: s.total_collected,
            total_target: s.total_target,
        }
    }
}
