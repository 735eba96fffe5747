//! Goals module - domain models, services, and traits.

mod goals_model;
mod goals_service;
mod goals_traits;

pub use goals_model::{FundingStatus, Goal, GoalDetail, GoalUpdate, GoalsSummary, NewGoal};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
