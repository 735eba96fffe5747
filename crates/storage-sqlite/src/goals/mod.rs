//! SQLite storage implementation for goals.

mod model;
mod repository;

pub use model::{GoalChangesetDB, GoalDB, NewGoalDB};
pub use repository::GoalRepository;

pub(crate) use repository::find_owned_goal;
