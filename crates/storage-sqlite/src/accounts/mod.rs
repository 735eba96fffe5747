//! SQLite storage implementation for the account directory.

mod model;
mod repository;

pub use model::{AccountChangesetDB, AccountDB, NewAccountDB};
pub use repository::AccountRepository;
