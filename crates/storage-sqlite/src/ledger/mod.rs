//! SQLite storage implementation for the installment ledger.

mod model;
mod repository;

pub use model::InstallmentDB;
pub use repository::LedgerRepository;

pub(crate) use repository::load_history_with;
