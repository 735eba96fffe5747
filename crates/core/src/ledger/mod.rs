//! Ledger module - append-only installment history and the collected aggregate.

mod ledger_model;
mod ledger_service;
mod ledger_service_tests;
mod ledger_traits;

pub use ledger_model::{Installment, NewInstallment};
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
