//! Accounts module - user accounts, registration and the admin directory.

mod accounts_model;
mod accounts_service;
mod accounts_service_tests;
mod accounts_traits;

// Re-export the public interface
pub use accounts_model::{Account, AccountCredentials, AccountUpdate, NewAccount};
pub use accounts_service::AccountService;
pub use accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
