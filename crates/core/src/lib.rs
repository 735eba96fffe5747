//! Kepengen Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules for savings goals: the access
//! guard, the goal store, the installment ledger and the account directory.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod access;
pub mod accounts;
pub mod errors;
pub mod goals;
pub mod identity;
pub mod ledger;

#[cfg(test)]
mod testing;

// Re-export error types
pub use errors::Error;
pub use errors::ErrorKind;
pub use errors::Result;
