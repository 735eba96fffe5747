//! SQLite storage implementation for Kepengen.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `kepengen-core` and contains:
//! - Database connection pooling and the single-writer actor
//! - Diesel migrations
//! - Repository implementations for accounts, goals and the installment ledger
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//!
//! ```text
//!   kepengen-core (domain, services, traits)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod accounts;
pub mod goals;
pub mod ledger;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, open, run_migrations, spawn_writer, DbConnection, DbPool,
    StoreConfig, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from kepengen-core for convenience
pub use kepengen_core::errors::{DatabaseError, Error, Result};
