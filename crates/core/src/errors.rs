//! Core error types for Kepengen.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use serde::Serialize;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure categories surfaced to callers of the core.
///
/// The boundary layer maps these to user-visible responses. Only
/// `StoreUnavailable` and `Conflict` are safe to retry. `Internal` marks a
/// broken invariant inside the process and is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Unauthenticated,
    Forbidden,
    NotFound,
    InvalidInput,
    StoreUnavailable,
    Conflict,
    Internal,
}

/// Root error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The target is absent or owned by someone else. The two cases are
    /// deliberately reported the same way.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Concurrent update collision: {0}")]
    Conflict(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Classifies this error into the caller-facing taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Unauthenticated => ErrorKind::Unauthenticated,
            Error::Forbidden(_) => ErrorKind::Forbidden,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Validation(_) => ErrorKind::InvalidInput,
            Error::Conflict(_) => ErrorKind::Conflict,
            Error::Database(db) => match db {
                DatabaseError::NotFound(_) => ErrorKind::NotFound,
                DatabaseError::UniqueViolation(_) | DatabaseError::ForeignKeyViolation(_) => {
                    ErrorKind::InvalidInput
                }
                DatabaseError::Busy(_) => ErrorKind::Conflict,
                _ => ErrorKind::StoreUnavailable,
            },
            Error::Unexpected(_) => ErrorKind::Internal,
        }
    }

    /// Whether the caller may safely retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::StoreUnavailable | ErrorKind::Conflict
        )
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(message.into()))
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate email).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// The store was locked by another writer past the busy timeout.
    #[error("Database busy: {0}")]
    Busy(String),

    /// A storage call did not complete within its deadline.
    #[error("Database operation timed out after {0} ms")]
    Timeout(u64),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}

/// Validation errors for caller-supplied fields.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping_for_database_errors() {
        let not_found = Error::Database(DatabaseError::NotFound("goal".into()));
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert!(!not_found.is_retryable());

        let busy = Error::Database(DatabaseError::Busy("database is locked".into()));
        assert_eq!(busy.kind(), ErrorKind::Conflict);
        assert!(busy.is_retryable());

        let timeout = Error::Database(DatabaseError::Timeout(5000));
        assert_eq!(timeout.kind(), ErrorKind::StoreUnavailable);
        assert!(timeout.is_retryable());

        let dup = Error::Database(DatabaseError::UniqueViolation("accounts.email".into()));
        assert_eq!(dup.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_terminal_kinds_are_not_retryable() {
        assert!(!Error::Unauthenticated.is_retryable());
        assert!(!Error::Forbidden("admin only".into()).is_retryable());
        assert!(!Error::invalid_input("name").is_retryable());
        assert_eq!(
            Error::Validation(ValidationError::NonPositiveAmount(0)).kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_unexpected_is_internal_and_terminal() {
        let err = Error::Unexpected("writer returned the wrong type".into());
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(!err.is_retryable());
    }
}
