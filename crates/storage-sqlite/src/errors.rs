//! Storage-specific error types for SQLite operations.
//!
//! This module provides error types that wrap Diesel-specific errors and convert
//! them to the database-agnostic error types defined in `kepengen_core`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use kepengen_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Storage-specific errors that wrap Diesel and r2d2 types.
///
/// These errors are internal to the storage layer and are converted to
/// `kepengen_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    /// A core error raised inside a write job. Kept intact so its kind
    /// survives the transaction wrapper.
    #[error("{0}")]
    Core(Error),
}

impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::Core(err)
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            // Pool checkout only fails once the connection timeout has elapsed.
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::Database(DatabaseError::UniqueViolation(info.message().to_string())),
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => Error::Database(DatabaseError::ForeignKeyViolation(
                info.message().to_string(),
            )),
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::SerializationFailure,
                info,
            )) => Error::Database(DatabaseError::Busy(info.message().to_string())),
            StorageError::QueryFailed(DieselError::DatabaseError(_, info))
                if is_busy_message(info.message()) =>
            {
                Error::Database(DatabaseError::Busy(info.message().to_string()))
            }
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::Core(e) => e,
        }
    }
}

/// SQLite reports `SQLITE_BUSY` / `SQLITE_LOCKED` through the message only.
fn is_busy_message(message: &str) -> bool {
    message.contains("database is locked") || message.contains("database table is locked")
}

/// Extension trait for easily converting Diesel Results to core Results.
///
/// This provides a `.into_core()` method on any `Result<T, diesel::result::Error>`
/// which handles the conversion through StorageError.
pub trait IntoCore<T> {
    fn into_core(self) -> kepengen_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> kepengen_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> kepengen_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kepengen_core::ErrorKind;

    #[test]
    fn test_not_found_maps_to_not_found_kind() {
        let err: Error = StorageError::from(DieselError::NotFound).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_core_errors_keep_their_kind() {
        let err: Error = StorageError::from(Error::NotFound("Goal g1".to_string())).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err: Error = StorageError::from(Error::invalid_input("bad")).into();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_busy_message_detection() {
        assert!(is_busy_message("database is locked"));
        assert!(!is_busy_message("no such table: goals"));
    }
}
