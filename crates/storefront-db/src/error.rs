//! # Database Error Types
//!
//! Error types for store, session and cart persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)          Bad stored row                    │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  DbError (this module) ◄──────── DbError::RowMapping                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ShoppingCartAdaptor → Checkout::calculate → caller (unmodified)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate retries; one failed operation is one error.

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Pool already closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed (syntax error, missing table, ...).
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// NOT NULL / CHECK constraint rejected a row.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// BEGIN / COMMIT / ROLLBACK failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted: no connection freed up within the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A stored row could not be turned back into a domain value.
    ///
    /// ## When This Occurs
    /// - Column missing from the result set
    /// - Column holds the wrong SQLite type
    /// - `type` column holds text that is not a known category
    #[error("Cannot map column '{column}': {reason}")]
    RowMapping { column: String, reason: String },

    /// Any other driver failure (protocol error, crashed worker, ...).
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a RowMapping error for `column`.
    pub fn row_mapping(column: impl Into<String>, reason: impl Into<String>) -> Self {
        DbError::RowMapping {
            column: column.into(),
            reason: reason.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → constraint text? ConstraintViolation : QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// sqlx::Error::ColumnNotFound → DbError::RowMapping
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite reports e.g. "CHECK constraint failed: quantity >= 1"
                if msg.contains("constraint failed") {
                    DbError::ConstraintViolation(msg.to_string())
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::ColumnNotFound(column) => {
                DbError::row_mapping(column, "not present in result set")
            }

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_mapping_message() {
        let err = DbError::row_mapping("type", "unknown category 'FOOD'");
        assert_eq!(
            err.to_string(),
            "Cannot map column 'type': unknown category 'FOOD'"
        );
    }

    #[test]
    fn test_pool_errors_map() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_unclassified_errors_are_internal() {
        let err = DbError::from(sqlx::Error::Protocol("unexpected packet".to_string()));
        assert!(matches!(err, DbError::Internal(ref msg) if msg.contains("unexpected packet")));

        let err = DbError::from(sqlx::Error::WorkerCrashed);
        assert!(matches!(err, DbError::Internal(_)));
    }
}
