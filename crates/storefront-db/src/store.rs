//! # Store and Session Capabilities
//!
//! The persistence seam between repositories and SQLite.
//!
//! ## Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.run_unit_of_work(|session| Box::pin(async move { ... }))        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  acquire ONE connection ──► Session                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  work(&mut session)                                                    │
//! │       │   execute(sql, params)  → opens a transaction on first write   │
//! │       │   query(sql, params)    → Vec<Record>                          │
//! │       │   commit()              → makes writes visible                 │
//! │       ▼                                                                 │
//! │  ALWAYS: roll back anything uncommitted, release the connection        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  work's result, error returned unmodified                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories only ever see [`Store`] and [`Session`], so tests can swap
//! in recording doubles without a database.

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::error::{DbError, DbResult};

// =============================================================================
// Values and Records
// =============================================================================

/// A bound parameter or a column value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    /// SQLite storage class name, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SqlValue::Null => "NULL",
            SqlValue::Integer(_) => "INTEGER",
            SqlValue::Real(_) => "REAL",
            SqlValue::Text(_) => "TEXT",
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

/// One result row, columns in select order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Vec<(String, SqlValue)>,
}

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    /// Builder-style column append.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.push(column, value);
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) {
        self.columns.push((column.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Looks a column up by name (ASCII case-insensitive, like SQLite).
    pub fn get(&self, column: &str) -> DbResult<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value)
            .ok_or_else(|| DbError::row_mapping(column, "not present in result set"))
    }

    pub fn text(&self, column: &str) -> DbResult<&str> {
        match self.get(column)? {
            SqlValue::Text(value) => Ok(value),
            other => Err(wrong_type(column, "TEXT", other)),
        }
    }

    pub fn integer(&self, column: &str) -> DbResult<i64> {
        match self.get(column)? {
            SqlValue::Integer(value) => Ok(*value),
            other => Err(wrong_type(column, "INTEGER", other)),
        }
    }

    /// Reads a decimal column; integral values stored as INTEGER are widened.
    pub fn real(&self, column: &str) -> DbResult<f64> {
        match self.get(column)? {
            SqlValue::Real(value) => Ok(*value),
            SqlValue::Integer(value) => Ok(*value as f64),
            other => Err(wrong_type(column, "REAL", other)),
        }
    }
}

fn wrong_type(column: &str, expected: &str, found: &SqlValue) -> DbError {
    DbError::row_mapping(column, format!("expected {expected}, found {}", found.kind()))
}

// =============================================================================
// Capabilities
// =============================================================================

/// Statement-level access to one connection.
#[async_trait]
pub trait Session: Send {
    /// Runs a write statement and returns the number of affected rows.
    async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> DbResult<u64>;

    /// Runs a query and collects every row.
    async fn query(&mut self, sql: &str, params: &[SqlValue]) -> DbResult<Vec<Record>>;

    /// Commits writes made so far in this session.
    async fn commit(&mut self) -> DbResult<()>;
}

/// Scoped access to the persistence backend.
#[async_trait]
pub trait Store: Send + Sync {
    type Session: Session;

    /// Runs `work` against a freshly acquired session.
    ///
    /// The session is released whether `work` succeeds or fails, and any
    /// uncommitted writes are discarded first. Errors from `work` come back
    /// unmodified.
    async fn run_unit_of_work<R, F>(&self, work: F) -> DbResult<R>
    where
        R: Send + 'static,
        F: for<'s> FnOnce(&'s mut Self::Session) -> BoxFuture<'s, DbResult<R>> + Send + 'static;
}
