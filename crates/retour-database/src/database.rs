use core::fmt;

use time::OffsetDateTime;

use crate::{RecordFilters, record::model::Record};
pub mod sqlite;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseError {
    pub msg: String,
}

impl DatabaseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Encountered a database error: {}", self.msg)
    }
}

impl std::error::Error for DatabaseError {}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        Self::new(err.to_string())
    }
}

pub trait Database {
    /// Save a `Record` to the database, returning its new id.
    ///
    /// # Errors
    /// Will return `Err` if the database Encountered an issue.
    fn save(&self, record: &Record) -> Result<i64, DatabaseError>;

    /// Fetch a `Record` by its id from the database.
    ///
    /// # Errors
    /// Will return `Err` if the database Encountered an issue.
    fn get(&self, id: i64) -> Result<Option<Record>, DatabaseError>;

    /// Run a literal SQL query against the history table.
    ///
    /// The statement must return the columns `id, command, timestamp,
    /// working_directory, exit_status, arguments` in that order.
    ///
    /// # Errors
    /// Will return `Err` if the query is malformed or returns other columns.
    fn query(&self, sql: &str) -> Result<Vec<Record>, DatabaseError>;

    /// Fetch records matching `filters`, newest first.
    ///
    /// # Errors
    /// Will return `Err` if the database Encountered an issue.
    fn search(&self, filters: &RecordFilters) -> Result<Vec<Record>, DatabaseError>;

    /// Total number of stored records.
    ///
    /// # Errors
    /// Will return `Err` if the database Encountered an issue.
    fn count(&self) -> Result<i64, DatabaseError>;

    /// Delete every record executed before `before`, returning how many were removed.
    ///
    /// # Errors
    /// Will return `Err` if the database Encountered an issue.
    fn prune(&self, before: OffsetDateTime) -> Result<usize, DatabaseError>;
}
