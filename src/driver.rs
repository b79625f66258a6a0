//! Driver seam between the executor and a concrete database client.
//!
//! A [`Connector`] opens connections from a [`ResolvedConfig`]; the
//! connection prepares statements which are bound and run one at a time.

use crate::config::ResolvedConfig;
use crate::error::DriverError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Affected rows and generated id reported after a write statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecuteResult {
    pub affected_rows: u64,
    pub insert_id: i64,
}

/// Opens physical connections.
pub trait Connector {
    type Connection: DriverConnection;

    /// Open a connection.
    ///
    /// # Errors
    /// Returns `DriverError` when the database cannot be reached or refuses the credentials.
    fn connect(&self, config: &ResolvedConfig) -> Result<Self::Connection, DriverError>;
}

/// One open connection.
pub trait DriverConnection {
    type Statement<'conn>: DriverStatement
    where
        Self: 'conn;

    /// # Errors
    /// Returns `DriverError` if the encoding cannot be applied.
    fn set_charset(&mut self, charset: &str) -> Result<(), DriverError>;

    /// # Errors
    /// Returns `DriverError` for SQL the database rejects.
    fn prepare(&mut self, sql: &str) -> Result<Self::Statement<'_>, DriverError>;

    /// # Errors
    /// Returns `DriverError` if the database refuses to open a transaction.
    fn begin(&mut self) -> Result<(), DriverError>;

    /// # Errors
    /// Returns `DriverError` if the commit fails.
    fn commit(&mut self) -> Result<(), DriverError>;

    /// # Errors
    /// Returns `DriverError` if the rollback fails.
    fn rollback(&mut self) -> Result<(), DriverError>;

    /// Error recorded on the connection itself rather than on a statement.
    fn pending_error(&self) -> Option<String> {
        None
    }

    /// # Errors
    /// Returns `DriverError` if closing reports a failure; the connection is gone either way.
    fn close(self) -> Result<(), DriverError>
    where
        Self: Sized;
}

/// A prepared statement.
pub trait DriverStatement {
    /// Number of placeholders in the statement.
    fn parameter_count(&self) -> usize;

    /// Bind `value` to the 1-based `position`.
    ///
    /// # Errors
    /// Returns `DriverError` if the position is out of range or the value is rejected.
    fn bind(&mut self, position: usize, value: &RowValues) -> Result<(), DriverError>;

    /// Run a read statement. `Ok(None)` means the statement produced no result object.
    ///
    /// # Errors
    /// Returns `DriverError` if execution or row extraction fails.
    fn fetch(&mut self) -> Result<Option<ResultSet>, DriverError>;

    /// Run a write statement.
    ///
    /// # Errors
    /// Returns `DriverError` if execution fails.
    fn execute(&mut self) -> Result<ExecuteResult, DriverError>;
}
