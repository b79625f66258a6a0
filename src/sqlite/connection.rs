use std::fmt;

use rusqlite::{Connection, OpenFlags, Statement};
use tracing::debug;

use super::params::row_value_to_sqlite_value;
use super::query::build_result_set;
use crate::config::ResolvedConfig;
use crate::driver::{Connector, DriverConnection, DriverStatement, ExecuteResult};
use crate::error::DriverError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Opens `SQLite` databases through rusqlite.
///
/// The configured database name is the file path; an empty name opens a
/// private in-memory database, which lives only as long as the connection.
/// Host, port and credentials have no meaning for `SQLite` and are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteConnector {
    flags: OpenFlags,
}

impl SqliteConnector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_flags(flags: OpenFlags) -> Self {
        Self { flags }
    }
}

impl Connector for SqliteConnector {
    type Connection = SqliteHandle;

    fn connect(&self, config: &ResolvedConfig) -> Result<SqliteHandle, DriverError> {
        debug!(
            host = %config.host,
            port = config.port,
            user = %config.username,
            database = %config.database,
            "opening sqlite connection"
        );
        let conn = if config.database.is_empty() {
            Connection::open_in_memory_with_flags(self.flags)?
        } else {
            Connection::open_with_flags(&config.database, self.flags)?
        };
        Ok(SqliteHandle { conn })
    }
}

/// An open rusqlite connection.
pub struct SqliteHandle {
    conn: Connection,
}

impl SqliteHandle {
    /// Borrow the underlying rusqlite connection.
    #[must_use]
    pub fn raw(&self) -> &Connection {
        &self.conn
    }
}

impl fmt::Debug for SqliteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteHandle")
            .field("path", &self.conn.path())
            .field("autocommit", &self.conn.is_autocommit())
            .finish()
    }
}

impl DriverConnection for SqliteHandle {
    type Statement<'conn>
        = SqliteStatement<'conn>
    where
        Self: 'conn;

    fn set_charset(&mut self, charset: &str) -> Result<(), DriverError> {
        let encoding = match charset.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" | "utf8mb4" => "UTF-8".to_string(),
            other => other.replace('\'', "''"),
        };
        self.conn
            .execute_batch(&format!("PRAGMA encoding = '{encoding}';"))?;
        Ok(())
    }

    fn prepare(&mut self, sql: &str) -> Result<SqliteStatement<'_>, DriverError> {
        let conn: &Connection = &self.conn;
        let stmt = conn.prepare(sql)?;
        Ok(SqliteStatement { stmt, conn })
    }

    fn begin(&mut self) -> Result<(), DriverError> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), DriverError> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), DriverError> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }

    fn close(self) -> Result<(), DriverError> {
        self.conn.close().map_err(|(_, err)| DriverError::from(err))
    }
}

/// A prepared rusqlite statement.
pub struct SqliteStatement<'conn> {
    stmt: Statement<'conn>,
    conn: &'conn Connection,
}

impl DriverStatement for SqliteStatement<'_> {
    fn parameter_count(&self) -> usize {
        self.stmt.parameter_count()
    }

    fn bind(&mut self, position: usize, value: &RowValues) -> Result<(), DriverError> {
        self.stmt
            .raw_bind_parameter(position, row_value_to_sqlite_value(value))?;
        Ok(())
    }

    fn fetch(&mut self) -> Result<Option<ResultSet>, DriverError> {
        if self.stmt.column_count() == 0 {
            self.stmt.raw_execute()?;
            return Ok(None);
        }
        build_result_set(&mut self.stmt).map(Some)
    }

    fn execute(&mut self) -> Result<ExecuteResult, DriverError> {
        // sqlite3_changes() keeps the last DML count across DDL; use the running total.
        let changes_before = self.conn.total_changes();
        let rowid_before = self.conn.last_insert_rowid();
        if self.stmt.column_count() == 0 {
            self.stmt.raw_execute()?;
        } else {
            let mut rows = self.stmt.raw_query();
            while rows.next()?.is_some() {}
        }
        let affected_rows = self.conn.total_changes().saturating_sub(changes_before);
        let rowid_after = self.conn.last_insert_rowid();
        let insert_id = if affected_rows > 0 && rowid_after != rowid_before {
            rowid_after
        } else {
            0
        };
        Ok(ExecuteResult {
            affected_rows,
            insert_id,
        })
    }
}
