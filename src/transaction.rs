use tracing::{debug, warn};

use crate::database::Database;
use crate::driver::{Connector, DriverConnection};
use crate::error::{DriverError, SqlWrapperError};

/// Whether a transaction currently holds the connection open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionState {
    #[default]
    Idle,
    Active,
}

impl TransactionState {
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, TransactionState::Active)
    }
}

#[derive(Debug, Clone, Copy)]
enum Finish {
    Commit,
    Rollback,
}

impl<C: Connector> Database<C> {
    /// Open a connection and begin a transaction on it.
    ///
    /// Returns whether the database accepted the `BEGIN`. When it does not,
    /// the connection is released and the state stays `Idle`.
    ///
    /// # Errors
    /// Returns `SqlWrapperError::TransactionError` if a transaction is already active or a
    /// connection is already open, and `SqlWrapperError::ConnectionError` if the connection
    /// cannot be opened.
    pub fn start_transaction(&mut self) -> Result<bool, SqlWrapperError> {
        if self.state.is_active() || self.slot.is_open() {
            return Err(SqlWrapperError::TransactionError(
                "There is another started transaction".into(),
            ));
        }

        let begun = self.slot.acquire(&self.config)?.begin();
        match begun {
            Ok(()) => {
                self.state = TransactionState::Active;
                debug!("transaction started");
                Ok(true)
            }
            Err(err) => {
                warn!(error = %err, "could not begin transaction");
                self.state = TransactionState::Idle;
                self.slot.release();
                Ok(false)
            }
        }
    }

    /// Commit the active transaction and release its connection.
    ///
    /// The state returns to `Idle` and the connection is closed whether or not
    /// the commit succeeded; the return value reports the commit itself.
    ///
    /// # Errors
    /// Returns `SqlWrapperError::TransactionError` if no transaction is active.
    pub fn commit_transaction(&mut self) -> Result<bool, SqlWrapperError> {
        self.finish_transaction(Finish::Commit)
    }

    /// Roll back the active transaction and release its connection.
    ///
    /// # Errors
    /// Returns `SqlWrapperError::TransactionError` if no transaction is active.
    pub fn rollback_transaction(&mut self) -> Result<bool, SqlWrapperError> {
        self.finish_transaction(Finish::Rollback)
    }

    fn finish_transaction(&mut self, finish: Finish) -> Result<bool, SqlWrapperError> {
        if !self.state.is_active() || !self.slot.is_open() {
            return Err(SqlWrapperError::TransactionError(
                "There is no previous started transaction".into(),
            ));
        }

        let result = match self.slot.handle_mut() {
            Some(conn) => match finish {
                Finish::Commit => conn.commit(),
                Finish::Rollback => conn.rollback(),
            },
            None => Err(DriverError::new("transaction connection is gone")),
        };

        self.state = TransactionState::Idle;
        self.slot.release();

        match result {
            Ok(()) => {
                debug!(?finish, "transaction finished");
                Ok(true)
            }
            Err(err) => {
                warn!(?finish, error = %err, "transaction finish failed");
                Ok(false)
            }
        }
    }

    /// Run `func` inside a transaction: commit when it returns `Ok`, roll back
    /// when it returns `Err`.
    ///
    /// The example uses an unnamed in-memory database, which exists only for
    /// the connection the transaction holds.
    ///
    /// ```rust
    /// use sql_wrapper::prelude::*;
    ///
    /// # fn main() -> Result<(), SqlWrapperError> {
    /// let mut db = Database::new(ConnectionConfig::new());
    /// let total = db.transaction(|db| {
    ///     db.execute_mutation("CREATE TABLE t (id INTEGER PRIMARY KEY, n INTEGER)")?;
    ///     db.execute_mutation(QueryRequest::new("INSERT INTO t (n) VALUES ({n})")
    ///         .with_payload(Payload::named([("n", 5)])))?;
    ///     db.select_count("SELECT SUM(n) FROM t")
    /// })?;
    /// assert_eq!(total, 5);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns `SqlWrapperError::TransactionError` if the transaction cannot be started or the
    /// commit fails, otherwise whatever `func` returns.
    pub fn transaction<T, F>(&mut self, func: F) -> Result<T, SqlWrapperError>
    where
        F: FnOnce(&mut Self) -> Result<T, SqlWrapperError>,
    {
        if !self.start_transaction()? {
            return Err(SqlWrapperError::TransactionError(
                "the database refused to begin a transaction".into(),
            ));
        }

        match func(self) {
            Ok(value) if !self.state.is_active() => Ok(value),
            Ok(value) => {
                if self.commit_transaction()? {
                    Ok(value)
                } else {
                    Err(SqlWrapperError::TransactionError(
                        "the transaction could not be committed".into(),
                    ))
                }
            }
            Err(err) => {
                if self.state.is_active() {
                    self.rollback_transaction()?;
                }
                Err(err)
            }
        }
    }
}
