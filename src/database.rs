use tracing::{debug, warn};

use crate::config::ConnectionConfig;
use crate::connection::ConnectionSlot;
use crate::driver::{Connector, DriverConnection};
use crate::transaction::TransactionState;

#[cfg(feature = "sqlite")]
use crate::sqlite::SqliteConnector;

/// Execution context: configuration, the single connection slot and the
/// transaction state.
///
/// One `Database` serves one caller at a time; every operation takes
/// `&mut self`. Wrap it in [`crate::SharedDatabase`] to serialize access from
/// concurrent async tasks.
///
/// ```rust
/// use sql_wrapper::prelude::*;
///
/// # fn main() -> Result<(), SqlWrapperError> {
/// let mut db = Database::new(ConnectionConfig::new());
/// assert_eq!(db.select_count("SELECT 3")?, 3);
/// assert!(!db.is_connected());
/// # Ok(())
/// # }
/// ```
pub struct Database<C: Connector> {
    pub(crate) config: ConnectionConfig,
    pub(crate) slot: ConnectionSlot<C>,
    pub(crate) state: TransactionState,
}

/// [`Database`] over the bundled rusqlite driver.
#[cfg(feature = "sqlite")]
pub type SqliteDatabase = Database<SqliteConnector>;

#[cfg(feature = "sqlite")]
impl Database<SqliteConnector> {
    /// `SQLite`-backed database; `config.database` is the file path.
    ///
    /// An empty database name opens a fresh in-memory database on every
    /// connection. Outside a transaction each statement gets its own
    /// connection, so nothing written by one standalone statement is visible
    /// to the next; keep related statements inside [`Database::transaction`]
    /// or point the config at a file.
    ///
    /// ```rust
    /// use sql_wrapper::prelude::*;
    ///
    /// # fn main() -> Result<(), SqlWrapperError> {
    /// let mut db = Database::new(ConnectionConfig::new());
    /// db.execute_mutation("CREATE TABLE t (id INTEGER)")?;
    /// let err = db.select_count("SELECT COUNT(*) FROM t").unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Statement);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn new(config: ConnectionConfig) -> Self {
        Self::with_connector(SqliteConnector::default(), config)
    }
}

impl<C: Connector> Database<C> {
    pub fn with_connector(connector: C, config: ConnectionConfig) -> Self {
        Self {
            config,
            slot: ConnectionSlot::new(connector),
            state: TransactionState::Idle,
        }
    }

    /// Replace the configuration used for the next connection. An already
    /// open connection keeps the settings it was opened with.
    pub fn configure(&mut self, config: ConnectionConfig) {
        if self.slot.is_open() {
            debug!("configuration changed while a connection is open; applies to the next one");
        }
        self.config = config;
    }

    #[must_use]
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    #[must_use]
    pub fn connector(&self) -> &C {
        self.slot.connector()
    }

    /// True while a physical connection is open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.slot.is_open()
    }

    #[must_use]
    pub fn transaction_state(&self) -> TransactionState {
        self.state
    }
}

impl<C: Connector> Drop for Database<C> {
    fn drop(&mut self) {
        if self.state.is_active() {
            warn!("database dropped with an active transaction; rolling back");
            if let Some(conn) = self.slot.handle_mut() {
                if let Err(err) = conn.rollback() {
                    warn!(error = %err, "rollback on drop failed");
                }
            }
            self.state = TransactionState::Idle;
        }
        self.slot.release();
    }
}
