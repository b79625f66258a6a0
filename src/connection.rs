use tracing::{debug, warn};

use crate::config::ConnectionConfig;
use crate::driver::{Connector, DriverConnection};
use crate::error::SqlWrapperError;

/// Character set applied to every new connection.
pub const CHARSET: &str = "utf8";

/// Holds at most one lazily-opened connection.
///
/// `acquire` opens on first demand and hands back the cached handle
/// afterwards; `release` closes it. Both are idempotent.
pub struct ConnectionSlot<C: Connector> {
    connector: C,
    handle: Option<C::Connection>,
}

impl<C: Connector> ConnectionSlot<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            handle: None,
        }
    }

    #[must_use]
    pub fn connector(&self) -> &C {
        &self.connector
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    #[must_use]
    pub fn handle(&self) -> Option<&C::Connection> {
        self.handle.as_ref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut C::Connection> {
        self.handle.as_mut()
    }

    /// Return the open connection, opening it from `config` if there is none.
    ///
    /// # Errors
    /// Returns `SqlWrapperError::ConnectionError` if the connector cannot open the database.
    pub fn acquire(
        &mut self,
        config: &ConnectionConfig,
    ) -> Result<&mut C::Connection, SqlWrapperError> {
        if self.handle.is_none() {
            let resolved = config.resolve();
            let mut conn = self
                .connector
                .connect(&resolved)
                .map_err(|e| SqlWrapperError::ConnectionError(e.into_message()))?;
            if let Err(err) = conn.set_charset(CHARSET) {
                warn!(error = %err, charset = CHARSET, "could not set connection charset");
            }
            debug!(host = %resolved.host, database = %resolved.database, "connection opened");
            self.handle = Some(conn);
        }
        self.handle.as_mut().ok_or_else(|| {
            SqlWrapperError::ConnectionError("connection unavailable after open".into())
        })
    }

    /// Close the connection if one is open.
    pub fn release(&mut self) {
        if let Some(conn) = self.handle.take() {
            match conn.close() {
                Ok(()) => debug!("connection closed"),
                Err(err) => warn!(error = %err, "error while closing connection"),
            }
        }
    }

    /// Acquire and wrap the connection in a lease that releases it on drop
    /// unless `keep_open` is set.
    ///
    /// # Errors
    /// Returns `SqlWrapperError::ConnectionError` if the connection cannot be opened.
    pub(crate) fn lease(
        &mut self,
        config: &ConnectionConfig,
        keep_open: bool,
    ) -> Result<ConnectionLease<'_, C>, SqlWrapperError> {
        self.acquire(config)?;
        Ok(ConnectionLease {
            slot: self,
            keep_open,
        })
    }
}

impl<C: Connector> Drop for ConnectionSlot<C> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Scoped use of the slot's connection for one statement.
pub(crate) struct ConnectionLease<'a, C: Connector> {
    slot: &'a mut ConnectionSlot<C>,
    keep_open: bool,
}

impl<C: Connector> ConnectionLease<'_, C> {
    pub(crate) fn connection(&mut self) -> Result<&mut C::Connection, SqlWrapperError> {
        self.slot
            .handle_mut()
            .ok_or_else(|| SqlWrapperError::ConnectionError("connection already released".into()))
    }
}

impl<C: Connector> Drop for ConnectionLease<'_, C> {
    fn drop(&mut self) {
        if !self.keep_open {
            self.slot.release();
        }
    }
}
