use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlWrapperError {
    /// Parameter payload of an unsupported shape, or a keyed payload for a positional query.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A named parameter could not be resolved against the payload.
    #[error("Binding error: {0}")]
    BindingError(String),

    #[error("There's an error in connection: {0}")]
    ConnectionError(String),

    /// Prepare, bind or execute failure reported by the driver.
    #[error("Statement error: {0}")]
    StatementError(String),

    #[error("Transaction error: {0}")]
    TransactionError(String),

    /// Error left pending on the connection after a statement ran.
    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Coarse classification of a [`SqlWrapperError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    Binding,
    Connection,
    Statement,
    Transaction,
    Query,
    Config,
}

impl ErrorKind {
    /// Binding failures are a specialization of invalid caller input.
    #[must_use]
    pub fn is_invalid_argument(self) -> bool {
        matches!(self, ErrorKind::InvalidArgument | ErrorKind::Binding)
    }
}

impl SqlWrapperError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SqlWrapperError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            SqlWrapperError::BindingError(_) => ErrorKind::Binding,
            SqlWrapperError::ConnectionError(_) => ErrorKind::Connection,
            SqlWrapperError::StatementError(_) => ErrorKind::Statement,
            SqlWrapperError::TransactionError(_) => ErrorKind::Transaction,
            SqlWrapperError::QueryError(_) => ErrorKind::Query,
            SqlWrapperError::ConfigError(_) => ErrorKind::Config,
        }
    }

    /// The message carried by the error, without the kind prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            SqlWrapperError::InvalidArgument(msg)
            | SqlWrapperError::BindingError(msg)
            | SqlWrapperError::ConnectionError(msg)
            | SqlWrapperError::StatementError(msg)
            | SqlWrapperError::TransactionError(msg)
            | SqlWrapperError::QueryError(msg)
            | SqlWrapperError::ConfigError(msg) => msg,
        }
    }
}

/// Error reported by a driver implementation.
///
/// Drivers only report a message; the executor decides which
/// [`SqlWrapperError`] kind it becomes depending on where it was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverError {
    message: String,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DriverError {}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for DriverError {
    fn from(err: rusqlite::Error) -> Self {
        DriverError::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_counts_as_invalid_argument() {
        let err = SqlWrapperError::BindingError("missing {id}".into());
        assert_eq!(err.kind(), ErrorKind::Binding);
        assert!(err.kind().is_invalid_argument());
        assert!(!ErrorKind::Statement.is_invalid_argument());
        assert_eq!(err.message(), "missing {id}");
    }

    #[test]
    fn connection_error_display() {
        let err = SqlWrapperError::ConnectionError("unable to open database file".into());
        assert_eq!(
            err.to_string(),
            "There's an error in connection: unable to open database file"
        );
    }
}
