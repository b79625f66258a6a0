//! Convenient imports for common functionality.

pub use crate::binder::{
    BoundQuery, bind, extract_parameter_names, has_named_parameters, order_parameters,
    rewrite_to_positional,
};
pub use crate::config::{ConnectionConfig, ResolvedConfig};
pub use crate::database::Database;
pub use crate::driver::{Connector, DriverConnection, DriverStatement, ExecuteResult};
pub use crate::error::{DriverError, ErrorKind, SqlWrapperError};
pub use crate::query::{Payload, QueryRequest};
pub use crate::results::{MutationSummary, QueryOutcome, ResultSet, Row};
pub use crate::shared::SharedDatabase;
pub use crate::transaction::TransactionState;
pub use crate::type_rules::{TypeRule, TypeRules};
pub use crate::types::{RowValues, StatementKind};

#[cfg(feature = "sqlite")]
pub use crate::database::SqliteDatabase;
#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteConnector;
