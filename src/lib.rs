//! Parameterized queries over a single lazily-opened connection.
//!
//! Query text can address its values positionally (`?`) or by name
//! (`{name}`). Either way the statement is prepared and its values bound by
//! the driver, never spliced into the SQL.
//!
//! ```rust
//! use sql_wrapper::prelude::*;
//!
//! # fn main() -> Result<(), SqlWrapperError> {
//! let mut db = Database::new(ConnectionConfig::new());
//! let row = db
//!     .select_one(
//!         QueryRequest::new("SELECT {name} AS name, {id} AS id")
//!             .with_rules("si")
//!             .with_payload(Payload::named([("name", RowValues::from("Ann")), ("id", RowValues::from(7))])),
//!     )?
//!     .expect("one row");
//! assert_eq!(row.get("name"), Some(&RowValues::Text("Ann".into())));
//! # Ok(())
//! # }
//! ```

pub mod binder;
pub mod config;
pub mod connection;
pub mod database;
pub mod driver;
pub mod error;
mod executor;
pub mod prelude;
pub mod query;
pub mod results;
mod shapers;
pub mod shared;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod transaction;
pub mod type_rules;
pub mod types;

pub use binder::BoundQuery;
pub use config::{ConnectionConfig, ResolvedConfig};
pub use database::Database;
pub use driver::{Connector, DriverConnection, DriverStatement, ExecuteResult};
pub use error::{DriverError, ErrorKind, SqlWrapperError};
pub use query::{Payload, QueryRequest};
pub use results::{MutationSummary, QueryOutcome, ResultSet, Row};
pub use shared::SharedDatabase;
pub use transaction::TransactionState;
pub use type_rules::{TypeRule, TypeRules};
pub use types::{RowValues, StatementKind};

#[cfg(feature = "sqlite")]
pub use database::SqliteDatabase;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteConnector;
