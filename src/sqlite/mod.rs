// SQLite driver
//
// - connection: connector, connection handle and prepared statement
// - params: value conversion between `RowValues` and rusqlite
// - query: result extraction

pub mod connection;
pub mod params;
pub mod query;

pub use connection::{SqliteConnector, SqliteHandle, SqliteStatement};
pub use query::build_result_set;

/// Re-exported so callers can pass custom open flags to [`SqliteConnector::with_flags`].
pub use rusqlite::OpenFlags;
