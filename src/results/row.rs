use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

use crate::error::SqlWrapperError;
use crate::types::RowValues;

/// A row from a query result.
///
/// Column names and the name-to-index map are shared by every row of the
/// same result set.
#[derive(Debug, Clone)]
pub struct Row {
    /// The column names for this row (shared across all rows in a result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row
    pub values: Vec<RowValues>,
    column_index: Arc<HashMap<String, usize>>,
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.column_names == other.column_names && self.values == other.values
    }
}

pub(crate) fn index_columns(column_names: &[String]) -> Arc<HashMap<String, usize>> {
    // First occurrence wins for duplicated column names.
    let mut index = HashMap::with_capacity(column_names.len());
    for (i, name) in column_names.iter().enumerate() {
        index.entry(name.clone()).or_insert(i);
    }
    Arc::new(index)
}

impl Row {
    /// Create a row, building its own column index.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<RowValues>) -> Self {
        let column_index = index_columns(&column_names);
        Self {
            column_names,
            values,
            column_index,
        }
    }

    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        column_index: Arc<HashMap<String, usize>>,
        values: Vec<RowValues>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index,
        }
    }

    /// Get the index of a column by name
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index.get(column_name).copied()
    }

    /// Get a value from the row by column name
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a value from the row by column index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The row as a JSON object keyed by column name.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::with_capacity(self.values.len());
        for (name, value) in self.column_names.iter().zip(&self.values) {
            map.entry(name.clone()).or_insert_with(|| value.to_json());
        }
        JsonValue::Object(map)
    }

    /// Decode the row into a flat record.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use serde::Deserialize;
    /// use sql_wrapper::prelude::*;
    ///
    /// #[derive(Deserialize)]
    /// struct Account {
    ///     id: i64,
    ///     username: String,
    /// }
    ///
    /// let row = Row::new(
    ///     Arc::new(vec!["id".into(), "username".into()]),
    ///     vec![RowValues::Int(1), RowValues::Text("ann".into())],
    /// );
    /// let account: Account = row.decode().unwrap();
    /// assert_eq!(account.username, "ann");
    /// # let _ = account.id;
    /// ```
    ///
    /// # Errors
    /// Returns `SqlWrapperError::InvalidArgument` if the columns do not fit `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, SqlWrapperError> {
        serde_json::from_value(self.to_json())
            .map_err(|e| SqlWrapperError::InvalidArgument(format!("cannot decode row: {e}")))
    }
}
