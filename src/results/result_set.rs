use std::collections::HashMap;
use std::sync::Arc;

use super::row::{Row, index_columns};
use crate::types::RowValues;

/// Rows returned by a read statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<Row>,
    column_names: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
}

impl ResultSet {
    /// Create an empty result set for the given columns.
    #[must_use]
    pub fn new(column_names: Vec<String>) -> ResultSet {
        let column_index = index_columns(&column_names);
        ResultSet {
            results: Vec::new(),
            column_names: Arc::new(column_names),
            column_index,
        }
    }

    /// Get the column names for this result set
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Add a row; the values must follow the column order.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        self.results.push(Row::with_index(
            Arc::clone(&self.column_names),
            Arc::clone(&self.column_index),
            row_values,
        ));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Row> {
        self.results.first()
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.results
    }
}
