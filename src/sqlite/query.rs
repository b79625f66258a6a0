use rusqlite::Statement;
use rusqlite::types::Value;

use super::params::sqlite_value_to_row_value;
use crate::error::DriverError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
///
/// Returns `DriverError` if the value cannot be read.
pub fn sqlite_extract_value(row: &rusqlite::Row, idx: usize) -> Result<RowValues, DriverError> {
    let value: Value = row.get(idx)?;
    Ok(sqlite_value_to_row_value(value))
}

/// Run an already-bound statement and collect every row.
///
/// # Errors
/// Returns `DriverError` if stepping the statement or reading a column fails.
pub fn build_result_set(stmt: &mut Statement<'_>) -> Result<ResultSet, DriverError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();
    let mut result_set = ResultSet::new(column_names);

    let mut rows = stmt.raw_query();
    while let Some(row) = rows.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(sqlite_extract_value(row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}
