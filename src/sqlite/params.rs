use rusqlite::types::Value;

use crate::types::RowValues;

/// Convert a single `RowValues` to a rusqlite `Value`.
#[must_use]
pub fn row_value_to_sqlite_value(value: &RowValues) -> Value {
    match value {
        RowValues::Int(i) => Value::Integer(*i),
        RowValues::Float(f) => Value::Real(*f),
        RowValues::Text(s) => Value::Text(s.clone()),
        RowValues::Bool(b) => Value::Integer(i64::from(*b)),
        RowValues::Timestamp(dt) => Value::Text(dt.format("%F %T%.f").to_string()),
        RowValues::Null => Value::Null,
        RowValues::JSON(jval) => Value::Text(jval.to_string()),
        RowValues::Blob(bytes) => Value::Blob(bytes.clone()),
    }
}

/// Convert a rusqlite `Value` back into `RowValues`.
#[must_use]
pub fn sqlite_value_to_row_value(value: Value) -> RowValues {
    match value {
        Value::Null => RowValues::Null,
        Value::Integer(i) => RowValues::Int(i),
        Value::Real(f) => RowValues::Float(f),
        Value::Text(s) => RowValues::Text(s),
        Value::Blob(b) => RowValues::Blob(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bools_and_json_become_sqlite_storage_classes() {
        assert_eq!(row_value_to_sqlite_value(&RowValues::Bool(true)), Value::Integer(1));
        assert_eq!(
            row_value_to_sqlite_value(&RowValues::JSON(serde_json::json!({"a": 1}))),
            Value::Text("{\"a\":1}".into())
        );
    }

    #[test]
    fn timestamps_use_sqlite_text_format() {
        let dt = chrono::NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(8, 5, 1))
            .unwrap();
        assert_eq!(
            row_value_to_sqlite_value(&RowValues::Timestamp(dt)),
            Value::Text("2024-03-09 08:05:01".into())
        );
    }
}
