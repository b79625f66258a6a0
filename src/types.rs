use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Values that can be stored in a database row or used as query parameters.
///
/// ```rust
/// use sql_wrapper::prelude::*;
///
/// let params = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::from(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    JSON(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Booleans, or the integers `0` and `1` that `SQLite` stores them as.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RowValues::Bool(b) => Some(*b),
            RowValues::Int(0) => Some(false),
            RowValues::Int(1) => Some(true),
            _ => None,
        }
    }

    /// Timestamps, or text in the `YYYY-MM-DD HH:MM:SS[.fff]` form they are stored as.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            RowValues::Timestamp(dt) => Some(*dt),
            RowValues::Text(s) => NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
                .ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            RowValues::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            RowValues::Blob(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Integer reading of any value, `0` when there is nothing numeric to read.
    ///
    /// Floats are truncated toward zero and text contributes its leading
    /// integer prefix (`"12 rows"` reads as `12`).
    #[must_use]
    pub fn to_integer_lossy(&self) -> i64 {
        match self {
            RowValues::Int(i) => *i,
            #[allow(clippy::cast_possible_truncation)]
            RowValues::Float(f) => f.trunc() as i64,
            RowValues::Bool(b) => i64::from(*b),
            RowValues::Text(s) => leading_integer(s),
            RowValues::JSON(JsonValue::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .unwrap_or(0),
            RowValues::Timestamp(_) | RowValues::Null | RowValues::JSON(_) | RowValues::Blob(_) => {
                0
            }
        }
    }

    /// Render the value as JSON for row-to-record conversion.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            RowValues::Int(i) => JsonValue::from(*i),
            RowValues::Float(f) => JsonValue::from(*f),
            RowValues::Text(s) => JsonValue::String(s.clone()),
            RowValues::Bool(b) => JsonValue::Bool(*b),
            RowValues::Timestamp(dt) => JsonValue::String(dt.format(TIMESTAMP_FORMAT).to_string()),
            RowValues::Null => JsonValue::Null,
            RowValues::JSON(v) => v.clone(),
            RowValues::Blob(bytes) => JsonValue::from(bytes.clone()),
        }
    }

    /// Scalar JSON maps onto the matching variant; arrays and objects stay JSON.
    #[must_use]
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => RowValues::Null,
            JsonValue::Bool(b) => RowValues::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => RowValues::Int(i),
                None => RowValues::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => RowValues::Text(s),
            other @ (JsonValue::Array(_) | JsonValue::Object(_)) => RowValues::JSON(other),
        }
    }
}

fn leading_integer(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let mut end = 0;
    for (idx, ch) in trimmed.char_indices() {
        if ch.is_ascii_digit() || (idx == 0 && (ch == '-' || ch == '+')) {
            end = idx + ch.len_utf8();
        } else {
            break;
        }
    }
    trimmed[..end].parse().unwrap_or(0)
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<i32> for RowValues {
    fn from(value: i32) -> Self {
        RowValues::Int(i64::from(value))
    }
}

impl From<u32> for RowValues {
    fn from(value: u32) -> Self {
        RowValues::Int(i64::from(value))
    }
}

impl From<f64> for RowValues {
    fn from(value: f64) -> Self {
        RowValues::Float(value)
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        RowValues::Bool(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_string())
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl From<Vec<u8>> for RowValues {
    fn from(value: Vec<u8>) -> Self {
        RowValues::Blob(value)
    }
}

impl From<NaiveDateTime> for RowValues {
    fn from(value: NaiveDateTime) -> Self {
        RowValues::Timestamp(value)
    }
}

impl<T: Into<RowValues>> From<Option<T>> for RowValues {
    fn from(value: Option<T>) -> Self {
        value.map_or(RowValues::Null, Into::into)
    }
}

/// Whether a statement is read for rows or executed for its side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementKind {
    /// Pull the full result set.
    Select,
    /// Report affected rows and the inserted id.
    #[default]
    Mutation,
}

impl StatementKind {
    #[must_use]
    pub fn is_select(self) -> bool {
        matches!(self, StatementKind::Select)
    }
}
