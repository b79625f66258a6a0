use crate::error::SqlWrapperError;
use crate::types::RowValues;

/// Scalar type of one bound value, as written in a type-rule string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRule {
    /// `i`
    Integer,
    /// `d`
    Double,
    /// `s`
    String,
    /// `b`
    Blob,
}

impl TypeRule {
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'i' => Some(TypeRule::Integer),
            'd' => Some(TypeRule::Double),
            's' => Some(TypeRule::String),
            'b' => Some(TypeRule::Blob),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            TypeRule::Integer => 'i',
            TypeRule::Double => 'd',
            TypeRule::String => 's',
            TypeRule::Blob => 'b',
        }
    }

    /// Convert a value to the declared type. NULL stays NULL under every rule.
    ///
    /// # Errors
    /// Returns the reason when the value has no reading in the declared type.
    pub fn coerce(self, value: &RowValues) -> Result<RowValues, String> {
        if value.is_null() {
            return Ok(RowValues::Null);
        }
        match self {
            TypeRule::Integer => match value {
                RowValues::Int(i) => Ok(RowValues::Int(*i)),
                RowValues::Bool(b) => Ok(RowValues::Int(i64::from(*b))),
                #[allow(clippy::cast_possible_truncation)]
                RowValues::Float(f) => Ok(RowValues::Int(f.trunc() as i64)),
                RowValues::Text(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(RowValues::Int)
                    .map_err(|_| format!("'{s}' is not an integer")),
                other => Err(format!("{other:?} cannot be bound as an integer")),
            },
            TypeRule::Double => match value {
                RowValues::Float(f) => Ok(RowValues::Float(*f)),
                #[allow(clippy::cast_precision_loss)]
                RowValues::Int(i) => Ok(RowValues::Float(*i as f64)),
                RowValues::Bool(b) => Ok(RowValues::Float(f64::from(u8::from(*b)))),
                RowValues::Text(s) => s
                    .trim()
                    .parse::<f64>()
                    .map(RowValues::Float)
                    .map_err(|_| format!("'{s}' is not a double")),
                other => Err(format!("{other:?} cannot be bound as a double")),
            },
            TypeRule::String => Ok(match value {
                RowValues::Text(s) => RowValues::Text(s.clone()),
                RowValues::Int(i) => RowValues::Text(i.to_string()),
                RowValues::Float(f) => RowValues::Text(f.to_string()),
                RowValues::Bool(b) => RowValues::Text(if *b { "1" } else { "0" }.to_string()),
                RowValues::Timestamp(dt) => {
                    RowValues::Text(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string())
                }
                RowValues::JSON(v) => RowValues::Text(v.to_string()),
                RowValues::Blob(bytes) => RowValues::Text(String::from_utf8_lossy(bytes).into()),
                RowValues::Null => RowValues::Null,
            }),
            TypeRule::Blob => match value {
                RowValues::Blob(bytes) => Ok(RowValues::Blob(bytes.clone())),
                RowValues::Text(s) => Ok(RowValues::Blob(s.as_bytes().to_vec())),
                other => Err(format!("{other:?} cannot be bound as a blob")),
            },
        }
    }
}

/// A parsed type-rule string, one rule per ordered parameter.
///
/// ```rust
/// use sql_wrapper::prelude::*;
///
/// let rules = TypeRules::parse("si").unwrap();
/// assert_eq!(rules.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeRules(Vec<TypeRule>);

impl TypeRules {
    /// Parse a type-rule string.
    ///
    /// # Errors
    /// Returns `SqlWrapperError::StatementError` for characters that are not a known rule.
    pub fn parse(rules: &str) -> Result<Self, SqlWrapperError> {
        rules
            .chars()
            .enumerate()
            .map(|(idx, ch)| {
                TypeRule::from_char(ch).ok_or_else(|| {
                    SqlWrapperError::StatementError(format!(
                        "Undefined fieldtype {ch} (parameter {})",
                        idx + 1
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(TypeRules)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn rules(&self) -> &[TypeRule] {
        &self.0
    }

    /// Coerce `values` 1:1 against the rules.
    ///
    /// # Errors
    /// Returns `SqlWrapperError::StatementError` when the counts differ or a value
    /// cannot take its declared type.
    pub fn apply(&self, values: &[RowValues]) -> Result<Vec<RowValues>, SqlWrapperError> {
        if self.0.len() != values.len() {
            return Err(SqlWrapperError::StatementError(format!(
                "Number of elements in type definition string ({}) doesn't match number of bind variables ({})",
                self.0.len(),
                values.len()
            )));
        }
        self.0
            .iter()
            .zip(values)
            .enumerate()
            .map(|(idx, (rule, value))| {
                rule.coerce(value).map_err(|reason| {
                    SqlWrapperError::StatementError(format!(
                        "parameter {} ('{}'): {reason}",
                        idx + 1,
                        rule.as_char()
                    ))
                })
            })
            .collect()
    }
}
