use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::SqlWrapperError;
use crate::types::RowValues;

/// Parameter payload supplied with a query.
///
/// The variant decides how values line up with the query text: a positional
/// sequence is taken as-is, while keyed payloads are reordered by name.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Values in the same order as the `?` placeholders.
    Positional(Vec<RowValues>),
    /// Values keyed by the `{name}` tokens of the query.
    Named(BTreeMap<String, RowValues>),
    /// A serialized record or raw JSON document.
    Structured(JsonValue),
}

impl Payload {
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<RowValues>,
    {
        Payload::Positional(values.into_iter().map(Into::into).collect())
    }

    pub fn named<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RowValues>,
    {
        Payload::Named(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Wrap a raw JSON document. Its shape is checked when the query runs.
    #[must_use]
    pub fn from_json(value: JsonValue) -> Self {
        Payload::Structured(value)
    }

    /// Serialize any record (typically a struct) into an object-like payload.
    ///
    /// # Errors
    /// Returns `SqlWrapperError::InvalidArgument` if the value cannot be serialized.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, SqlWrapperError> {
        serde_json::to_value(value)
            .map(Payload::Structured)
            .map_err(|e| SqlWrapperError::InvalidArgument(format!("cannot serialize params: {e}")))
    }

    /// Reject payload shapes that carry neither a sequence nor a mapping.
    ///
    /// # Errors
    /// Returns `SqlWrapperError::InvalidArgument` for a structured scalar.
    pub fn validate(&self) -> Result<(), SqlWrapperError> {
        match self {
            Payload::Structured(
                JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::String(_),
            ) => Err(SqlWrapperError::InvalidArgument(
                "Params must be an array or an object.".into(),
            )),
            _ => Ok(()),
        }
    }

    /// True for payloads that address values by name.
    #[must_use]
    pub fn is_keyed(&self) -> bool {
        matches!(
            self,
            Payload::Named(_) | Payload::Structured(JsonValue::Object(_))
        )
    }

    /// Structured `null` behaves like a missing payload.
    pub(crate) fn is_absent(&self) -> bool {
        matches!(self, Payload::Structured(JsonValue::Null))
    }
}

impl From<Vec<RowValues>> for Payload {
    fn from(values: Vec<RowValues>) -> Self {
        Payload::Positional(values)
    }
}

impl From<BTreeMap<String, RowValues>> for Payload {
    fn from(values: BTreeMap<String, RowValues>) -> Self {
        Payload::Named(values)
    }
}

impl From<JsonValue> for Payload {
    fn from(value: JsonValue) -> Self {
        Payload::Structured(value)
    }
}

/// A SQL string together with its optional type rules and parameter payload.
///
/// ```rust
/// use sql_wrapper::prelude::*;
///
/// let request = QueryRequest::new("UPDATE users SET name = {name} WHERE id = {id}")
///     .with_rules("si")
///     .with_payload(Payload::named([("name", RowValues::from("Ann")), ("id", RowValues::from(7))]));
/// # let _ = request;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    /// The SQL query string
    pub sql: String,
    /// One character per bound value, see [`crate::TypeRules`]
    pub type_rules: Option<String>,
    /// The parameters to be bound to the query
    pub payload: Option<Payload>,
}

impl QueryRequest {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            type_rules: None,
            payload: None,
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: impl Into<String>) -> Self {
        self.type_rules = Some(rules.into());
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Shorthand for a positional payload.
    #[must_use]
    pub fn with_params<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<RowValues>,
    {
        self.with_payload(Payload::positional(values))
    }
}

impl From<&str> for QueryRequest {
    fn from(sql: &str) -> Self {
        QueryRequest::new(sql)
    }
}

impl From<String> for QueryRequest {
    fn from(sql: String) -> Self {
        QueryRequest::new(sql)
    }
}

impl From<&QueryRequest> for QueryRequest {
    fn from(request: &QueryRequest) -> Self {
        request.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[derive(Serialize)]
    struct Account {
        id: i64,
        username: String,
    }

    #[test]
    fn scalar_json_is_rejected() {
        let err = Payload::from_json(json!(42)).validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(Payload::from_json(json!("x")).validate().is_err());
    }

    #[test]
    fn sequences_and_mappings_are_accepted() {
        assert!(Payload::from_json(json!([1, 2])).validate().is_ok());
        assert!(Payload::from_json(json!({"id": 1})).validate().is_ok());
        assert!(Payload::from_json(json!(null)).validate().is_ok());
        assert!(Payload::positional([1, 2]).validate().is_ok());
    }

    #[test]
    fn serialized_struct_is_keyed() {
        let payload = Payload::from_serialize(&Account {
            id: 3,
            username: "ann".into(),
        })
        .unwrap();
        assert!(payload.is_keyed());
        assert!(!Payload::positional(["a"]).is_keyed());
    }

    #[test]
    fn request_builder_sets_fields() {
        let request = QueryRequest::new("SELECT * FROM accounts WHERE username = ?")
            .with_rules("s")
            .with_params(["ann"]);
        assert_eq!(request.type_rules.as_deref(), Some("s"));
        assert_eq!(
            request.payload,
            Some(Payload::Positional(vec![RowValues::Text("ann".into())]))
        );
    }
}
