//! Named-parameter resolution.
//!
//! Queries may reference values either positionally with `?` or by name with
//! `{name}` tokens. Both styles resolve here into one shape: positional SQL text
//! plus the values in placeholder order.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use serde_json::Value as JsonValue;

use crate::error::SqlWrapperError;
use crate::query::Payload;
use crate::types::RowValues;

/// Placeholder understood by the driver.
pub const POSITIONAL_PLACEHOLDER: &str = "?";

lazy_static! {
    static ref NAMED_PARAM: Regex =
        Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("named parameter pattern is valid");
}

/// Query text in positional form with its values in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundQuery<'a> {
    pub sql: Cow<'a, str>,
    /// `None` when the caller supplied no payload for a positional query.
    pub values: Option<Vec<RowValues>>,
}

/// True if `sql` contains at least one `{name}` token.
#[must_use]
pub fn has_named_parameters(sql: &str) -> bool {
    NAMED_PARAM.is_match(sql)
}

/// Names of every `{name}` token, left to right, repeats preserved.
#[must_use]
pub fn extract_parameter_names(sql: &str) -> Vec<&str> {
    NAMED_PARAM
        .captures_iter(sql)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Replace each `{name}` token with `?`. Returns a borrowed `Cow` when nothing matched.
#[must_use]
pub fn rewrite_to_positional(sql: &str) -> Cow<'_, str> {
    NAMED_PARAM.replace_all(sql, NoExpand(POSITIONAL_PLACEHOLDER))
}

/// Line the payload up with the placeholders of `sql`.
///
/// # Errors
/// Returns `SqlWrapperError::BindingError` if a named token has no value in the payload or the
/// payload is a plain sequence for a named query, and `SqlWrapperError::InvalidArgument` if a
/// keyed payload is given for a positional query or the payload is a scalar.
pub fn order_parameters(
    sql: &str,
    payload: Option<&Payload>,
) -> Result<Option<Vec<RowValues>>, SqlWrapperError> {
    let payload = payload.filter(|p| !p.is_absent());
    let names = extract_parameter_names(sql);

    if names.is_empty() {
        return match payload {
            None => Ok(None),
            Some(Payload::Positional(values)) => Ok(Some(values.clone())),
            Some(Payload::Structured(JsonValue::Array(items))) => Ok(Some(
                items.iter().cloned().map(RowValues::from_json).collect(),
            )),
            Some(_) => Err(SqlWrapperError::InvalidArgument(
                "When you use queries with positional binding the parameters must be a sequence \
                 in the same order as the query."
                    .into(),
            )),
        };
    }

    names
        .into_iter()
        .map(|name| lookup(name, payload))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn lookup(name: &str, payload: Option<&Payload>) -> Result<RowValues, SqlWrapperError> {
    let found = match payload {
        Some(Payload::Named(map)) => map.get(name).cloned(),
        Some(Payload::Structured(JsonValue::Object(map))) => {
            map.get(name).cloned().map(RowValues::from_json)
        }
        Some(Payload::Positional(_) | Payload::Structured(JsonValue::Array(_))) => {
            return Err(SqlWrapperError::BindingError(
                "In prepared named queries the parameters must be a key-value mapping or an object."
                    .into(),
            ));
        }
        Some(Payload::Structured(_)) => {
            return Err(SqlWrapperError::InvalidArgument(
                "Params must be an array or an object.".into(),
            ));
        }
        None => None,
    };
    found.ok_or_else(|| {
        SqlWrapperError::BindingError(format!(
            "The parameter {name} of the prepared query is not set in the provided params."
        ))
    })
}

/// Resolve `sql` and `payload` into the positional form the executor consumes.
///
/// # Errors
/// Propagates the errors of [`order_parameters`].
pub fn bind<'a>(sql: &'a str, payload: Option<&Payload>) -> Result<BoundQuery<'a>, SqlWrapperError> {
    let values = order_parameters(sql, payload)?;
    Ok(BoundQuery {
        sql: rewrite_to_positional(sql),
        values,
    })
}
