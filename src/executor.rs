use tracing::debug;

use crate::binder::{self, BoundQuery};
use crate::database::Database;
use crate::driver::{Connector, DriverConnection, DriverStatement};
use crate::error::SqlWrapperError;
use crate::query::QueryRequest;
use crate::results::{MutationSummary, QueryOutcome};
use crate::type_rules::TypeRules;
use crate::types::{RowValues, StatementKind};

impl<C: Connector> Database<C> {
    /// Bind and run one statement.
    ///
    /// Outside a transaction the connection is opened for this call and
    /// closed before returning, on success and on failure alike. Inside a
    /// transaction it stays open.
    ///
    /// # Errors
    /// - `InvalidArgument` / `BindingError` if the payload does not fit the query text.
    /// - `ConnectionError` if the connection cannot be opened.
    /// - `StatementError` if preparing, binding or executing fails.
    /// - `QueryError` if the connection reports an error after the statement ran.
    pub fn query(
        &mut self,
        request: impl Into<QueryRequest>,
        kind: StatementKind,
    ) -> Result<QueryOutcome, SqlWrapperError> {
        let request = request.into();
        if let Some(payload) = &request.payload {
            payload.validate()?;
        }
        let bound = binder::bind(&request.sql, request.payload.as_ref())?;

        let keep_open = self.state.is_active();
        let mut lease = self.slot.lease(&self.config, keep_open)?;
        let conn = lease.connection()?;

        debug!(
            sql = %bound.sql,
            params = bound.values.as_ref().map_or(0, Vec::len),
            ?kind,
            in_transaction = keep_open,
            "executing statement"
        );
        let outcome = run_statement(conn, &bound, request.type_rules.as_deref(), kind);
        let outcome = match outcome {
            Ok(outcome) => match conn.pending_error() {
                Some(message) => Err(SqlWrapperError::QueryError(message)),
                None => Ok(outcome),
            },
            Err(err) => Err(err),
        };
        drop(lease);

        if let Err(err) = &outcome {
            debug!(error = %err, "statement failed");
        }
        outcome
    }
}

fn statement_error(err: crate::error::DriverError) -> SqlWrapperError {
    SqlWrapperError::StatementError(err.into_message())
}

fn run_statement<D: DriverConnection>(
    conn: &mut D,
    bound: &BoundQuery<'_>,
    type_rules: Option<&str>,
    kind: StatementKind,
) -> Result<QueryOutcome, SqlWrapperError> {
    let mut stmt = conn.prepare(&bound.sql).map_err(statement_error)?;

    let mut bound_count = 0;
    if let Some(values) = &bound.values {
        let coerced: Vec<RowValues>;
        let values: &[RowValues] = match type_rules {
            Some(rules) => {
                coerced = TypeRules::parse(rules)?.apply(values)?;
                &coerced
            }
            None => values,
        };
        for (idx, value) in values.iter().enumerate() {
            stmt.bind(idx + 1, value).map_err(statement_error)?;
        }
        bound_count = values.len();
    }
    if bound_count < stmt.parameter_count() {
        return Err(SqlWrapperError::StatementError(
            "No data supplied for parameters in prepared statement".into(),
        ));
    }

    if kind.is_select() {
        let rows = stmt.fetch().map_err(statement_error)?;
        Ok(rows.map_or(QueryOutcome::NoResult, QueryOutcome::Rows))
    } else {
        let result = stmt.execute().map_err(statement_error)?;
        Ok(QueryOutcome::Mutation(MutationSummary {
            success: true,
            affected_rows: result.affected_rows,
            insert_id: result.insert_id,
        }))
    }
}
