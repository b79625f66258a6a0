use crate::database::Database;
use crate::driver::Connector;
use crate::error::SqlWrapperError;
use crate::query::QueryRequest;
use crate::results::{MutationSummary, QueryOutcome, Row};
use crate::types::StatementKind;

impl<C: Connector> Database<C> {
    /// Run a read statement and return its raw outcome.
    ///
    /// # Errors
    /// See [`Database::query`].
    pub fn select(
        &mut self,
        request: impl Into<QueryRequest>,
    ) -> Result<QueryOutcome, SqlWrapperError> {
        self.query(request, StatementKind::Select)
    }

    /// First row of the result, or `None` when there is none.
    ///
    /// # Errors
    /// See [`Database::query`].
    pub fn select_one(
        &mut self,
        request: impl Into<QueryRequest>,
    ) -> Result<Option<Row>, SqlWrapperError> {
        Ok(self
            .select(request)?
            .into_result_set()
            .and_then(|rs| rs.into_rows().into_iter().next()))
    }

    /// Every row of the result. Empty when the statement produced no rows or
    /// no result at all.
    ///
    /// # Errors
    /// See [`Database::query`].
    pub fn select_all(
        &mut self,
        request: impl Into<QueryRequest>,
    ) -> Result<Vec<Row>, SqlWrapperError> {
        Ok(self
            .select(request)?
            .into_result_set()
            .map(|rs| rs.into_rows())
            .unwrap_or_default())
    }

    /// First column of the first row as an integer; `0` when there is nothing to read.
    ///
    /// # Errors
    /// See [`Database::query`].
    pub fn select_count(
        &mut self,
        request: impl Into<QueryRequest>,
    ) -> Result<i64, SqlWrapperError> {
        Ok(self
            .select(request)?
            .result_set()
            .and_then(|rs| rs.first())
            .and_then(|row| row.get_by_index(0))
            .map_or(0, |value| value.to_integer_lossy()))
    }

    /// Run a write statement and return its summary.
    ///
    /// # Errors
    /// See [`Database::query`].
    pub fn execute_mutation(
        &mut self,
        request: impl Into<QueryRequest>,
    ) -> Result<MutationSummary, SqlWrapperError> {
        Ok(self
            .query(request, StatementKind::Mutation)?
            .mutation()
            .copied()
            .unwrap_or_default())
    }
}
