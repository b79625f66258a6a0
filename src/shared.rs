use std::sync::Arc;

use tokio::sync::Mutex;

use crate::database::Database;
use crate::driver::Connector;
use crate::error::SqlWrapperError;
use crate::query::QueryRequest;
use crate::results::{MutationSummary, QueryOutcome, Row};
use crate::types::StatementKind;

/// A [`Database`] shared between async tasks.
///
/// Calls run one at a time on the blocking thread pool. A caller that needs
/// several statements to run back to back, such as a transaction, should use
/// [`SharedDatabase::with_database`] so the lock is held for the whole span.
pub struct SharedDatabase<C: Connector> {
    inner: Arc<Mutex<Database<C>>>,
}

impl<C: Connector> Clone for SharedDatabase<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> SharedDatabase<C>
where
    C: Connector + Send + 'static,
    C::Connection: Send,
{
    pub fn new(database: Database<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(database)),
        }
    }

    /// Run `func` with exclusive access to the database.
    ///
    /// # Errors
    /// Returns whatever `func` returns, or `SqlWrapperError::QueryError` if the blocking task
    /// could not be joined.
    pub async fn with_database<F, R>(&self, func: F) -> Result<R, SqlWrapperError>
    where
        F: FnOnce(&mut Database<C>) -> Result<R, SqlWrapperError> + Send + 'static,
        R: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let mut guard = inner.blocking_lock();
            func(&mut guard)
        })
        .await
        .map_err(|e| SqlWrapperError::QueryError(format!("database task join error: {e}")))?
    }

    /// # Errors
    /// See [`Database::query`].
    pub async fn query(
        &self,
        request: impl Into<QueryRequest>,
        kind: StatementKind,
    ) -> Result<QueryOutcome, SqlWrapperError> {
        let request = request.into();
        self.with_database(move |db| db.query(request, kind)).await
    }

    /// # Errors
    /// See [`Database::query`].
    pub async fn select_one(
        &self,
        request: impl Into<QueryRequest>,
    ) -> Result<Option<Row>, SqlWrapperError> {
        let request = request.into();
        self.with_database(move |db| db.select_one(request)).await
    }

    /// # Errors
    /// See [`Database::query`].
    pub async fn select_all(
        &self,
        request: impl Into<QueryRequest>,
    ) -> Result<Vec<Row>, SqlWrapperError> {
        let request = request.into();
        self.with_database(move |db| db.select_all(request)).await
    }

    /// # Errors
    /// See [`Database::query`].
    pub async fn select_count(
        &self,
        request: impl Into<QueryRequest>,
    ) -> Result<i64, SqlWrapperError> {
        let request = request.into();
        self.with_database(move |db| db.select_count(request)).await
    }

    /// # Errors
    /// See [`Database::query`].
    pub async fn execute_mutation(
        &self,
        request: impl Into<QueryRequest>,
    ) -> Result<MutationSummary, SqlWrapperError> {
        let request = request.into();
        self.with_database(move |db| db.execute_mutation(request))
            .await
    }

    /// Run `func` as one transaction while holding the lock.
    ///
    /// # Errors
    /// See [`Database::transaction`].
    pub async fn transaction<F, R>(&self, func: F) -> Result<R, SqlWrapperError>
    where
        F: FnOnce(&mut Database<C>) -> Result<R, SqlWrapperError> + Send + 'static,
        R: Send + 'static,
    {
        self.with_database(move |db| db.transaction(func)).await
    }
}
