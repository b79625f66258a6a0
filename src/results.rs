mod result_set;
mod row;

pub use result_set::ResultSet;
pub use row::Row;

/// Outcome of a write statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MutationSummary {
    pub success: bool,
    pub affected_rows: u64,
    /// Identifier generated by an insert, `0` when none was generated.
    pub insert_id: i64,
}

/// What a statement produced.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// A read statement's rows.
    Rows(ResultSet),
    /// A read-mode statement that produced no result object.
    NoResult,
    /// A write statement's summary.
    Mutation(MutationSummary),
}

impl QueryOutcome {
    /// The result set, if the statement produced one.
    #[must_use]
    pub fn result_set(&self) -> Option<&ResultSet> {
        match self {
            QueryOutcome::Rows(rs) => Some(rs),
            QueryOutcome::NoResult | QueryOutcome::Mutation(_) => None,
        }
    }

    #[must_use]
    pub fn into_result_set(self) -> Option<ResultSet> {
        match self {
            QueryOutcome::Rows(rs) => Some(rs),
            QueryOutcome::NoResult | QueryOutcome::Mutation(_) => None,
        }
    }

    #[must_use]
    pub fn mutation(&self) -> Option<&MutationSummary> {
        match self {
            QueryOutcome::Mutation(summary) => Some(summary),
            QueryOutcome::Rows(_) | QueryOutcome::NoResult => None,
        }
    }
}
