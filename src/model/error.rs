//! Typed failure modes for table checks, project construction and reporting.
//!
//! Every error aborts the operation that raised it. Nothing here is retried
//! or accumulated: the first failing check wins and construction of a partial
//! result is impossible. The binary is the only place where these are
//! rendered for the user, the library itself never prints.

use thiserror::Error;

/// A labeled table failed one of the generic shape or type checks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The table has no rows at all.
    #[error("table has no rows")]
    Empty,
    /// The column-name set differs from the expected one.
    ///
    /// Extra columns and missing columns both land here: the schema match
    /// is exact, not a subset check.
    #[error("table should have exactly the columns {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// An empty cell where every cell must hold a value.
    #[error("missing value in column '{column}' (row {row})")]
    MissingValue { column: String, row: usize },
    /// A cell of a numeric column that was not coerced to a number at
    /// ingestion. A numeric-looking string still fails.
    #[error("non-numerical value '{value}' in column '{column}' (row {row})")]
    NonNumeric {
        column: String,
        value: String,
        row: usize,
    },
    /// A cell of a date column that was not coerced to a date at ingestion.
    #[error("non-date value '{value}' in column '{column}' (row {row})")]
    NonDate {
        column: String,
        value: String,
        row: usize,
    },
}

/// Ways in which a set of raw fields can fail to assemble into a `Project`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectError {
    /// One of the tasks/workers/timesheet tables failed a generic check.
    #[error("invalid {table} table: {source}")]
    Invalid {
        table: &'static str,
        source: ValidationError,
    },
    /// A textual project field is empty or whitespace.
    #[error("project {field} must not be blank")]
    BlankField { field: &'static str },
    /// The declared project budget is negative.
    #[error("project budget {0} is negative")]
    NegativeBudget(f64),
    /// Task budgets must sum to the declared project budget, exactly.
    #[error("task budgets sum to {actual} which does not equal the project budget of {declared}")]
    BudgetMismatch { actual: f64, declared: f64 },
    /// Two tasks or two workers share a name, which would break the
    /// one-match-per-entry property of the cost join.
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },
    /// The timesheet names tasks or workers the project does not declare.
    #[error("timesheet references {kind}s not declared by the project: {names:?}")]
    UnknownNames {
        kind: &'static str,
        names: Vec<String>,
    },
}

/// Ways in which a cost or summary query can fail on a valid project.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    /// Cost operations need a timesheet, which is an optional field.
    #[error("the project needs a timesheet for this operation")]
    MissingTimesheet,
    /// A cost ratio against a zero budget. Raised instead of returning an
    /// infinite or undefined ratio; applies to task and project budgets
    /// alike.
    #[error("{scope} has a zero budget, cost ratios against it are undefined")]
    ZeroBudget { scope: String },
}
