//! The project aggregate and the consistency invariants enforced when
//! one is assembled from raw configuration fields
//!
//! A [`Project`] can only be obtained through [`Project::build`], which
//! runs every check; there is no partially-constructed project and no
//! in-place mutation of a validated one. "Modifying" a project means
//! re-validating a new set of raw fields from scratch.

use std::collections::HashSet;

use crate::model::date::Date;
use crate::model::error::{ProjectError, ValidationError};
use crate::model::table::{
    require_columns, require_dates, require_no_missing, require_nonempty, require_numeric, Table,
    Value,
};

/// A unit of billable work with its own sub-budget
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub name: String,
    pub budget: f64,
}

/// A biller with an hourly rate
#[derive(Debug, Clone, PartialEq)]
pub struct Worker {
    pub name: String,
    pub rate: f64,
}

/// One dated timesheet line: a worker's duration spent on a task
///
/// Task and worker are name references into the project's declared
/// tables, not ownership links; construction guarantees they resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub date: Date,
    pub task: String,
    pub worker: String,
    /// hours
    pub duration: f64,
}

/// The raw field set produced by configuration ingestion
///
/// This is the exact input surface of [`Project::build`]: scalar fields
/// straight out of the configuration file, plus the tasks/workers tables
/// and the optional timesheet table with cells already coerced.
#[derive(Debug, Clone)]
pub struct RawProject {
    pub name: String,
    pub description: String,
    pub client: String,
    pub budget: f64,
    pub currency: String,
    pub tasks: Table,
    pub workers: Table,
    pub timesheet: Option<Table>,
}

/// A validated billing project, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    name: String,
    description: String,
    client: String,
    budget: f64,
    currency: String,
    tasks: Vec<Task>,
    workers: Vec<Worker>,
    timesheet: Option<Vec<Entry>>,
}

impl Project {
    /// Validate raw fields into a project
    ///
    /// Validators run in a fixed order (scalars, tasks, workers,
    /// timesheet) and the first failure aborts construction.
    pub fn build(raw: RawProject) -> Result<Self, ProjectError> {
        let name = check_text("name", raw.name)?;
        let description = check_text("description", raw.description)?;
        let client = check_text("client", raw.client)?;
        let currency = check_text("currency", raw.currency)?;
        if raw.budget < 0.0 {
            return Err(ProjectError::NegativeBudget(raw.budget));
        }
        let tasks = validate_tasks(&raw.tasks, raw.budget)?;
        let workers = validate_workers(&raw.workers)?;
        let timesheet = validate_timesheet(raw.timesheet.as_ref(), &tasks, &workers)?;
        Ok(Self {
            name,
            description,
            client,
            budget: raw.budget,
            currency,
            tasks,
            workers,
            timesheet,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Total authorized spend, equal to the sum of the task budgets
    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// The timesheet entries, if a timesheet was provided
    pub fn timesheet(&self) -> Option<&[Entry]> {
        self.timesheet.as_deref()
    }
}

fn check_text(field: &'static str, value: String) -> Result<String, ProjectError> {
    if value.trim().is_empty() {
        Err(ProjectError::BlankField { field })
    } else {
        Ok(value)
    }
}

fn invalid(table: &'static str) -> impl Fn(ValidationError) -> ProjectError {
    move |source| ProjectError::Invalid { table, source }
}

/// Check the tasks table and convert it into [`Task`]s
///
/// Enforces the shape checks, uniqueness of task names, and the exact
/// equality of the budget sum with the declared project budget. The
/// equality has no tolerance: `2000.01 + 0.02` of drift is a failure.
pub fn validate_tasks(table: &Table, project_budget: f64) -> Result<Vec<Task>, ProjectError> {
    let err = invalid("tasks");
    require_nonempty(table).map_err(&err)?;
    require_columns(table, &["task", "budget"]).map_err(&err)?;
    require_no_missing(table).map_err(&err)?;
    require_numeric(table, "budget").map_err(&err)?;

    let mut tasks = Vec::with_capacity(table.len());
    let mut seen = HashSet::new();
    for row in table.rows() {
        let (name, budget) = task_fields(table, row);
        if !seen.insert(name.clone()) {
            return Err(ProjectError::DuplicateName { kind: "task", name });
        }
        tasks.push(Task { name, budget });
    }

    let actual: f64 = tasks.iter().map(|t| t.budget).sum();
    if actual != project_budget {
        return Err(ProjectError::BudgetMismatch {
            actual,
            declared: project_budget,
        });
    }
    Ok(tasks)
}

/// Check the workers table and convert it into [`Worker`]s
pub fn validate_workers(table: &Table) -> Result<Vec<Worker>, ProjectError> {
    let err = invalid("workers");
    require_nonempty(table).map_err(&err)?;
    require_columns(table, &["worker", "rate"]).map_err(&err)?;
    require_no_missing(table).map_err(&err)?;
    require_numeric(table, "rate").map_err(&err)?;

    let mut workers = Vec::with_capacity(table.len());
    let mut seen = HashSet::new();
    for row in table.rows() {
        let name = cell(table, row, "worker").to_string();
        let rate = number(table, row, "rate");
        if !seen.insert(name.clone()) {
            return Err(ProjectError::DuplicateName {
                kind: "worker",
                name,
            });
        }
        workers.push(Worker { name, rate });
    }
    Ok(workers)
}

/// Check the timesheet table against the validated tasks and workers
/// and convert it into [`Entry`]s
///
/// An absent timesheet is returned unchanged: a project may exist
/// without one. The reference checks run in two passes, tasks first;
/// when both would fail, the task failure is the one surfaced.
pub fn validate_timesheet(
    table: Option<&Table>,
    tasks: &[Task],
    workers: &[Worker],
) -> Result<Option<Vec<Entry>>, ProjectError> {
    let table = match table {
        None => return Ok(None),
        Some(table) => table,
    };
    let err = invalid("timesheet");
    require_nonempty(table).map_err(&err)?;
    require_columns(table, &["date", "task", "worker", "duration"]).map_err(&err)?;
    require_no_missing(table).map_err(&err)?;
    require_numeric(table, "duration").map_err(&err)?;
    require_dates(table, "date").map_err(&err)?;

    let known: HashSet<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
    check_references(table, "task", &known)?;
    let known: HashSet<&str> = workers.iter().map(|w| w.name.as_str()).collect();
    check_references(table, "worker", &known)?;

    let mut entries = Vec::with_capacity(table.len());
    for row in table.rows() {
        entries.push(Entry {
            date: date(table, row, "date"),
            task: cell(table, row, "task").to_string(),
            worker: cell(table, row, "worker").to_string(),
            duration: number(table, row, "duration"),
        });
    }
    Ok(Some(entries))
}

/// Set difference of the column's names against the declared ones
fn check_references(
    table: &Table,
    kind: &'static str,
    known: &HashSet<&str>,
) -> Result<(), ProjectError> {
    let mut unknown: Vec<String> = table
        .column(kind)
        .into_iter()
        .flatten()
        .map(|cell| cell.to_string())
        .filter(|name| !known.contains(name.as_str()))
        .collect();
    unknown.sort();
    unknown.dedup();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(ProjectError::UnknownNames {
            kind,
            names: unknown,
        })
    }
}

// The accessors below run after the shape checks, so a mismatched cell
// tag is a broken sequencing contract, not an input error.

fn cell<'r>(table: &Table, row: &'r [Value], label: &str) -> &'r Value {
    let idx = table
        .labels()
        .iter()
        .position(|l| l == label)
        .unwrap_or_else(|| unreachable!("column '{}' checked by require_columns", label));
    &row[idx]
}

fn number(table: &Table, row: &[Value], label: &str) -> f64 {
    match cell(table, row, label) {
        Value::Number(n) => *n,
        _ => unreachable!("column '{}' checked by require_numeric", label),
    }
}

fn date(table: &Table, row: &[Value], label: &str) -> Date {
    match cell(table, row, label) {
        Value::Date(d) => *d,
        _ => unreachable!("column '{}' checked by require_dates", label),
    }
}

fn task_fields(table: &Table, row: &[Value]) -> (String, f64) {
    (
        cell(table, row, "task").to_string(),
        number(table, row, "budget"),
    )
}
