//! Joining timesheet entries with task and worker metadata to price
//! each entry against the declared budgets

use std::collections::HashMap;

use crate::model::date::Date;
use crate::model::error::ReportError;
use crate::model::project::Project;

/// A timesheet entry enriched with its billing rate, task budget and
/// the derived cost figures
#[derive(Debug, Clone, PartialEq)]
pub struct CostRow {
    pub date: Date,
    pub task: String,
    pub worker: String,
    /// hours
    pub duration: f64,
    /// hourly rate of the matched worker
    pub rate: f64,
    /// budget of the matched task
    pub task_budget: f64,
    /// `duration * rate`
    pub cost: f64,
    pub cost_over_task_budget: f64,
    pub cost_over_project_budget: f64,
}

/// Join every timesheet entry with its task and worker and compute costs
///
/// Construction of the project guarantees that each entry finds exactly
/// one task and one worker, so the join is total: N entries in, N cost
/// rows out, in timesheet order.
pub fn compute_costs(project: &Project) -> Result<Vec<CostRow>, ReportError> {
    let entries = project.timesheet().ok_or(ReportError::MissingTimesheet)?;
    let rates: HashMap<&str, f64> = project
        .workers()
        .iter()
        .map(|w| (w.name.as_str(), w.rate))
        .collect();
    let budgets: HashMap<&str, f64> = project
        .tasks()
        .iter()
        .map(|t| (t.name.as_str(), t.budget))
        .collect();

    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        // both lookups are total by construction
        let rate = rates[entry.worker.as_str()];
        let task_budget = budgets[entry.task.as_str()];
        let cost = entry.duration * rate;
        rows.push(CostRow {
            date: entry.date,
            task: entry.task.clone(),
            worker: entry.worker.clone(),
            duration: entry.duration,
            rate,
            task_budget,
            cost,
            cost_over_task_budget: checked_ratio(cost, task_budget, || {
                format!("task '{}'", entry.task)
            })?,
            cost_over_project_budget: checked_ratio(cost, project.budget(), || {
                "the project".to_string()
            })?,
        });
    }
    Ok(rows)
}

/// Budget ratio with the uniform zero-denominator policy: a zero budget
/// is a typed failure, never a silent infinity
pub(crate) fn checked_ratio(
    cost: f64,
    budget: f64,
    scope: impl FnOnce() -> String,
) -> Result<f64, ReportError> {
    if budget == 0.0 {
        Err(ReportError::ZeroBudget { scope: scope() })
    } else {
        Ok(cost / budget)
    }
}
