//! Grouped aggregation of cost rows over an optional calendar bucket
//! and the task/worker dimensions

use std::collections::BTreeMap;

use crate::model::cost::{checked_ratio, compute_costs};
use crate::model::date::{Date, Frequency};
use crate::model::error::ReportError;
use crate::model::project::Project;

/// Which grouping keys a summary is computed over
///
/// The plan fixes the shape of the resulting rows: every key and every
/// conditional column of [`SummaryRow`] is populated if and only if the
/// corresponding dimension is requested here. An all-default query means
/// one aggregate row over the whole timesheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Query {
    pub by_task: bool,
    pub by_worker: bool,
    pub bucket: Option<Frequency>,
}

/// One aggregated row, keyed by the requested grouping dimensions
///
/// `duration` and `cost` are sums over the group. The ratios are
/// re-derived from the summed cost, never summed from row-level ratios.
/// `rate` is the single rate shared by the group and is only populated
/// when grouping by worker, where rate-homogeneity is guaranteed;
/// likewise `task_budget` requires grouping by task.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// start date of the calendar period, when bucketing was requested
    pub bucket: Option<Date>,
    pub task: Option<String>,
    pub worker: Option<String>,
    pub duration: f64,
    pub cost: f64,
    pub rate: Option<f64>,
    pub task_budget: Option<f64>,
    pub cost_over_task_budget: Option<f64>,
    pub cost_over_project_budget: f64,
}

/// Aggregate the project's cost rows over the query's grouping keys
///
/// Rows come out sorted by key tuple: bucket start ascending first,
/// then task, then worker.
pub fn summarize(project: &Project, query: Query) -> Result<Vec<SummaryRow>, ReportError> {
    struct Acc {
        duration: f64,
        cost: f64,
        // taken from the first row of the group, see SummaryRow
        rate: f64,
        task_budget: f64,
    }

    let mut groups: BTreeMap<(Option<Date>, Option<String>, Option<String>), Acc> =
        BTreeMap::new();
    for row in compute_costs(project)? {
        let key = (
            query.bucket.map(|freq| freq.bucket(row.date)),
            query.by_task.then(|| row.task.clone()),
            query.by_worker.then(|| row.worker.clone()),
        );
        let acc = groups.entry(key).or_insert(Acc {
            duration: 0.0,
            cost: 0.0,
            rate: row.rate,
            task_budget: row.task_budget,
        });
        acc.duration += row.duration;
        acc.cost += row.cost;
    }

    let mut rows = Vec::with_capacity(groups.len());
    for ((bucket, task, worker), acc) in groups {
        let cost_over_task_budget = match &task {
            Some(name) => Some(checked_ratio(acc.cost, acc.task_budget, || {
                format!("task '{}'", name)
            })?),
            None => None,
        };
        let cost_over_project_budget =
            checked_ratio(acc.cost, project.budget(), || "the project".to_string())?;
        rows.push(SummaryRow {
            bucket,
            task,
            worker,
            duration: acc.duration,
            cost: acc.cost,
            rate: query.by_worker.then_some(acc.rate),
            task_budget: query.by_task.then_some(acc.task_budget),
            cost_over_task_budget,
            cost_over_project_budget,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::project::test::{fixture, timesheet_table};
    use crate::model::table::Table;

    fn sheet() -> Table {
        timesheet_table(&[
            ("2017-04-03", "Inception", "Captain Chi", 3.0),
            ("2017-04-04", "Inception", "Dragon Ma", 2.0),
            ("2017-04-12", "Context", "Captain Chi", 4.0),
            ("2017-05-02", "Context", "Captain Chi", 1.0),
        ])
    }

    #[test]
    fn whole_timesheet_collapses_to_one_row() {
        let project = fixture(Some(sheet()));
        let rows = summarize(&project, Query::default()).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.duration, 10.0);
        // 600 + 380 + 800 + 200
        assert_eq!(row.cost, 1980.0);
        assert_eq!(row.cost_over_project_budget, 1980.0 / 40000.0);
        assert_eq!(row.bucket, None);
        assert_eq!(row.task, None);
        assert_eq!(row.worker, None);
        assert_eq!(row.rate, None);
        assert_eq!(row.task_budget, None);
        assert_eq!(row.cost_over_task_budget, None);
    }

    #[test]
    fn by_task_rederives_ratios_from_summed_cost() {
        // two entries, same task, different workers and rates
        let project = fixture(Some(timesheet_table(&[
            ("2017-04-03", "Inception", "Captain Chi", 3.0),
            ("2017-04-04", "Inception", "Dragon Ma", 2.0),
        ])));
        let rows = summarize(
            &project,
            Query {
                by_task: true,
                ..Query::default()
            },
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.task.as_deref(), Some("Inception"));
        assert_eq!(row.duration, 5.0);
        assert_eq!(row.cost, 980.0);
        // group cost over task budget, not a sum of row-level ratios
        assert_eq!(row.cost_over_task_budget, Some(980.0 / 2000.0));
        assert_eq!(row.cost_over_project_budget, 980.0 / 40000.0);
        // mixed-worker group: no single rate to report
        assert_eq!(row.rate, None);
        assert_eq!(row.task_budget, Some(2000.0));
    }

    #[test]
    fn by_worker_reports_the_rate() {
        let project = fixture(Some(sheet()));
        let rows = summarize(
            &project,
            Query {
                by_worker: true,
                ..Query::default()
            },
        )
        .unwrap();
        // sorted lexicographically by worker name
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].worker.as_deref(), Some("Captain Chi"));
        assert_eq!(rows[0].rate, Some(200.0));
        assert_eq!(rows[0].duration, 8.0);
        assert_eq!(rows[1].worker.as_deref(), Some("Dragon Ma"));
        assert_eq!(rows[1].rate, Some(190.0));
        // task columns are dropped without a task grouping
        assert_eq!(rows[0].task_budget, None);
        assert_eq!(rows[0].cost_over_task_budget, None);
    }

    #[test]
    fn monthly_buckets_label_period_starts() {
        let project = fixture(Some(sheet()));
        let rows = summarize(
            &project,
            Query {
                bucket: Some(Frequency::Monthly),
                ..Query::default()
            },
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bucket, Some("2017-04-01".parse().unwrap()));
        assert_eq!(rows[0].duration, 9.0);
        assert_eq!(rows[1].bucket, Some("2017-05-01".parse().unwrap()));
        assert_eq!(rows[1].duration, 1.0);
    }

    #[test]
    fn weekly_buckets_start_on_monday() {
        let project = fixture(Some(sheet()));
        let rows = summarize(
            &project,
            Query {
                bucket: Some(Frequency::Weekly),
                by_task: true,
                ..Query::default()
            },
        )
        .unwrap();
        // weeks of Apr 3, Apr 10 and May 1, with tasks split within a week
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].bucket, Some("2017-04-03".parse().unwrap()));
        assert_eq!(rows[0].task.as_deref(), Some("Inception"));
        assert_eq!(rows[1].bucket, Some("2017-04-10".parse().unwrap()));
        assert_eq!(rows[1].task.as_deref(), Some("Context"));
        assert_eq!(rows[2].bucket, Some("2017-05-01".parse().unwrap()));
    }

    #[test]
    fn keys_sort_bucket_then_task_then_worker() {
        let project = fixture(Some(sheet()));
        let rows = summarize(
            &project,
            Query {
                by_task: true,
                by_worker: true,
                bucket: Some(Frequency::Monthly),
            },
        )
        .unwrap();
        let keys: Vec<_> = rows
            .iter()
            .map(|r| {
                (
                    r.bucket.unwrap(),
                    r.task.clone().unwrap(),
                    r.worker.clone().unwrap(),
                )
            })
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(rows.len(), 4);
        // every key combination carries a single homogeneous rate
        for row in &rows {
            assert!(row.rate.is_some());
            assert!(row.task_budget.is_some());
        }
    }

    #[test]
    fn missing_timesheet_fails_every_query() {
        let project = fixture(None);
        for by_task in [false, true] {
            for by_worker in [false, true] {
                for bucket in [None, Some(Frequency::Weekly), Some(Frequency::Monthly)] {
                    let query = Query {
                        by_task,
                        by_worker,
                        bucket,
                    };
                    assert_eq!(
                        summarize(&project, query),
                        Err(ReportError::MissingTimesheet)
                    );
                }
            }
        }
    }
}
