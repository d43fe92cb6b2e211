//! Box-drawing text rendering of cost and summary tables
//!
//! The grid adapts its column set to the summary query: key columns
//! come first, then the aggregates, with the conditional columns only
//! present when the corresponding grouping is in effect.

use std::fmt;

use crate::model::cost::CostRow;
use crate::model::summary::{Query, SummaryRow};

/// A renderable grid of pre-formatted cells
pub struct Grid {
    title: String,
    headers: Vec<&'static str>,
    /// alignment per column, labels left and figures right
    left: Vec<bool>,
    rows: Vec<Vec<String>>,
}

fn hours(v: f64) -> String {
    format!("{:.2}", v)
}

fn money(v: f64) -> String {
    format!("{:.2}", v)
}

fn ratio(v: f64) -> String {
    format!("{:.4}", v)
}

impl Grid {
    /// Lay out summary rows according to the query that produced them
    pub fn from_summary(query: Query, rows: &[SummaryRow]) -> Self {
        let mut headers = Vec::new();
        let mut left = Vec::new();
        let mut push = |h, l| {
            headers.push(h);
            left.push(l);
        };
        if query.bucket.is_some() {
            push("period", true);
        }
        if query.by_task {
            push("task", true);
        }
        if query.by_worker {
            push("worker", true);
        }
        push("duration", false);
        if query.by_worker {
            push("rate", false);
        }
        push("cost", false);
        if query.by_task {
            push("task budget", false);
            push("cost/task budget", false);
        }
        push("cost/project budget", false);

        let rows = rows
            .iter()
            .map(|row| {
                let mut cells = Vec::new();
                if query.bucket.is_some() {
                    cells.push(row.bucket.map(|d| d.to_string()).unwrap_or_default());
                }
                if query.by_task {
                    cells.push(row.task.clone().unwrap_or_default());
                }
                if query.by_worker {
                    cells.push(row.worker.clone().unwrap_or_default());
                }
                cells.push(hours(row.duration));
                if query.by_worker {
                    cells.push(row.rate.map(money).unwrap_or_default());
                }
                cells.push(money(row.cost));
                if query.by_task {
                    cells.push(row.task_budget.map(money).unwrap_or_default());
                    cells.push(row.cost_over_task_budget.map(ratio).unwrap_or_default());
                }
                cells.push(ratio(row.cost_over_project_budget));
                cells
            })
            .collect();
        Self {
            title: String::new(),
            headers,
            left,
            rows,
        }
    }

    /// Lay out the per-entry cost rows of the join
    pub fn from_costs(rows: &[CostRow]) -> Self {
        let headers = vec![
            "date",
            "task",
            "worker",
            "duration",
            "rate",
            "cost",
            "task budget",
            "cost/task budget",
            "cost/project budget",
        ];
        let left = vec![true, true, true, false, false, false, false, false, false];
        let rows = rows
            .iter()
            .map(|row| {
                vec![
                    row.date.to_string(),
                    row.task.clone(),
                    row.worker.clone(),
                    hours(row.duration),
                    money(row.rate),
                    money(row.cost),
                    money(row.task_budget),
                    ratio(row.cost_over_task_budget),
                    ratio(row.cost_over_project_budget),
                ]
            })
            .collect();
        Self {
            title: String::new(),
            headers,
            left,
            rows,
        }
    }

    pub fn with_title<S: ToString>(mut self, title: S) -> Self {
        self.title = title.to_string();
        self
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }
        widths
    }

    fn rule(
        &self,
        f: &mut fmt::Formatter,
        widths: &[usize],
        (open, join, close): (&str, &str, &str),
    ) -> fmt::Result {
        write!(f, "{}", open)?;
        for (i, w) in widths.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", join)?;
            }
            write!(f, "{}", HLINE.repeat(w + 2))?;
        }
        writeln!(f, "{}", close)
    }

    fn line<'c>(
        &self,
        f: &mut fmt::Formatter,
        widths: &[usize],
        cells: impl Iterator<Item = &'c str>,
    ) -> fmt::Result {
        for ((w, left), cell) in widths.iter().zip(&self.left).zip(cells) {
            let pad = " ".repeat(w - cell.chars().count());
            if *left {
                write!(f, "{} {}{} ", VLINE, cell, pad)?;
            } else {
                write!(f, "{} {}{} ", VLINE, pad, cell)?;
            }
        }
        writeln!(f, "{}", VLINE)
    }
}

const HLINE: &str = "─";
const VLINE: &str = "│";

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.title.is_empty() {
            writeln!(f, "{}", self.title)?;
        }
        let widths = self.widths();
        self.rule(f, &widths, ("┌", "┬", "┐"))?;
        self.line(f, &widths, self.headers.iter().copied())?;
        self.rule(f, &widths, ("├", "┼", "┤"))?;
        for row in &self.rows {
            self.line(f, &widths, row.iter().map(|c| c.as_str()))?;
        }
        self.rule(f, &widths, ("└", "┴", "┘"))
    }
}
