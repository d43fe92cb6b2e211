//! SVG rendering of cost against the project budget
//!
//! One stacked column per calendar bucket, one segment per task, with
//! segment heights measuring cost as a percentage of the project budget
//! and a reference line where the full budget sits.

use svg::node::element::{Line, Rectangle, Text};
use svg::node::Text as Label;
use svg::Document;

use crate::model::summary::SummaryRow;

pub struct Plotter<'d> {
    rows: &'d [SummaryRow],
}

/// One stacked column: its axis label and the percentage span of each
/// task segment
struct Column {
    label: String,
    segments: Vec<(usize, f64, f64)>,
}

impl<'d> Plotter<'d> {
    /// Expects rows grouped by task, optionally bucketed; anything else
    /// collapses into a single unlabeled column
    pub fn from(rows: &'d [SummaryRow]) -> Self {
        Self { rows }
    }

    /// Write the stacked cost chart to `file`
    pub fn render(&self, file: &str) -> std::io::Result<()> {
        let mut tasks: Vec<&str> = self
            .rows
            .iter()
            .filter_map(|r| r.task.as_deref())
            .collect();
        tasks.sort_unstable();
        tasks.dedup();

        let columns = self.columns(&tasks);
        let peak = columns
            .iter()
            .map(|c| c.segments.last().map(|s| s.2).unwrap_or(0.0))
            .fold(100.0, f64::max);

        let fwidth = 1000.0;
        let fheight = 700.0;
        let margin = 40.0;
        let slot = fwidth / columns.len().max(1) as f64;
        let resize_y = |pct: f64| fheight - pct / peak * fheight;

        let mut document = Document::new().set(
            "viewBox",
            (
                -margin,
                -margin,
                fwidth + 2.0 * margin,
                fheight + 2.0 * margin,
            ),
        );
        for (i, column) in columns.iter().enumerate() {
            let x = i as f64 * slot + slot * 0.1;
            for &(task, lo, hi) in &column.segments {
                document = document.add(
                    Rectangle::new()
                        .set("x", x)
                        .set("y", resize_y(hi))
                        .set("width", slot * 0.8)
                        .set("height", resize_y(lo) - resize_y(hi))
                        .set("fill", COLORS[task % COLORS.len()])
                        .set("stroke", "#333")
                        .set("stroke-width", 1),
                );
            }
            document = document.add(
                Text::new()
                    .add(Label::new(column.label.clone()))
                    .set("x", x + slot * 0.4)
                    .set("y", fheight + 24.0)
                    .set("font-size", 14)
                    .set("text-anchor", "middle"),
            );
        }

        let budget = Line::new()
            .set("x1", 0.0)
            .set("x2", fwidth)
            .set("y1", resize_y(100.0))
            .set("y2", resize_y(100.0))
            .set("stroke", "red")
            .set("stroke-width", 2.0);
        let xaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", fwidth)
            .set("y1", fheight)
            .set("y2", fheight)
            .set("stroke", "black")
            .set("stroke-width", 2.0);
        let yaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", 0.0)
            .set("y1", 0.0)
            .set("y2", fheight)
            .set("stroke", "black")
            .set("stroke-width", 2.0);
        let document = document.add(budget).add(xaxis).add(yaxis);
        svg::save(file, &document)
    }

    /// Stack the rows into columns, one per bucket, in row order
    fn columns(&self, tasks: &[&str]) -> Vec<Column> {
        let mut columns: Vec<Column> = Vec::new();
        let mut current: Option<&SummaryRow> = None;
        for row in self.rows {
            let fresh = match (current, row.bucket) {
                (None, _) => true,
                (Some(prev), bucket) => prev.bucket != bucket,
            };
            if fresh {
                columns.push(Column {
                    label: row
                        .bucket
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "total".to_string()),
                    segments: Vec::new(),
                });
            }
            current = Some(row);
            let column = columns.last_mut().unwrap();
            let lo = column.segments.last().map(|s| s.2).unwrap_or(0.0);
            let pct = row.cost_over_project_budget * 100.0;
            let task = row
                .task
                .as_deref()
                .and_then(|name| tasks.iter().position(|t| *t == name))
                .unwrap_or(0);
            column.segments.push((task, lo, lo + pct));
        }
        columns
    }
}

const COLORS: &[&str] = &[
    "#4e79a7", "#f28e2b", "#59a14f", "#e15759", "#b07aa1", "#edc948", "#76b7b2",
];
