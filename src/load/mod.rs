//! Ingestion of project configurations and timesheets
//!
//! This layer owns all file reads and all text-to-value coercion; the
//! engine in `model` only ever sees labeled tables of tagged values.
//! Coercion failures are deliberately not errors here: a cell that does
//! not parse keeps its source text and is rejected later by the typed
//! table checks, with a better message than a parser could give.

pub mod config;
pub mod timesheet;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::date::Date;
use crate::model::error::ProjectError;
use crate::model::project::{Project, RawProject};
use crate::model::table::{Table, Value};

/// Ways in which reading a project off the disk can fail
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The delimited-text layout itself is broken (ragged row, no header)
    #[error("malformed {table} table: {reason}")]
    Layout {
        table: &'static str,
        reason: String,
    },
    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// Declared type of a column, directing cell coercion
#[derive(Debug, Clone, Copy)]
pub(crate) enum Kind {
    Text,
    Number,
    Date,
}

/// Parse a delimited-text block into a labeled table
///
/// The first non-blank line is the header; cells are comma-separated
/// with no quoting. Each cell is coerced according to the declared kind
/// of its column (default text); an empty cell becomes [`Value::Missing`]
/// and a failed coercion keeps the source text for the checks to reject.
pub(crate) fn parse_table(
    src: &str,
    table: &'static str,
    kinds: &[(&str, Kind)],
) -> Result<Table, LoadError> {
    let mut lines = src.lines().map(str::trim).filter(|l| !l.is_empty());
    let header = lines.next().ok_or_else(|| LoadError::Layout {
        table,
        reason: "missing header line".to_string(),
    })?;
    let labels: Vec<String> = header.split(',').map(|l| l.trim().to_string()).collect();
    let kind_of = |label: &str| {
        kinds
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, k)| *k)
            .unwrap_or(Kind::Text)
    };
    let mut out = Table::new(labels.clone());
    for (row, line) in lines.enumerate() {
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        if cells.len() != labels.len() {
            return Err(LoadError::Layout {
                table,
                reason: format!(
                    "row {} has {} cells where the header has {}",
                    row,
                    cells.len(),
                    labels.len()
                ),
            });
        }
        out.push_row(
            cells
                .iter()
                .zip(&labels)
                .map(|(cell, label)| coerce(cell, kind_of(label)))
                .collect(),
        );
    }
    Ok(out)
}

fn coerce(cell: &str, kind: Kind) -> Value {
    if cell.is_empty() {
        return Value::Missing;
    }
    match kind {
        Kind::Text => Value::Text(cell.to_string()),
        Kind::Number => match cell.parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Text(cell.to_string()),
        },
        Kind::Date => match cell.parse::<Date>() {
            Ok(d) => Value::Date(d),
            Err(_) => Value::Text(cell.to_string()),
        },
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a YAML configuration and an optional timesheet, validate them,
/// and assemble the project
pub fn read_project(
    config_path: &Path,
    timesheet_path: Option<&Path>,
) -> Result<Project, LoadError> {
    let mut raw: RawProject = config::parse_config(&read(config_path)?)?;
    if let Some(path) = timesheet_path {
        raw.timesheet = Some(timesheet::parse_timesheet(&read(path)?)?);
    }
    Ok(Project::build(raw)?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn coercion_follows_declared_kinds() {
        let src = "task,budget\nInception,2000\nContext,oops\n";
        let t = parse_table(src, "tasks", &[("budget", Kind::Number)]).unwrap();
        assert_eq!(t.len(), 2);
        let budgets: Vec<_> = t.column("budget").unwrap().collect();
        assert_eq!(budgets[0], &Value::Number(2000.0));
        // failed coercion keeps the text for the checks to reject
        assert_eq!(budgets[1], &Value::Text("oops".to_string()));
        // undeclared columns stay textual even when numeric-looking
        let src = "task,budget\n2000,2000\n";
        let t = parse_table(src, "tasks", &[("budget", Kind::Number)]).unwrap();
        let names: Vec<_> = t.column("task").unwrap().collect();
        assert_eq!(names[0], &Value::Text("2000".to_string()));
    }

    #[test]
    fn empty_cells_become_missing() {
        let src = "task,budget\nInception,\n";
        let t = parse_table(src, "tasks", &[("budget", Kind::Number)]).unwrap();
        assert_eq!(t.column("budget").unwrap().next(), Some(&Value::Missing));
    }

    #[test]
    fn ragged_rows_are_layout_errors() {
        let src = "task,budget\nInception\n";
        match parse_table(src, "tasks", &[]) {
            Err(LoadError::Layout { table: "tasks", .. }) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn header_is_required() {
        match parse_table("  \n\n", "workers", &[]) {
            Err(LoadError::Layout { reason, .. }) => {
                assert!(reason.contains("header"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn blank_lines_are_skipped() {
        let src = "\ntask,budget\n\nInception,2000\n\n";
        let t = parse_table(src, "tasks", &[("budget", Kind::Number)]).unwrap();
        assert_eq!(t.len(), 1);
    }
}
