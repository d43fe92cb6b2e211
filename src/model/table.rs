//! Labeled tables of tagged cell values, and the generic shape checks
//! applied to them before a project is assembled
//!
//! Ingestion coerces cells into [`Value`]s; the checks below then turn
//! malformed coercions into typed failures. They compose by sequential
//! application and the first failing check wins.

use std::fmt;

use crate::model::date::Date;
use crate::model::error::ValidationError;

/// A single cell of a labeled table
///
/// The tag records what the ingestion boundary managed to make of the
/// source text: declared numeric columns hold [`Value::Number`] only if
/// the text parsed as a number, and likewise for dates. A cell that kept
/// its source text in a typed column is exactly what `require_numeric`
/// and `require_dates` reject.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Date(Date),
    /// An empty cell in the source document
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<Date> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Date(d) => write!(f, "{}", d),
            Value::Missing => Ok(()),
        }
    }
}

/// A table of cell values with one label per column
///
/// Row order is the order of the source document and is preserved by
/// every downstream operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    labels: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            rows: Vec::new(),
        }
    }

    /// Append a row, which must be as wide as the label list
    pub fn push_row(&mut self, row: Vec<Value>) {
        assert_eq!(row.len(), self.labels.len(), "row width must match labels");
        self.rows.push(row);
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Iterate over the cells of the named column, top to bottom
    pub fn column<'t>(&'t self, label: &str) -> Option<impl Iterator<Item = &'t Value>> {
        let idx = self.labels.iter().position(|l| l == label)?;
        Some(self.rows.iter().map(move |r| &r[idx]))
    }
}

/// Fail on a table with zero rows
pub fn require_nonempty(table: &Table) -> Result<(), ValidationError> {
    if table.is_empty() {
        Err(ValidationError::Empty)
    } else {
        Ok(())
    }
}

/// Fail unless the label set equals `expected` exactly
///
/// Extra and missing columns both fail: this is a strict schema match,
/// not a subset check. Column order is irrelevant.
pub fn require_columns(table: &Table, expected: &[&str]) -> Result<(), ValidationError> {
    let mut found: Vec<&str> = table.labels.iter().map(|l| l.as_str()).collect();
    let mut wanted: Vec<&str> = expected.to_vec();
    found.sort_unstable();
    found.dedup();
    wanted.sort_unstable();
    if found != wanted {
        Err(ValidationError::SchemaMismatch {
            expected: expected.iter().map(|s| s.to_string()).collect(),
            found: table.labels.clone(),
        })
    } else {
        Ok(())
    }
}

/// Fail on the first empty cell of any column
pub fn require_no_missing(table: &Table) -> Result<(), ValidationError> {
    for (idx, label) in table.labels.iter().enumerate() {
        for (row, cells) in table.rows.iter().enumerate() {
            if cells[idx].is_missing() {
                return Err(ValidationError::MissingValue {
                    column: label.clone(),
                    row,
                });
            }
        }
    }
    Ok(())
}

/// Fail on the first cell of the named column that is not a number
///
/// A numeric-looking string fails: coercion is the ingestion boundary's
/// job and this check only inspects the tag.
pub fn require_numeric(table: &Table, label: &str) -> Result<(), ValidationError> {
    // absence of the column is require_columns territory
    let column = match table.column(label) {
        Some(column) => column,
        None => return Ok(()),
    };
    for (row, cell) in column.enumerate() {
        if cell.as_number().is_none() {
            return Err(ValidationError::NonNumeric {
                column: label.to_string(),
                value: cell.to_string(),
                row,
            });
        }
    }
    Ok(())
}

/// Fail on the first cell of the named column that is not a date
pub fn require_dates(table: &Table, label: &str) -> Result<(), ValidationError> {
    let column = match table.column(label) {
        Some(column) => column,
        None => return Ok(()),
    };
    for (row, cell) in column.enumerate() {
        if cell.as_date().is_none() {
            return Err(ValidationError::NonDate {
                column: label.to_string(),
                value: cell.to_string(),
                row,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn txt(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn sample() -> Table {
        let mut t = Table::new(vec!["task".to_string(), "budget".to_string()]);
        t.push_row(vec![txt("Inception"), Value::Number(2000.0)]);
        t.push_row(vec![txt("Solutions"), Value::Number(10000.0)]);
        t
    }

    #[test]
    fn nonempty() {
        assert_eq!(require_nonempty(&sample()), Ok(()));
        let empty = Table::new(vec!["task".to_string()]);
        assert_eq!(require_nonempty(&empty), Err(ValidationError::Empty));
    }

    #[test]
    fn columns_exact() {
        let t = sample();
        assert_eq!(require_columns(&t, &["task", "budget"]), Ok(()));
        // order does not matter, the set does
        assert_eq!(require_columns(&t, &["budget", "task"]), Ok(()));
        assert!(require_columns(&t, &["task"]).is_err());
        assert!(require_columns(&t, &["task", "budget", "rate"]).is_err());
        assert!(require_columns(&t, &["worker", "rate"]).is_err());
    }

    #[test]
    fn no_missing() {
        let mut t = sample();
        assert_eq!(require_no_missing(&t), Ok(()));
        t.push_row(vec![txt("Context"), Value::Missing]);
        assert_eq!(
            require_no_missing(&t),
            Err(ValidationError::MissingValue {
                column: "budget".to_string(),
                row: 2,
            })
        );
    }

    #[test]
    fn numeric_tags_only() {
        let mut t = sample();
        assert_eq!(require_numeric(&t, "budget"), Ok(()));
        // a numeric-looking string is still a failure
        t.push_row(vec![txt("Context"), txt("3000")]);
        assert_eq!(
            require_numeric(&t, "budget"),
            Err(ValidationError::NonNumeric {
                column: "budget".to_string(),
                value: "3000".to_string(),
                row: 2,
            })
        );
    }

    #[test]
    fn date_tags_only() {
        let mut t = Table::new(vec!["date".to_string()]);
        t.push_row(vec![Value::Date("2017-04-03".parse().unwrap())]);
        assert_eq!(require_dates(&t, "date"), Ok(()));
        t.push_row(vec![txt("2017-04-99")]);
        assert_eq!(
            require_dates(&t, "date"),
            Err(ValidationError::NonDate {
                column: "date".to_string(),
                value: "2017-04-99".to_string(),
                row: 1,
            })
        );
    }
}
