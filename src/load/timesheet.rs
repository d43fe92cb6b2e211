//! Delimited-text timesheet ingestion
//!
//! A timesheet is a plain comma-separated file with one dated work
//! entry per line:
//!
//! ```text
//! date,task,worker,duration
//! 2017-04-03,Inception,Captain Chi,3
//! 2017-04-03,Context,Dragon Ma,1.5
//! ```
//!
//! Dates are `YYYY-MM-DD`, durations are hours. Only the layout is
//! handled here; schema and referential checks belong to the validator.

use crate::load::{parse_table, Kind, LoadError};
use crate::model::table::Table;

/// Parse a delimited-text timesheet into a labeled table
pub fn parse_timesheet(src: &str) -> Result<Table, LoadError> {
    parse_table(
        src,
        "timesheet",
        &[("date", Kind::Date), ("duration", Kind::Number)],
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::table::Value;

    #[test]
    fn dates_and_durations_are_typed() {
        let src = "date,task,worker,duration\n2017-04-03,Inception,Captain Chi,3\n";
        let t = parse_timesheet(src).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(
            t.column("date").unwrap().next(),
            Some(&Value::Date("2017-04-03".parse().unwrap()))
        );
        assert_eq!(t.column("duration").unwrap().next(), Some(&Value::Number(3.0)));
        assert_eq!(
            t.column("worker").unwrap().next(),
            Some(&Value::Text("Captain Chi".to_string()))
        );
    }

    #[test]
    fn bad_dates_stay_textual() {
        let src = "date,task,worker,duration\n2017-04-99,Inception,Captain Chi,3\n";
        let t = parse_timesheet(src).unwrap();
        // kept as text, rejected later by the date check
        assert_eq!(
            t.column("date").unwrap().next(),
            Some(&Value::Text("2017-04-99".to_string()))
        );
    }
}
