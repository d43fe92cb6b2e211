//! YAML project-configuration ingestion
//!
//! The configuration carries the scalar project fields together with
//! the task and worker tables as embedded delimited-text blocks:
//!
//! ```yaml
//! name: Project A
//! description: "Suppress the pirates, who have been raiding ships"
//! client: Hong Kong Marine Police
//! budget: 40000
//! currency: HKD
//! tasks: |
//!     task,budget
//!     Inception,2000
//!     Solutions,10000
//! workers: |
//!     worker,rate
//!     Captain Chi,200
//!     Dragon Ma,190
//! ```
//!
//! Unknown keys are rejected so that a typo does not silently drop a
//! field. Everything past the YAML shape (blank fields, table contents,
//! budget consistency) is the validator's job, not this module's.

use serde::Deserialize;

use crate::load::{parse_table, Kind, LoadError};
use crate::model::project::RawProject;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    name: String,
    description: String,
    client: String,
    budget: f64,
    currency: String,
    tasks: String,
    workers: String,
}

/// Parse a YAML configuration document into raw project fields
pub fn parse_config(src: &str) -> Result<RawProject, LoadError> {
    let raw: RawConfig = serde_yaml::from_str(src)?;
    let tasks = parse_table(&raw.tasks, "tasks", &[("budget", Kind::Number)])?;
    let workers = parse_table(&raw.workers, "workers", &[("rate", Kind::Number)])?;
    Ok(RawProject {
        name: raw.name,
        description: raw.description,
        client: raw.client,
        budget: raw.budget,
        currency: raw.currency,
        tasks,
        workers,
        timesheet: None,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::project::Project;

    const CONFIG: &str = "\
name: Project A
description: \"Suppress the pirates, who have been raiding ships\"
client: Hong Kong Marine Police
budget: 40000
currency: HKD
tasks: |
    task,budget
    Inception,2000
    Context,3000
    Problems & Opportunities,20000
    Solutions,10000
    Project Management,5000
workers: |
    worker,rate
    Captain Chi,200
    Dragon Ma,190
    Hong Tin-tsu,180
    Fei,170
    Winnie,160
";

    #[test]
    fn full_configuration_round_trip() {
        let raw = parse_config(CONFIG).unwrap();
        assert_eq!(raw.name, "Project A");
        assert_eq!(raw.budget, 40000.0);
        assert_eq!(raw.tasks.len(), 5);
        assert_eq!(raw.workers.len(), 5);
        assert!(raw.timesheet.is_none());
        // and the fields assemble into a valid project
        let project = Project::build(raw).unwrap();
        assert_eq!(project.workers()[4].rate, 160.0);
    }

    #[test]
    fn missing_keys_are_yaml_errors() {
        let src = "name: P\nbudget: 10\n";
        assert!(matches!(parse_config(src), Err(LoadError::Yaml(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let src = format!("{}color: red\n", CONFIG);
        assert!(matches!(parse_config(&src), Err(LoadError::Yaml(_))));
    }

    #[test]
    fn non_numeric_budget_is_a_yaml_error() {
        let src = CONFIG.replace("budget: 40000", "budget: lots");
        assert!(matches!(parse_config(&src), Err(LoadError::Yaml(_))));
    }
}
