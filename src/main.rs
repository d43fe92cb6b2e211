mod cli;
mod load;
mod model;

use std::path::Path;
use std::process;

use clap::{App, Arg};

use cli::{plot::Plotter, table::Grid};
use model::{
    cost::compute_costs,
    date::Frequency,
    summary::{summarize, Query},
};

fn main() {
    let matches = App::new("faktura")
        .version(clap::crate_version!())
        .about("Validate a billing project and report costs against its budgets")
        .arg(
            Arg::with_name("CONFIG")
                .help("YAML project configuration")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("timesheet")
                .short("t")
                .long("timesheet")
                .takes_value(true)
                .value_name("FILE")
                .help("CSV timesheet of dated work entries"),
        )
        .arg(
            Arg::with_name("by-task")
                .long("by-task")
                .help("Group costs by task"),
        )
        .arg(
            Arg::with_name("by-worker")
                .long("by-worker")
                .help("Group costs by worker"),
        )
        .arg(
            Arg::with_name("freq")
                .short("f")
                .long("freq")
                .takes_value(true)
                .possible_values(&["daily", "weekly", "monthly", "yearly"])
                .help("Bucket costs by calendar period"),
        )
        .arg(
            Arg::with_name("costs")
                .long("costs")
                .help("Also print the per-entry cost rows"),
        )
        .arg(
            Arg::with_name("plot")
                .long("plot")
                .takes_value(true)
                .value_name("FILE")
                .help("Write an SVG cost chart to the given path"),
        )
        .get_matches();

    let config = Path::new(matches.value_of("CONFIG").unwrap());
    let timesheet = matches.value_of("timesheet").map(Path::new);
    let project = match load::read_project(config, timesheet) {
        Ok(project) => project,
        Err(err) => {
            eprintln!("faktura: {}", err);
            process::exit(1);
        }
    };

    println!(
        "{}: {} for {} ({} {})",
        project.name(),
        project.description(),
        project.client(),
        project.budget(),
        project.currency(),
    );
    if project.timesheet().is_none() {
        println!("project is consistent; no timesheet, nothing to report");
        return;
    }

    let query = Query {
        by_task: matches.is_present("by-task"),
        by_worker: matches.is_present("by-worker"),
        // the value set is constrained by clap
        bucket: matches.value_of("freq").and_then(Frequency::from_name),
    };

    if matches.is_present("costs") {
        match compute_costs(&project) {
            Ok(rows) => print!("{}", Grid::from_costs(&rows).with_title("Costs")),
            Err(err) => {
                eprintln!("faktura: {}", err);
                process::exit(1);
            }
        }
    }

    match summarize(&project, query) {
        Ok(rows) => print!("{}", Grid::from_summary(query, &rows).with_title("Summary")),
        Err(err) => {
            eprintln!("faktura: {}", err);
            process::exit(1);
        }
    }

    if let Some(file) = matches.value_of("plot") {
        let chart = Query {
            by_task: true,
            by_worker: false,
            bucket: query.bucket,
        };
        let rows = match summarize(&project, chart) {
            Ok(rows) => rows,
            Err(err) => {
                eprintln!("faktura: {}", err);
                process::exit(1);
            }
        };
        if let Err(err) = Plotter::from(&rows).render(file) {
            eprintln!("faktura: cannot write {}: {}", file, err);
            process::exit(1);
        }
        println!("chart written to {}", file);
    }
}
