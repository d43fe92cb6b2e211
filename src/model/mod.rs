//! The validation-and-aggregation engine: projects, costs, summaries
//!
//! Everything here is synchronous and pure: operations are functions of
//! their inputs that either return a result or fail with a typed error,
//! and a validated [`project::Project`] is immutable and freely shareable.

pub mod cost;
pub mod date;
pub mod error;
pub mod project;
pub mod summary;
pub mod table;
