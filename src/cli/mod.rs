//! Presentation of cost reports: text tables and SVG charts

pub mod plot;
pub mod table;
