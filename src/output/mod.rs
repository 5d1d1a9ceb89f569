//! Report output in console and JSON form

pub mod formatter;
pub mod report;
