//! botparams - crawler query parameter analysis for access logs
//!
//! Scans a web-server access log for GET requests made by one known crawler,
//! extracts their query-string parameters and summarizes them per parameter
//! name, ranked by how many requests carried each one.

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod patterns;
pub mod pipeline;
pub mod report;
pub mod selection;

pub use error::{BotParamsError, Result};
