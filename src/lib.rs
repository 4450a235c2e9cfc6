//! Table access counting for batches of SQL queries
//!
//! [`extractor`] finds the tables referenced after `FROM` in a SELECT
//! statement (including nested SELECTs), [`parser`] provides the statement
//! tree it walks, and [`batch`] reads a query column from a data file and
//! aggregates per-table access counts.

pub mod batch;
pub mod error;
pub mod extractor;
pub mod parser;

pub use batch::{AccessReport, BatchDriver, BatchSummary, QuerySource, TableAccessCounts};
pub use error::{Result, UsageError};
pub use extractor::{parse_sql_tables, TableExtractor};
