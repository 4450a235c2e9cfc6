//! Access Report - Renders per-table access counts as text, JSON or CSV

use super::BatchSummary;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableAccess {
    pub table: String,
    pub access_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessReport {
    pub generated_at: DateTime<Utc>,

    /// File the queries were read from, if any
    pub source: Option<String>,

    pub queries_scanned: usize,

    /// Queries that produced no table names
    pub queries_without_tables: usize,

    /// Tables in order of first occurrence
    pub tables: Vec<TableAccess>,
}

impl AccessReport {
    pub fn new(summary: &BatchSummary, source: Option<String>) -> Self {
        let tables = summary
            .counts
            .iter()
            .map(|(table, access_count)| TableAccess {
                table: table.to_string(),
                access_count,
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            source,
            queries_scanned: summary.queries_scanned,
            queries_without_tables: summary.queries_without_tables,
            tables,
        }
    }

    /// One `Table: <name>, Access Count: <count>` line per table
    pub fn render_text(&self) -> String {
        self.tables
            .iter()
            .map(|entry| format!("Table: {}, Access Count: {}\n", entry.table, entry.access_count))
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write `table,access_count` rows with a header
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for entry in &self.tables {
            wtr.serialize(entry)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl fmt::Display for AccessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text())
    }
}
