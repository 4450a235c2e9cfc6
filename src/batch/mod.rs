//! Batch Driver
//!
//! Feeds queries one at a time to the [`TableExtractor`] and aggregates the
//! returned table names into access counts. Each query is independent; a query
//! that yields nothing is counted but never fails the batch.

pub mod counter;
pub mod report;
pub mod source;

pub use counter::TableAccessCounts;
pub use report::{AccessReport, TableAccess};
pub use source::{QuerySource, DEFAULT_QUERY_COLUMN};

use crate::error::Result;
use crate::extractor::TableExtractor;
use tracing::{debug, info, warn};

/// Aggregated result of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub counts: TableAccessCounts,
    pub queries_scanned: usize,
    pub queries_without_tables: usize,
}

#[derive(Debug, Clone, Default)]
pub struct BatchDriver {
    extractor: TableExtractor,
}

impl BatchDriver {
    pub fn new(extractor: TableExtractor) -> Self {
        Self { extractor }
    }

    /// Extract and count table accesses over a sequence of queries
    pub fn count<I, S>(&self, queries: I) -> BatchSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = BatchSummary::default();

        for (idx, sql) in queries.into_iter().enumerate() {
            let tables = self.extractor.extract(sql.as_ref());
            if tables.is_empty() {
                debug!("Query #{} references no tables", idx);
                summary.queries_without_tables += 1;
            }
            summary.counts.extend(tables);
            summary.queries_scanned += 1;
        }

        info!(
            "Scanned {} queries, {} distinct tables, {} accesses",
            summary.queries_scanned,
            summary.counts.len(),
            summary.counts.total_accesses()
        );

        summary
    }

    /// Load the query column from `source` and build a report
    pub fn run(&self, source: &QuerySource) -> Result<AccessReport> {
        info!("Reading column '{}' from {:?}", source.column(), source.path());
        let queries = source.load()?;
        let summary = self.count(&queries);
        if summary.counts.is_empty() {
            warn!("No table references found in {:?}", source.path());
        }
        Ok(AccessReport::new(
            &summary,
            Some(source.path().display().to_string()),
        ))
    }
}
