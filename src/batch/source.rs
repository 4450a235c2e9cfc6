//! Query Source - Reads the SQL text column from a tabular data file
//!
//! Supported formats are picked by file extension: `.xlsx` / `.xls` / `.xlsm`
//! / `.ods` spreadsheets (first worksheet, header in the first row), `.csv`,
//! `.parquet`, `.json` (array of records) and `.ndjson` / `.jsonl` (one record
//! per line).

use crate::error::{Result, UsageError};
use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default name of the column holding the SQL text
pub const DEFAULT_QUERY_COLUMN: &str = "SQL";

#[derive(Debug, Clone)]
pub struct QuerySource {
    path: PathBuf,
    column: String,
}

impl QuerySource {
    pub fn new(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            column: column.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Read every non-empty cell of the query column, in row order
    pub fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Err(UsageError::SourceNotFound(self.path.display().to_string()));
        }

        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let queries = match extension.as_deref() {
            Some("xlsx") | Some("xls") | Some("xlsm") | Some("ods") => self.load_spreadsheet()?,
            other => self.load_frame(self.read_frame(other)?)?,
        };

        debug!("Loaded {} queries from {:?}", queries.len(), self.path);
        Ok(queries)
    }

    fn missing_column(&self, columns: &[String]) -> UsageError {
        UsageError::MissingColumn {
            column: self.column.clone(),
            available: columns.join(", "),
        }
    }

    fn skip_row(&self, row: usize) {
        warn!("Row {} has no value in column '{}', skipping", row, self.column);
    }

    fn load_spreadsheet(&self) -> Result<Vec<String>> {
        let mut workbook = open_workbook_auto(&self.path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| UsageError::Spreadsheet("workbook has no worksheets".to_string()))??;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect())
            .unwrap_or_default();

        let idx = headers
            .iter()
            .position(|h| h == &self.column)
            .ok_or_else(|| self.missing_column(&headers))?;

        let mut queries = Vec::new();
        for (row, cells) in rows.enumerate() {
            match cells.get(idx) {
                None | Some(Data::Empty) => self.skip_row(row),
                Some(cell) => {
                    let sql = cell.to_string();
                    if sql.trim().is_empty() {
                        self.skip_row(row);
                    } else {
                        queries.push(sql);
                    }
                }
            }
        }

        Ok(queries)
    }

    fn load_frame(&self, df: DataFrame) -> Result<Vec<String>> {
        let columns: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        if !columns.iter().any(|c| c == &self.column) {
            return Err(self.missing_column(&columns));
        }

        let series = df.column(&self.column)?.cast(&DataType::String)?;
        let values = series.str()?;

        let mut queries = Vec::with_capacity(values.len());
        for (row, value) in values.into_iter().enumerate() {
            match value {
                Some(sql) => queries.push(sql.to_string()),
                None => self.skip_row(row),
            }
        }

        Ok(queries)
    }

    fn read_frame(&self, extension: Option<&str>) -> Result<DataFrame> {
        match extension {
            Some("csv") => Ok(LazyCsvReader::new(&self.path)
                .with_has_header(true)
                .with_infer_schema_length(Some(1000))
                .finish()?
                .collect()?),
            Some("parquet") => Ok(LazyFrame::scan_parquet(&self.path, ScanArgsParquet::default())?
                .collect()?),
            Some("json") => Ok(JsonReader::new(File::open(&self.path)?).finish()?),
            Some("ndjson") | Some("jsonl") => Ok(LazyJsonLineReader::new(&self.path)
                .finish()?
                .collect()?),
            other => Err(UsageError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
