use thiserror::Error;

#[derive(Error, Debug)]
pub enum UsageError {
    #[error("Tokenize error: {0}")]
    Tokenize(String),

    #[error("Unknown SQL dialect: {0}")]
    UnknownDialect(String),

    #[error("Source file not found: {0}")]
    SourceNotFound(String),

    #[error("Unsupported source format: {0}")]
    UnsupportedFormat(String),

    #[error("Column '{column}' not found (available: {available})")]
    MissingColumn { column: String, available: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Polars error: {0}")]
    Polars(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),
}

impl From<polars::error::PolarsError> for UsageError {
    fn from(err: polars::error::PolarsError) -> Self {
        UsageError::Polars(err.to_string())
    }
}

impl From<calamine::Error> for UsageError {
    fn from(err: calamine::Error) -> Self {
        UsageError::Spreadsheet(err.to_string())
    }
}

impl From<sqlparser::tokenizer::TokenizerError> for UsageError {
    fn from(err: sqlparser::tokenizer::TokenizerError) -> Self {
        UsageError::Tokenize(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UsageError>;
