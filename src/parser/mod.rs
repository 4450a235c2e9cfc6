//! SQL statement tree adapter
//!
//! Lexes SQL text with `sqlparser`'s tokenizer for a configurable dialect and
//! groups the lexemes into one [`Token`] tree per statement.

pub mod grouping;
pub mod keywords;
pub mod token;

pub use token::{Group, GroupKind, Identifier, Keyword, KeywordKind, Token};

use crate::error::{Result, UsageError};
use sqlparser::dialect::{dialect_from_str, Dialect, GenericDialect};
use sqlparser::tokenizer::Tokenizer;

pub const DEFAULT_DIALECT: &str = "generic";

/// Parser holding the dialect name used for lexing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlParser {
    dialect: String,
}

impl Default for SqlParser {
    fn default() -> Self {
        Self {
            dialect: DEFAULT_DIALECT.to_string(),
        }
    }
}

impl SqlParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser for a dialect name understood by `sqlparser`
    /// (`generic`, `postgres`, `mysql`, `mssql`, `snowflake`, ...)
    pub fn from_dialect_name(name: &str) -> Result<Self> {
        let name = name.trim().to_lowercase();
        if dialect_from_str(&name).is_none() {
            return Err(UsageError::UnknownDialect(name));
        }
        Ok(Self { dialect: name })
    }

    pub fn dialect_name(&self) -> &str {
        &self.dialect
    }

    fn dialect(&self) -> Box<dyn Dialect> {
        dialect_from_str(&self.dialect).unwrap_or_else(|| Box::new(GenericDialect {}))
    }

    /// Parse text into statement trees, one [`GroupKind::Statement`] group each
    pub fn parse(&self, sql: &str) -> Result<Vec<Token>> {
        let dialect = self.dialect();
        let lexemes = Tokenizer::new(dialect.as_ref(), sql).tokenize()?;
        Ok(grouping::build_statements(lexemes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_dialect_rejected() {
        let err = SqlParser::from_dialect_name("cobol").unwrap_err();
        assert!(matches!(err, UsageError::UnknownDialect(name) if name == "cobol"));
    }

    #[test]
    fn test_dialect_name_normalized() {
        let parser = SqlParser::from_dialect_name(" MySQL ").unwrap();
        assert_eq!(parser.dialect_name(), "mysql");
    }

    #[test]
    fn test_parse_reports_tokenizer_failure() {
        let parser = SqlParser::new();
        assert!(matches!(
            parser.parse("SELECT 'unterminated FROM t"),
            Err(UsageError::Tokenize(_))
        ));
    }

    #[test]
    fn test_parse_empty_text() {
        let parser = SqlParser::new();
        assert!(parser.parse("   \n").unwrap().is_empty());
    }

    #[test]
    fn test_backtick_identifiers_in_mysql() {
        let parser = SqlParser::from_dialect_name("mysql").unwrap();
        let statements = parser.parse("SELECT * FROM `order items`").unwrap();
        assert_eq!(
            statements[0].children()[3],
            Token::Identifier(Identifier::new(vec!["order items".to_string()], None))
        );
    }
}
