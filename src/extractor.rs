//! Table reference extraction
//!
//! Walks a statement tree, finds the span following each `FROM` keyword up to
//! the next clause keyword, descends into nested SELECT groups found there and
//! resolves identifiers to bare table names.
//!
//! Extraction never fails. Text that does not tokenize, statements that are
//! not SELECTs, and SELECTs without FROM all produce an empty list. Table
//! sources that are neither identifiers nor identifier lists (function calls,
//! parenthesised joins) are skipped without guessing a name.

use crate::error::Result;
use crate::parser::{KeywordKind, SqlParser, Token};
use tracing::debug;

/// True iff `token` is a group with a direct `SELECT` DML keyword child
pub fn is_select_statement(token: &Token) -> bool {
    match token {
        Token::Group(group) => group
            .children
            .iter()
            .any(|child| child.is_keyword(KeywordKind::Dml, "SELECT")),
        Token::Keyword(_) | Token::Identifier(_) | Token::IdentifierList(_) | Token::Other(_) => {
            false
        }
    }
}

/// Candidate table tokens from the FROM spans of one statement's children,
/// including those of nested SELECT groups, in encounter order
pub fn table_tokens(children: &[Token]) -> Vec<&Token> {
    let mut candidates = Vec::new();
    collect_table_tokens(children, &mut candidates);
    candidates
}

fn collect_table_tokens<'a>(children: &'a [Token], candidates: &mut Vec<&'a Token>) {
    let mut in_from = false;

    for token in children {
        if !in_from {
            in_from = token.is_keyword(KeywordKind::Clause, "FROM");
            continue;
        }

        if is_select_statement(token) {
            collect_table_tokens(token.children(), candidates);
            continue;
        }

        match token {
            Token::Keyword(keyword) if keyword.kind == KeywordKind::Clause => break,
            _ => candidates.push(token),
        }
    }
}

/// Resolve candidate tokens to real names; unsupported shapes yield nothing
pub fn extract_table_names<'a, I>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Token>,
{
    let mut names = Vec::new();

    for token in candidates {
        match token {
            Token::IdentifierList(identifiers) => {
                names.extend(identifiers.iter().map(|ident| ident.real_name().to_string()));
            }
            Token::Identifier(ident) => names.push(ident.real_name().to_string()),
            Token::Keyword(_) | Token::Group(_) | Token::Other(_) => {}
        }
    }

    names
}

/// Extracts referenced table names from single SQL queries
#[derive(Debug, Clone, Default)]
pub struct TableExtractor {
    parser: SqlParser,
}

impl TableExtractor {
    pub fn new(parser: SqlParser) -> Self {
        Self { parser }
    }

    pub fn with_dialect(name: &str) -> Result<Self> {
        Ok(Self::new(SqlParser::from_dialect_name(name)?))
    }

    pub fn parser(&self) -> &SqlParser {
        &self.parser
    }

    /// Table names referenced by the first statement in `sql`
    pub fn extract(&self, sql: &str) -> Vec<String> {
        let statements = match self.parser.parse(sql) {
            Ok(statements) => statements,
            Err(e) => {
                debug!("Skipping unparseable query: {}", e);
                return Vec::new();
            }
        };

        let Some(statement) = statements.first() else {
            debug!("No statement found in query");
            return Vec::new();
        };

        if !is_select_statement(statement) {
            debug!("First statement is not a SELECT");
            return Vec::new();
        }

        let tables = extract_table_names(table_tokens(statement.children()));
        debug!("Extracted {} table reference(s): {:?}", tables.len(), tables);
        tables
    }
}

/// Extract table names using the generic dialect
pub fn parse_sql_tables(sql: &str) -> Vec<String> {
    TableExtractor::default().extract(sql)
}
