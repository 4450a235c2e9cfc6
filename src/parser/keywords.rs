//! Reserved word classification
//!
//! Only words listed here become keyword tokens. Anything else, including
//! words `sqlparser` knows as non-reserved keywords (`name`, `user`, `date`,
//! ...), is treated as a name so it can act as a table or alias.

use super::token::KeywordKind;

const DML: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "MERGE", "UPSERT", "REPLACE",
];

const DDL: &[&str] = &["CREATE", "ALTER", "DROP", "TRUNCATE"];

const CLAUSE: &[&str] = &[
    "ALL", "AND", "ANTI", "ANY", "APPLY", "AS", "ASC", "BETWEEN", "BY", "CASE",
    "CAST", "CROSS", "CURRENT", "DESC", "DISTINCT", "ELSE", "END", "ESCAPE",
    "EXCEPT", "EXISTS", "FALSE", "FETCH", "FOR", "FROM", "FULL", "GROUP",
    "HAVING", "ILIKE", "IN", "INNER", "INTERSECT", "INTO", "IS", "JOIN",
    "LATERAL", "LEFT", "LIKE", "LIMIT", "MINUS", "NATURAL", "NOT", "NULL",
    "OFFSET", "ON", "ONLY", "OR", "ORDER", "OUTER", "OVER", "PARTITION", "PIVOT",
    "QUALIFY", "RETURNING", "RIGHT", "SEMI", "SET", "STRAIGHT_JOIN", "TABLESAMPLE", "THEN",
    "TOP", "TRUE", "UNION", "UNPIVOT", "USING", "VALUES", "WHEN", "WHERE",
    "WINDOW", "WITH",
];

/// Classify an unquoted word, `None` when it is an ordinary name
pub fn classify(word: &str) -> Option<KeywordKind> {
    let upper = word.to_ascii_uppercase();
    let upper = upper.as_str();

    if DML.contains(&upper) {
        Some(KeywordKind::Dml)
    } else if DDL.contains(&upper) {
        Some(KeywordKind::Ddl)
    } else if CLAUSE.contains(&upper) {
        Some(KeywordKind::Clause)
    } else {
        None
    }
}
