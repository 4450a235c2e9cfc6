//! Statement tree tokens
//!
//! A parsed SQL statement is a tree of [`Token`]s. Leaves are keywords,
//! identifiers and everything else the scanner does not care about; inner
//! nodes are [`Group`]s (the statement itself, parenthesised sub-expressions
//! and function calls).

/// Keyword category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordKind {
    /// Data manipulation verbs (SELECT, INSERT, UPDATE, ...)
    Dml,
    /// Data definition verbs (CREATE, ALTER, DROP, TRUNCATE)
    Ddl,
    /// Every other reserved word (FROM, WHERE, JOIN, AS, ...)
    Clause,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub kind: KeywordKind,
    /// Keyword as written in the source text
    pub value: String,
}

impl Keyword {
    pub fn new(kind: KeywordKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Case-insensitive comparison against a keyword spelling
    pub fn is(&self, word: &str) -> bool {
        self.value.eq_ignore_ascii_case(word)
    }
}

/// A named reference such as `orders`, `sales.orders o` or `"Order Details" AS d`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Dotted name parts with quoting removed, outermost qualifier first
    pub parts: Vec<String>,
    pub alias: Option<String>,
}

impl Identifier {
    pub fn new(parts: Vec<String>, alias: Option<String>) -> Self {
        Self { parts, alias }
    }

    /// Bare referenced name: qualification and alias stripped
    pub fn real_name(&self) -> &str {
        self.parts.last().map(String::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKind {
    /// Root of one parsed statement
    Statement,
    /// `( ... )`
    Parenthesis,
    /// `name( ... )`, holding the (possibly dotted) function name
    Function(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub kind: GroupKind,
    pub children: Vec<Token>,
    /// Alias following a parenthesised group or function call
    pub alias: Option<String>,
}

impl Group {
    pub fn new(kind: GroupKind, children: Vec<Token>) -> Self {
        Self {
            kind,
            children,
            alias: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Keyword(Keyword),
    Identifier(Identifier),
    /// Two or more comma-separated identifiers at the same nesting level
    IdentifierList(Vec<Identifier>),
    Group(Group),
    /// Literals, operators, punctuation
    Other(String),
}

impl Token {
    /// True for a keyword of the given category spelled `word` (any case)
    pub fn is_keyword(&self, kind: KeywordKind, word: &str) -> bool {
        matches!(self, Token::Keyword(kw) if kw.kind == kind && kw.is(word))
    }

    pub fn children(&self) -> &[Token] {
        match self {
            Token::Group(group) => &group.children,
            _ => &[],
        }
    }
}
