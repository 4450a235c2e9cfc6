//! Statement tree construction
//!
//! Turns the flat lexeme stream produced by `sqlparser`'s tokenizer into one
//! [`Token`] tree per statement. The grouping rules are deliberately small:
//!
//! - `( ... )` becomes a [`GroupKind::Parenthesis`] group, `name( ... )` a
//!   [`GroupKind::Function`] group; either may take a trailing alias
//! - unquoted reserved words become keywords
//! - any other word starts a dotted identifier, with an optional
//!   `AS alias` / bare alias
//! - two or more identifiers separated by commas collapse into an
//!   identifier list
//!
//! Whitespace and comments are dropped. Unbalanced parentheses never fail:
//! a missing `)` closes at end of input and a stray `)` is kept as punctuation.
//! Parentheses nested deeper than [`MAX_NESTING`] are kept as punctuation
//! instead of opening further groups.

use super::keywords;
use super::token::{Group, GroupKind, Identifier, Keyword, Token};
use sqlparser::tokenizer::{Token as Lexeme, Word};

/// Deepest group nesting built; deeper parentheses stay flat
pub const MAX_NESTING: usize = 256;

/// Build one statement group per `;`-separated statement, skipping empty ones
pub(crate) fn build_statements(lexemes: Vec<Lexeme>) -> Vec<Token> {
    let significant: Vec<Lexeme> = lexemes
        .into_iter()
        .filter(|lexeme| !matches!(lexeme, Lexeme::Whitespace(_) | Lexeme::EOF))
        .collect();

    let mut builder = TreeBuilder::new(&significant);
    let mut statements = Vec::new();
    while !builder.at_end() {
        builder.flattened = 0;
        let children = builder.sequence(Scope::Statement);
        if !children.is_empty() {
            statements.push(Token::Group(Group::new(GroupKind::Statement, children)));
        }
    }
    statements
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Statement,
    Parenthesis,
}

struct TreeBuilder<'a> {
    lexemes: &'a [Lexeme],
    pos: usize,
    depth: usize,
    /// Open parentheses emitted as punctuation past `MAX_NESTING`
    flattened: usize,
}

impl<'a> TreeBuilder<'a> {
    fn new(lexemes: &'a [Lexeme]) -> Self {
        Self {
            lexemes,
            pos: 0,
            depth: 0,
            flattened: 0,
        }
    }

    fn can_nest(&self) -> bool {
        self.depth < MAX_NESTING
    }

    fn nested(&mut self) -> Vec<Token> {
        self.depth += 1;
        let inner = self.sequence(Scope::Parenthesis);
        self.depth -= 1;
        inner
    }

    fn at_end(&self) -> bool {
        self.pos >= self.lexemes.len()
    }

    fn peek(&self) -> Option<&'a Lexeme> {
        self.lexemes.get(self.pos)
    }

    fn peek_nth(&self, n: usize) -> Option<&'a Lexeme> {
        self.lexemes.get(self.pos + n)
    }

    fn advance(&mut self) -> Option<&'a Lexeme> {
        let lexeme = self.lexemes.get(self.pos);
        if lexeme.is_some() {
            self.pos += 1;
        }
        lexeme
    }

    /// Consume lexemes until the scope's terminator (`;` or `)`) or end of input
    fn sequence(&mut self, scope: Scope) -> Vec<Token> {
        let mut children = Vec::new();

        while let Some(lexeme) = self.advance() {
            match lexeme {
                Lexeme::SemiColon if scope == Scope::Statement => break,
                Lexeme::RParen if self.flattened > 0 => {
                    self.flattened -= 1;
                    children.push(Token::Other(")".to_string()));
                }
                Lexeme::RParen if scope == Scope::Parenthesis => break,
                Lexeme::LParen if !self.can_nest() => {
                    self.flattened += 1;
                    children.push(Token::Other("(".to_string()));
                }
                Lexeme::LParen => {
                    let inner = self.nested();
                    let mut group = Group::new(GroupKind::Parenthesis, inner);
                    group.alias = self.alias();
                    children.push(Token::Group(group));
                }
                Lexeme::Word(word) => children.push(self.word(word)),
                other => children.push(Token::Other(other.to_string())),
            }
        }

        group_identifier_lists(children)
    }

    fn word(&mut self, word: &'a Word) -> Token {
        if word.quote_style.is_none() {
            if let Some(kind) = keywords::classify(&word.value) {
                return Token::Keyword(Keyword::new(kind, word.value.clone()));
            }
        }

        let parts = self.qualified_name(word);

        if self.can_nest() && matches!(self.peek(), Some(Lexeme::LParen)) {
            self.pos += 1;
            let args = self.nested();
            let mut group = Group::new(GroupKind::Function(parts.join(".")), args);
            group.alias = self.alias();
            return Token::Group(group);
        }

        let alias = self.alias();
        Token::Identifier(Identifier::new(parts, alias))
    }

    /// `a`, `a.b`, `a.b.c`, `a.*`
    fn qualified_name(&mut self, first: &Word) -> Vec<String> {
        let mut parts = vec![first.value.clone()];

        while matches!(self.peek(), Some(Lexeme::Period)) {
            match self.peek_nth(1) {
                Some(Lexeme::Word(next)) => parts.push(next.value.clone()),
                Some(Lexeme::Mul) => parts.push("*".to_string()),
                _ => break,
            }
            self.pos += 2;
        }

        parts
    }

    /// `AS name` or a bare non-reserved name
    fn alias(&mut self) -> Option<String> {
        match (self.peek(), self.peek_nth(1)) {
            (Some(Lexeme::Word(as_kw)), Some(Lexeme::Word(name)))
                if as_kw.quote_style.is_none() && as_kw.value.eq_ignore_ascii_case("AS") =>
            {
                self.pos += 2;
                Some(name.value.clone())
            }
            (Some(Lexeme::Word(name)), _) if is_name(name) => {
                self.pos += 1;
                Some(name.value.clone())
            }
            _ => None,
        }
    }
}

fn is_name(word: &Word) -> bool {
    word.quote_style.is_some() || keywords::classify(&word.value).is_none()
}

fn is_comma(token: &Token) -> bool {
    matches!(token, Token::Other(text) if text == ",")
}

/// Collapse `ident , ident [, ident ...]` runs into identifier lists
fn group_identifier_lists(children: Vec<Token>) -> Vec<Token> {
    let mut grouped: Vec<Token> = Vec::with_capacity(children.len());
    let mut pending_comma = false;

    for token in children {
        if !pending_comma
            && is_comma(&token)
            && matches!(
                grouped.last(),
                Some(Token::Identifier(_) | Token::IdentifierList(_))
            )
        {
            pending_comma = true;
            continue;
        }

        match token {
            Token::Identifier(ident) if pending_comma => {
                pending_comma = false;
                let mut members = match grouped.pop() {
                    Some(Token::IdentifierList(members)) => members,
                    Some(Token::Identifier(previous)) => vec![previous],
                    Some(other) => {
                        grouped.push(other);
                        grouped.push(Token::Other(",".to_string()));
                        grouped.push(Token::Identifier(ident));
                        continue;
                    }
                    None => {
                        grouped.push(Token::Identifier(ident));
                        continue;
                    }
                };
                members.push(ident);
                grouped.push(Token::IdentifierList(members));
            }
            other => {
                if pending_comma {
                    grouped.push(Token::Other(",".to_string()));
                    pending_comma = false;
                }
                grouped.push(other);
            }
        }
    }

    if pending_comma {
        grouped.push(Token::Other(",".to_string()));
    }

    grouped
}
