//! Token definitions for the Touchstone lexer.

use std::fmt;

use crate::span::Span;

/// A lexical token of a Touchstone file.
///
/// Touchstone is line oriented, so newlines are significant and kept as
/// tokens; the parser groups tokens into lines before interpreting them.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    /// `#`, introduces the option line
    Hash,
    /// Bracketed keyword name without the brackets, e.g. `Number of Ports`
    Keyword(&'a str),
    /// Numeric literal
    Number(f64),
    /// Alphanumeric word such as `GHz`, `MA` or `12_21`
    Word(&'a str),
    /// Comment text following `!`, up to the end of the line
    Comment(&'a str),
    /// Any other single character
    Other(char),
    Whitespace,
    Newline,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Hash => write!(f, "`#`"),
            Token::Keyword(name) => write!(f, "keyword `[{name}]`"),
            Token::Number(value) => write!(f, "number `{value}`"),
            Token::Word(word) => write!(f, "`{word}`"),
            Token::Comment(_) => write!(f, "comment"),
            Token::Other(c) => write!(f, "`{c}`"),
            Token::Whitespace => write!(f, "whitespace"),
            Token::Newline => write!(f, "end of line"),
        }
    }
}

/// A token with its location in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'a> {
    pub token: Token<'a>,
    pub span: Span,
}

impl<'a> PositionedToken<'a> {
    pub fn new(token: Token<'a>, span: Span) -> Self {
        Self { token, span }
    }
}
