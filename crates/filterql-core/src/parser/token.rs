//! Token types for the filter lexer

use std::fmt;

/// Token kinds in the filter query language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    Colon,
    LParen,
    RParen,
    DotDot,

    // Comparison operators
    Gt,
    Gte,
    Lt,
    Lte,

    // Connectives
    Or,
    And,
    Not,

    // Literals
    Identifier,
    Number,
    Boolean,
    QuotedString,

    // Special
    Eof,
    Unknown,
}

impl TokenKind {
    /// Check if this token can stand on the right-hand side of `field:`
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::Number | TokenKind::Boolean
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::DotDot => write!(f, "'..'"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Gte => write!(f, "'>='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Lte => write!(f, "'<='"),
            TokenKind::Or => write!(f, "'OR'"),
            TokenKind::And => write!(f, "'AND'"),
            TokenKind::Not => write!(f, "'NOT'"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::Boolean => write!(f, "boolean"),
            TokenKind::QuotedString => write!(f, "quoted string"),
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A token with position information.
///
/// `text` borrows the input. For quoted strings it excludes the enclosing
/// quotes while `offset` still points at the opening quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, offset: usize) -> Self {
        Self { kind, text, offset }
    }

    pub fn eof(offset: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            text: "",
            offset,
        }
    }

    /// Human-readable description used in error messages
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => self.kind.to_string(),
            TokenKind::QuotedString => format!("\"{}\"", self.text),
            _ => format!("'{}'", self.text),
        }
    }
}
