//! Filter Query Parser
//!
//! Zero-copy recursive-descent parser for GitHub-style filter queries.
//!
//! # Grammar
//!
//! ```text
//! query  ::= expr EOF
//! expr   ::= term ( ("AND" | "OR") expr )*
//! term   ::= field ":" value
//!          | field ":" value ".." value
//!          | field ":" QUOTED
//!          | field ":" (">" | ">=" | "<" | "<=") value
//!          | "(" expr ")"
//!          | "NOT" term
//! field  ::= IDENTIFIER
//! value  ::= IDENTIFIER | NUMBER | BOOLEAN
//! ```
//!
//! `AND` binds tighter than `OR`, both are left-associative, and `NOT`
//! applies to a single term.
//!
//! # Example
//!
//! ```rust
//! use filterql_core::parser::{Expr, Parser};
//!
//! let expr = Parser::parse_str("a:1 OR a:2 AND a:3").unwrap();
//! assert_eq!(
//!     expr,
//!     Expr::or(Expr::equals("a", 1), Expr::and(Expr::equals("a", 2), Expr::equals("a", 3)))
//! );
//! ```

mod ast;
mod lexer;
mod token;

pub use ast::Expr;
pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::value::{CompareOp, Range, Value};

/// Default limit on nesting: parentheses, and the height of the
/// `AND`/`OR`/`NOT` tree
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Ceiling applied to any configured depth limit
pub const MAX_DEPTH_LIMIT: usize = 256;

const TERM_START: &[TokenKind] = &[TokenKind::Identifier, TokenKind::LParen, TokenKind::Not];
const VALUE: &[TokenKind] = &[TokenKind::Identifier, TokenKind::Number, TokenKind::Boolean];
const FIELD_RHS: &[TokenKind] = &[
    TokenKind::Identifier,
    TokenKind::Number,
    TokenKind::Boolean,
    TokenKind::QuotedString,
    TokenKind::Gt,
    TokenKind::Gte,
    TokenKind::Lt,
    TokenKind::Lte,
];
const AFTER_GROUP: &[TokenKind] = &[TokenKind::And, TokenKind::Or, TokenKind::RParen];
const AFTER_QUERY: &[TokenKind] = &[TokenKind::And, TokenKind::Or, TokenKind::Eof];

/// Parser errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected {} at position {offset}, found {found}", expected_list(.expected))]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: String,
        offset: usize,
    },

    #[error("unrecognized input '{lexeme}' at position {offset}")]
    UnknownToken { lexeme: String, offset: usize },

    #[error("invalid number '{lexeme}' at position {offset}")]
    InvalidNumber { lexeme: String, offset: usize },

    #[error("nesting deeper than {limit} levels at position {offset}")]
    NestingTooDeep { limit: usize, offset: usize },
}

impl ParseError {
    /// Byte offset of the offending token in the query
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { offset, .. }
            | ParseError::UnknownToken { offset, .. }
            | ParseError::InvalidNumber { offset, .. }
            | ParseError::NestingTooDeep { offset, .. } => *offset,
        }
    }
}

fn expected_list(kinds: &[TokenKind]) -> String {
    match kinds {
        [] => "nothing".to_string(),
        [one] => one.to_string(),
        [init @ .., last] => {
            let init: Vec<String> = init.iter().map(|k| k.to_string()).collect();
            format!("{} or {}", init.join(", "), last)
        }
    }
}

/// Binary connectives, ordered by binding strength
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    Or,
    And,
}

impl Connective {
    fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Or => Some(Connective::Or),
            TokenKind::And => Some(Connective::And),
            _ => None,
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Connective::Or => 1,
            Connective::And => 2,
        }
    }

    fn combine<'a>(self, left: Expr<'a>, right: Expr<'a>) -> Expr<'a> {
        match self {
            Connective::Or => Expr::or(left, right),
            Connective::And => Expr::and(left, right),
        }
    }
}

fn compare_op(kind: TokenKind) -> Option<CompareOp> {
    match kind {
        TokenKind::Gt => Some(CompareOp::Gt),
        TokenKind::Gte => Some(CompareOp::Gte),
        TokenKind::Lt => Some(CompareOp::Lt),
        TokenKind::Lte => Some(CompareOp::Lte),
        _ => None,
    }
}

/// Filter query parser using precedence climbing
pub struct Parser<'a> {
    tokens: std::vec::IntoIter<Token<'a>>,
    current: Token<'a>,
    end: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser over a token sequence.
    ///
    /// The sequence should end with `Eof`; if it does not, the parser acts as
    /// if it did.
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        let end = tokens
            .last()
            .map(|t| t.offset + t.text.len())
            .unwrap_or(0);
        let mut tokens = tokens.into_iter();
        let current = tokens.next().unwrap_or_else(|| Token::eof(end));
        Self {
            tokens,
            current,
            end,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit nesting of parentheses and the height of the expression tree.
    ///
    /// Values above [`MAX_DEPTH_LIMIT`] are clamped to it.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }

    /// Tokenize and parse input string directly
    pub fn parse_str(input: &'a str) -> Result<Expr<'a>, ParseError> {
        Parser::new(tokenize(input)).run()
    }

    /// Run the parser over the whole token sequence
    pub fn run(mut self) -> Result<Expr<'a>, ParseError> {
        let (expr, _) = self.parse_expr(0)?;
        if self.current.kind != TokenKind::Eof {
            return Err(self.unexpected(AFTER_QUERY));
        }
        Ok(expr)
    }

    fn bump(&mut self) -> Token<'a> {
        let next = self.tokens.next().unwrap_or_else(|| Token::eof(self.end));
        std::mem::replace(&mut self.current, next)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn expect(&mut self, kind: TokenKind, expected: &[TokenKind]) -> Result<Token<'a>, ParseError> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &[TokenKind]) -> ParseError {
        let token = &self.current;
        if token.kind == TokenKind::Unknown {
            return ParseError::UnknownToken {
                lexeme: token.text.to_string(),
                offset: token.offset,
            };
        }
        ParseError::UnexpectedToken {
            expected: expected.to_vec(),
            found: token.describe(),
            offset: token.offset,
        }
    }

    fn enter(&mut self, offset: usize) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                offset,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Height of a new node over a child of height `child`
    fn grow(&self, child: usize, offset: usize) -> Result<usize, ParseError> {
        let height = child + 1;
        if height > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                offset,
            });
        }
        Ok(height)
    }

    /// Parse terms joined by connectives of at least `min_precedence`.
    ///
    /// The right operand is parsed one level tighter than its operator, so
    /// equal-precedence chains fold to the left and `OR` is never pulled
    /// under an `AND`. Returns the expression with its tree height.
    fn parse_expr(&mut self, min_precedence: u8) -> Result<(Expr<'a>, usize), ParseError> {
        let (mut lhs, mut height) = self.parse_term()?;

        while let Some(op) = Connective::from_kind(self.current.kind) {
            if op.precedence() < min_precedence {
                break;
            }
            let offset = self.bump().offset;
            let (rhs, rhs_height) = self.parse_expr(op.precedence() + 1)?;
            height = self.grow(height.max(rhs_height), offset)?;
            lhs = op.combine(lhs, rhs);
        }

        Ok((lhs, height))
    }

    fn parse_term(&mut self) -> Result<(Expr<'a>, usize), ParseError> {
        match self.current.kind {
            TokenKind::LParen => {
                let open = self.bump();
                self.enter(open.offset)?;
                let inner = self.parse_expr(0)?;
                self.expect(TokenKind::RParen, AFTER_GROUP)?;
                self.leave();
                Ok(inner)
            }
            TokenKind::Not => {
                let not = self.bump();
                self.enter(not.offset)?;
                let (operand, height) = self.parse_term()?;
                self.leave();
                Ok((Expr::not(operand), self.grow(height, not.offset)?))
            }
            TokenKind::Identifier => Ok((self.parse_field_term()?, 0)),
            _ => Err(self.unexpected(TERM_START)),
        }
    }

    fn parse_field_term(&mut self) -> Result<Expr<'a>, ParseError> {
        let field = self.bump().text;
        self.expect(TokenKind::Colon, &[TokenKind::Colon])?;

        if self.at(TokenKind::QuotedString) {
            let text = self.bump().text;
            return Ok(Expr::FieldQuoted { field, text });
        }

        if let Some(op) = compare_op(self.current.kind) {
            self.bump();
            let value = self.parse_value()?;
            return Ok(Expr::FieldCompare { field, op, value });
        }

        if !self.current.kind.is_value() {
            return Err(self.unexpected(FIELD_RHS));
        }

        let value = self.parse_value()?;
        if self.at(TokenKind::DotDot) {
            self.bump();
            let upper = self.parse_value()?;
            return Ok(Expr::FieldRange {
                field,
                range: Range {
                    lower: value,
                    upper,
                },
            });
        }

        Ok(Expr::FieldEquals { field, value })
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let value = match self.current.kind {
            TokenKind::Identifier => Value::Identifier(self.current.text.to_string()),
            TokenKind::Boolean => Value::Boolean(self.current.text == "true"),
            TokenKind::Number => {
                let number = Decimal::from_str_exact(self.current.text).map_err(|_| {
                    ParseError::InvalidNumber {
                        lexeme: self.current.text.to_string(),
                        offset: self.current.offset,
                    }
                })?;
                Value::Number(number)
            }
            _ => return Err(self.unexpected(VALUE)),
        };
        self.bump();
        Ok(value)
    }
}

/// Parse a token sequence produced by [`tokenize`]
pub fn parse(tokens: Vec<Token<'_>>) -> Result<Expr<'_>, ParseError> {
    Parser::new(tokens).run()
}
