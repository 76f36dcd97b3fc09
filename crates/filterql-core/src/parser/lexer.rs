//! Zero-copy lexer for the filter query language

use super::token::{Token, TokenKind};

/// Keywords lookup (case-sensitive, exact match)
fn keyword_kind(s: &str) -> Option<TokenKind> {
    match s {
        "OR" => Some(TokenKind::Or),
        "AND" => Some(TokenKind::And),
        "NOT" => Some(TokenKind::Not),
        "true" | "false" => Some(TokenKind::Boolean),
        _ => None,
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Zero-copy lexer for filter queries.
///
/// Never fails: anything it cannot classify becomes a [`TokenKind::Unknown`]
/// token and the parser decides what to do with it. The stream always ends
/// with exactly one [`TokenKind::Eof`].
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            done: false,
        }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.remaining().chars().nth(1)
    }

    fn advance(&mut self, n: usize) {
        self.position += n;
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if matches!(c, ' ' | '\t' | '\r' | '\n') {
                self.advance(1);
            } else {
                break;
            }
        }
    }

    fn single(&mut self, kind: TokenKind, len: usize) -> Token<'a> {
        let start = self.position;
        self.advance(len);
        Token::new(kind, &self.input[start..self.position], start)
    }

    fn read_quoted_string(&mut self) -> Token<'a> {
        let start = self.position;
        self.advance(1);

        let content_start = self.position;
        match self.remaining().find('"') {
            Some(len) => {
                let text = &self.input[content_start..content_start + len];
                self.advance(len + 1);
                Token::new(TokenKind::QuotedString, text, start)
            }
            None => {
                // Unterminated: the rest of the input is unclassifiable
                self.position = self.input.len();
                Token::new(TokenKind::Unknown, &self.input[start..], start)
            }
        }
    }

    fn read_identifier(&mut self) -> Token<'a> {
        let start = self.position;

        while let Some(c) = self.peek_char() {
            if is_ident_continue(c) {
                self.advance(1);
            } else {
                break;
            }
        }

        let text = &self.input[start..self.position];
        let kind = keyword_kind(text).unwrap_or(TokenKind::Identifier);
        Token::new(kind, text, start)
    }

    fn read_number(&mut self) -> Token<'a> {
        let start = self.position;
        self.skip_digits();

        // A fraction needs a digit after the dot; `10..20` stays a range
        if self.peek_char() == Some('.')
            && self.peek_second().is_some_and(|c| c.is_ascii_digit())
        {
            self.advance(1);
            self.skip_digits();
        }

        Token::new(TokenKind::Number, &self.input[start..self.position], start)
    }

    fn skip_digits(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.advance(1);
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();

        let Some(c) = self.peek_char() else {
            self.done = true;
            return Token::eof(self.position);
        };

        match c {
            ':' => self.single(TokenKind::Colon, 1),
            '(' => self.single(TokenKind::LParen, 1),
            ')' => self.single(TokenKind::RParen, 1),
            '.' if self.peek_second() == Some('.') => self.single(TokenKind::DotDot, 2),
            '>' if self.peek_second() == Some('=') => self.single(TokenKind::Gte, 2),
            '<' if self.peek_second() == Some('=') => self.single(TokenKind::Lte, 2),
            '>' => self.single(TokenKind::Gt, 1),
            '<' => self.single(TokenKind::Lt, 1),
            '"' => self.read_quoted_string(),
            _ if is_ident_start(c) => self.read_identifier(),
            _ if c.is_ascii_digit() => self.read_number(),
            _ => self.single(TokenKind::Unknown, c.len_utf8()),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.done = true;
        }
        Some(token)
    }
}

/// Tokenize the whole input, including the trailing `Eof`.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}
