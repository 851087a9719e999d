//! The outcome of a single scan step

use super::position::Position;
use super::token::Token;
use serde::Serialize;
use std::fmt;

/// One token handed out by a [`Session`](super::session::Session).
///
/// `value` holds the exact matched text and is empty for [`Token::EOF`] and
/// [`Token::ERROR`]. `pos` is where the match begins, after any leading whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ScanResult {
    pub token: Token,
    pub value: String,
    pub pos: Position,
}

impl ScanResult {
    pub fn new(token: Token, value: impl Into<String>, pos: Position) -> Self {
        Self {
            token,
            value: value.into(),
            pos,
        }
    }

    pub fn eof(pos: Position) -> Self {
        Self::new(Token::EOF, String::new(), pos)
    }

    pub fn error(pos: Position) -> Self {
        Self::new(Token::ERROR, String::new(), pos)
    }

    pub fn is_eof(&self) -> bool {
        self.token == Token::EOF
    }

    pub fn is_error(&self) -> bool {
        self.token == Token::ERROR
    }
}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line: {}, Column: {}, {}",
            self.pos.line, self.pos.column, self.value
        )
    }
}
