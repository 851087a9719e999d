//! Line/column tracking
//!
//! Positions are 1-based and only ever move forward. A session never recomputes its
//! position from the start of the input: every consumed slice (whitespace or token text)
//! is fed through [`Position::advance`], which counts code points rather than bytes so
//! that columns stay correct over multi-byte text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A line:column position in the scanned input
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position of the first character of any input: line 1, column 1.
    pub fn start() -> Self {
        Self::new(1, 1)
    }

    /// Move past `consumed`.
    ///
    /// Each newline bumps the line. After the last newline the column restarts at 1 and
    /// counts the characters that follow it; without a newline the column simply grows by
    /// the character count of `consumed`.
    pub fn advance(&mut self, consumed: &str) {
        match consumed.rfind('\n') {
            Some(last) => {
                self.line += consumed.matches('\n').count();
                self.column = 1 + consumed[last + 1..].chars().count();
            }
            None => self.column += consumed.chars().count(),
        }
    }

    /// Non-mutating form of [`Position::advance`].
    pub fn advanced(mut self, consumed: &str) -> Self {
        self.advance(consumed);
        self
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
