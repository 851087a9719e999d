//! Token identifiers
//!
//! A [`Token`] names a lexical category. Callers assign their own identifiers, usually
//! a small enumeration starting at 1. The two highest values of the `u32` space are
//! reserved for the sentinels [`Token::EOF`] and [`Token::ERROR`], which the scanner
//! produces itself and which no rule may use.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque, totally ordered token identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(pub u32);

impl Token {
    /// End of input reached.
    pub const EOF: Token = Token(u32::MAX);

    /// No rule matched at the current position.
    pub const ERROR: Token = Token(u32::MAX - 1);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }

    /// True for the sentinel values that user rules may not claim.
    pub const fn is_reserved(self) -> bool {
        self.0 >= Self::ERROR.0
    }

    /// True when a session has nothing further to hand out at this position.
    pub const fn is_terminal(self) -> bool {
        self.is_reserved()
    }
}

impl From<u32> for Token {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Token::EOF => f.pad("EOF"),
            Token::ERROR => f.pad("ERROR"),
            Token(id) => fmt::Display::fmt(&id, f),
        }
    }
}
