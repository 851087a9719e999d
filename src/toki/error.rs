//! Error types for scanner construction and fail-fast draining

use super::position::Position;
use super::token::Token;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid pattern {pattern:?} for token {token}: {source}")]
    InvalidPattern {
        token: Token,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("pattern {pattern:?} for token {token} can match the empty string")]
    EmptyMatch { token: Token, pattern: String },
    #[error("token {token} is declared by both {first:?} and {second:?}")]
    DuplicateToken {
        token: Token,
        first: String,
        second: String,
    },
    #[error("token {token} is reserved for the scanner and cannot be used by a rule")]
    ReservedToken { token: Token },
    #[error("unrecognized input at {position}")]
    Unrecognized { position: Position },
}
