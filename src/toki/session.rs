//! Session: the scan cursor over one input
//!
//! A session owns its copy of the input, a byte offset into it and the current
//! [`Position`]. Each scan step:
//!
//! 1. skips one run of horizontal whitespace,
//! 2. reports [`Token::EOF`] if nothing remains,
//! 3. tries the scanner's rules in order and reports the first match,
//! 4. otherwise reports [`Token::ERROR`].
//!
//! [`Session::peek`] runs the step without touching the cursor. [`Session::next_token`]
//! commits the whitespace skip and, for real tokens, the matched text. At `EOF` or
//! `ERROR` nothing past the whitespace is consumed, so repeated calls keep returning the
//! same terminal result.
//!
//! A session is not meant to be advanced from several threads; it takes `&mut self`.

use super::error::ScanError;
use super::position::Position;
use super::result::ScanResult;
use super::scanner::Scanner;
use super::token::Token;

/// Outcome of a scan step before anything is committed
struct Step {
    /// Byte offset where the token (or terminal) starts, past the whitespace.
    start: usize,
    /// Position at `start`.
    pos: Position,
    /// Matched token and its byte length, `None` at EOF or on ERROR.
    matched: Option<(Token, usize)>,
}

#[derive(Debug)]
pub struct Session<'s> {
    scanner: &'s Scanner,
    input: String,
    offset: usize,
    pos: Position,
    /// Set once the iterator has handed out its terminal item.
    exhausted: bool,
}

impl<'s> Session<'s> {
    pub(crate) fn new(scanner: &'s Scanner, input: String) -> Self {
        Self {
            scanner,
            input,
            offset: 0,
            pos: Position::start(),
            exhausted: false,
        }
    }

    /// Look at the next token without consuming anything.
    pub fn peek(&self) -> ScanResult {
        self.result_of(&self.step())
    }

    /// Scan the next token and consume it.
    ///
    /// Named `next_token` so it doesn't shadow [`Iterator::next`].
    pub fn next_token(&mut self) -> ScanResult {
        let step = self.step();
        let result = self.result_of(&step);

        self.offset = step.start;
        self.pos = step.pos;

        match step.matched {
            Some((token, len)) => {
                self.offset += len;
                self.pos.advance(&result.value);
                tracing::trace!(%token, pos = %result.pos, value = %result.value, "token");
            }
            None if result.is_error() => {
                tracing::debug!(pos = %result.pos, "no rule matches");
            }
            None => {}
        }

        result
    }

    /// Drain the session into a list of real tokens, stopping at EOF.
    ///
    /// An ERROR step becomes [`ScanError::Unrecognized`]; the session stays parked at the
    /// offending position.
    pub fn collect_tokens(&mut self) -> Result<Vec<ScanResult>, ScanError> {
        let mut tokens = Vec::new();
        loop {
            let result = self.next_token();
            match result.token {
                Token::EOF => return Ok(tokens),
                Token::ERROR => {
                    return Err(ScanError::Unrecognized {
                        position: result.pos,
                    })
                }
                _ => tokens.push(result),
            }
        }
    }

    /// Current position. Whitespace ahead of the cursor is not counted until `next_token` runs.
    pub fn position(&self) -> Position {
        self.pos
    }

    /// The input not yet consumed.
    pub fn remaining(&self) -> &str {
        &self.input[self.offset..]
    }

    /// True when only whitespace (or nothing) is left.
    pub fn is_at_end(&self) -> bool {
        let rest = self.remaining();
        self.scanner.whitespace_len(rest) == rest.len()
    }

    pub fn scanner(&self) -> &'s Scanner {
        self.scanner
    }

    fn step(&self) -> Step {
        let rest = self.remaining();
        let skip = self.scanner.whitespace_len(rest);
        let pos = self.pos.advanced(&rest[..skip]);
        let rest = &rest[skip..];

        let matched = if rest.is_empty() {
            None
        } else {
            self.scanner.match_at(rest)
        };

        Step {
            start: self.offset + skip,
            pos,
            matched,
        }
    }

    fn result_of(&self, step: &Step) -> ScanResult {
        match step.matched {
            Some((token, len)) => ScanResult::new(
                token,
                &self.input[step.start..step.start + len],
                step.pos,
            ),
            None if step.start == self.input.len() => ScanResult::eof(step.pos),
            None => ScanResult::error(step.pos),
        }
    }
}

/// Yields real tokens, then the ERROR result once if scanning got stuck. EOF ends the
/// iteration without being yielded.
impl Iterator for Session<'_> {
    type Item = ScanResult;

    fn next(&mut self) -> Option<ScanResult> {
        if self.exhausted {
            return None;
        }

        let result = self.next_token();
        if result.token.is_terminal() {
            self.exhausted = true;
        }
        if result.is_eof() {
            None
        } else {
            Some(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toki::scanner::Definition;

    const NUMBER: Token = Token::new(1);
    const PLUS: Token = Token::new(2);
    const STRING: Token = Token::new(3);

    fn arithmetic() -> Scanner {
        Scanner::new([
            Definition::new(NUMBER, "[0-9]+"),
            Definition::new(PLUS, r"\+"),
            Definition::new(STRING, "[a-z]+"),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_input_is_eof() {
        let scanner = arithmetic();
        let mut session = scanner.scan("");
        assert_eq!(session.next_token(), ScanResult::eof(Position::start()));
        assert!(session.is_at_end());
    }

    #[test]
    fn test_whitespace_only_input_is_eof_after_whitespace() {
        let scanner = arithmetic();
        let mut session = scanner.scan(" \t ");
        assert_eq!(session.peek(), ScanResult::eof(Position::new(1, 4)));
        assert_eq!(session.next_token(), ScanResult::eof(Position::new(1, 4)));
        assert_eq!(session.remaining(), "");
    }

    #[test]
    fn test_next_consumes_and_tracks_position() {
        let scanner = arithmetic();
        let mut session = scanner.scan("12 + ab");

        assert_eq!(
            session.next_token(),
            ScanResult::new(NUMBER, "12", Position::new(1, 1))
        );
        assert_eq!(session.position(), Position::new(1, 3));
        assert_eq!(session.remaining(), " + ab");

        assert_eq!(
            session.next_token(),
            ScanResult::new(PLUS, "+", Position::new(1, 4))
        );
        assert_eq!(
            session.next_token(),
            ScanResult::new(STRING, "ab", Position::new(1, 6))
        );
        assert!(session.next_token().is_eof());
    }

    #[test]
    fn test_peek_does_not_move_cursor() {
        let scanner = arithmetic();
        let session = scanner.scan("   7");

        let first = session.peek();
        let second = session.peek();
        assert_eq!(first, second);
        assert_eq!(first, ScanResult::new(NUMBER, "7", Position::new(1, 4)));
        assert_eq!(session.position(), Position::start());
        assert_eq!(session.remaining(), "   7");
    }

    #[test]
    fn test_peek_then_next_agree() {
        let scanner = arithmetic();
        let mut session = scanner.scan("a+1");
        while !session.is_at_end() {
            let peeked = session.peek();
            assert_eq!(peeked, session.next_token());
        }
    }

    #[test]
    fn test_error_is_terminal_and_stable() {
        let scanner = arithmetic();
        let mut session = scanner.scan("1  # 2");

        assert_eq!(session.next_token().token, NUMBER);
        let error = session.next_token();
        assert_eq!(error, ScanResult::error(Position::new(1, 4)));
        for _ in 0..3 {
            assert_eq!(session.next_token(), error);
        }
        assert_eq!(session.remaining(), "# 2");
        assert_eq!(session.position(), Position::new(1, 4));
    }

    #[test]
    fn test_newline_without_rule_is_error() {
        let scanner = arithmetic();
        let mut session = scanner.scan("ab\ncd");
        assert_eq!(session.next_token().value, "ab");
        assert_eq!(session.next_token(), ScanResult::error(Position::new(1, 3)));
    }

    #[test]
    fn test_iterator_stops_at_eof() {
        let scanner = arithmetic();
        let values: Vec<String> = scanner.scan("1+2").map(|r| r.value).collect();
        assert_eq!(values, vec!["1", "+", "2"]);
    }

    #[test]
    fn test_iterator_yields_error_once() {
        let scanner = arithmetic();
        let tokens: Vec<Token> = scanner.scan("1 ? 2").map(|r| r.token).collect();
        assert_eq!(tokens, vec![NUMBER, Token::ERROR]);
    }

    #[test]
    fn test_collect_tokens() {
        let scanner = arithmetic();
        let tokens = scanner.scan("3 + x").collect_tokens().unwrap();
        assert_eq!(tokens.len(), 3);

        let err = scanner.scan("3 + X").collect_tokens().unwrap_err();
        assert!(matches!(
            err,
            ScanError::Unrecognized { position } if position == Position::new(1, 5)
        ));
    }
}
