//! # toki
//!
//! A generic lexical scanner. Given an ordered list of token definitions (a token id and a
//! regular expression each), toki splits input text into tokens, skipping horizontal
//! whitespace between them and tracking 1-based line/column positions.
//!
//! ```text
//! let scanner = Scanner::new([
//!     Definition::new(NUMBER, "[0-9]+"),
//!     Definition::new(PLUS, r"\+"),
//! ])?;
//! let mut session = scanner.scan("1 + 2");
//! while !session.peek().token.is_terminal() {
//!     println!("{}", session.next_token());
//! }
//! ```
//!
//! Rules are tried in declaration order and the first match wins. Scanning never fails
//! with an error value: end of input and unrecognized input are reported as the
//! [`Token::EOF`] and [`Token::ERROR`] sentinels.

pub mod toki;

pub use toki::config::{Loader, RuleConfig, RuleSet, TokiConfig};
pub use toki::error::ScanError;
pub use toki::format::{render, FormatError, OutputFormat};
pub use toki::position::Position;
pub use toki::result::ScanResult;
pub use toki::scanner::{Definition, Scanner};
pub use toki::session::Session;
pub use toki::token::Token;
