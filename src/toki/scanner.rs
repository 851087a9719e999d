//! Scanner: the immutable rule registry
//!
//! A [`Scanner`] is built once from an ordered list of [`Definition`]s and then opens any
//! number of independent [`Session`]s.
//!
//! ## Rule order
//!
//! Rules are tried in declaration order and the first one that matches at the current
//! position wins. This is neither longest-match nor specificity-based: callers order more
//! specific patterns before more general ones.
//!
//! ```text
//! NUMBER  [0-9]+
//! PLUS    \+
//! STRING  [a-z]+
//! ```
//!
//! ## Anchoring
//!
//! Every pattern is compiled as `\A(?:pattern)` so it can only match at the start of the
//! remaining input. The group keeps top-level alternations such as `a|b` anchored as a
//! whole. Invalid patterns fail construction; nothing is deferred to scan time. So do
//! patterns that can match the empty string, since such a rule would win without consuming
//! anything.
//!
//! ## Sharing
//!
//! Compiled `regex::Regex` values are safe for concurrent read-only use, so a `Scanner`
//! is `Send + Sync` and can back sessions on several threads at once.

use super::error::ScanError;
use super::session::Session;
use super::token::Token;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Horizontal whitespace skipped before every token. Newlines are not whitespace here.
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A[\t ]+").unwrap());

/// A token identifier paired with the pattern that recognizes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub token: Token,
    pub pattern: String,
}

impl Definition {
    pub fn new(token: impl Into<Token>, pattern: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            pattern: pattern.into(),
        }
    }
}

/// A definition together with its compiled, start-anchored matcher
#[derive(Debug, Clone)]
struct Rule {
    definition: Definition,
    regex: Regex,
}

impl Rule {
    fn compile(definition: Definition) -> Result<Self, ScanError> {
        if definition.token.is_reserved() {
            return Err(ScanError::ReservedToken {
                token: definition.token,
            });
        }

        let anchored = format!(r"\A(?:{})", definition.pattern);
        let regex = Regex::new(&anchored).map_err(|source| ScanError::InvalidPattern {
            token: definition.token,
            pattern: definition.pattern.clone(),
            source,
        })?;

        // `regex` accepted the pattern, so the syntax parser accepts it too.
        let matches_empty = regex_syntax::parse(&definition.pattern)
            .is_ok_and(|hir| hir.properties().minimum_len() == Some(0));
        if matches_empty {
            return Err(ScanError::EmptyMatch {
                token: definition.token,
                pattern: definition.pattern,
            });
        }

        Ok(Self { definition, regex })
    }

    /// Length in bytes of this rule's match at the start of `input`.
    fn match_len(&self, input: &str) -> Option<usize> {
        self.regex.find(input).map(|m| m.end())
    }
}

/// The compiled, ordered rule set
#[derive(Debug, Clone)]
pub struct Scanner {
    rules: Vec<Rule>,
}

impl Scanner {
    /// Compile `definitions` in order.
    ///
    /// Fails on the first definition whose pattern does not compile, can match the empty
    /// string, or whose token is one of the reserved sentinels.
    pub fn new<I>(definitions: I) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = Definition>,
    {
        let rules = definitions
            .into_iter()
            .map(Rule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(rules = rules.len(), "compiled scanner");
        Ok(Self { rules })
    }

    /// Open a session over a private copy of `input`, positioned at line 1, column 1.
    pub fn scan(&self, input: impl Into<String>) -> Session<'_> {
        Session::new(self, input.into())
    }

    /// The definitions in the order they are tried.
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> + '_ {
        self.rules.iter().map(|rule| &rule.definition)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Byte length of the whitespace run at the start of `input`, zero if none.
    pub(crate) fn whitespace_len(&self, input: &str) -> usize {
        WHITESPACE.find(input).map_or(0, |m| m.end())
    }

    /// First rule matching at the start of `input`, with the matched byte length.
    pub(crate) fn match_at(&self, input: &str) -> Option<(Token, usize)> {
        self.rules.iter().find_map(|rule| {
            rule.match_len(input)
                .map(|len| (rule.definition.token, len))
        })
    }
}
