//! Rendering scan results for humans and tools

use super::config::RuleSet;
use super::position::Position;
use super::result::ScanResult;
use super::token::Token;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Text, OutputFormat::Json, OutputFormat::Yaml];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FormatError::UnknownFormat(s.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unknown output format '{0}' (expected text, json or yaml)")]
    UnknownFormat(String),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A result paired with its rule name, the shape written by the structured formats
#[derive(Debug, Serialize)]
struct NamedResult<'a> {
    name: &'a str,
    token: Token,
    value: &'a str,
    line: usize,
    column: usize,
}

fn display_name<'a>(rules: &'a RuleSet, token: Token) -> &'a str {
    match token {
        Token::EOF => "EOF",
        Token::ERROR => "ERROR",
        _ => rules.name_of(token).unwrap_or("?"),
    }
}

/// Render `results` in `format`, naming tokens after the rules in `rules`.
///
/// Text output is one line per result: the rule name followed by the result's own
/// display, e.g. `NUMBER Line: 1, Column: 1, 42`.
pub fn render(
    results: &[ScanResult],
    rules: &RuleSet,
    format: OutputFormat,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::Text => Ok(results
            .iter()
            .map(|result| format!("{} {}\n", display_name(rules, result.token), result))
            .collect()),
        OutputFormat::Json => {
            let named = named_results(results, rules);
            let mut out = serde_json::to_string_pretty(&named)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&named_results(results, rules))?),
    }
}

fn named_results<'a>(results: &'a [ScanResult], rules: &'a RuleSet) -> Vec<NamedResult<'a>> {
    results
        .iter()
        .map(|result| {
            let Position { line, column } = result.pos;
            NamedResult {
                name: display_name(rules, result.token),
                token: result.token,
                value: &result.value,
                line,
                column,
            }
        })
        .collect()
}
