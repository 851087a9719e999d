//! Rule files and output settings
//!
//! `defaults/toki.default.toml` is embedded so the binary always has sane output settings.
//! A rule file is layered on top of it via [`Loader`] before deserializing into
//! [`TokiConfig`]:
//!
//! ```toml
//! [[rules]]
//! name = "NUMBER"
//! pattern = "[0-9]+"
//!
//! [[rules]]
//! name = "PLUS"
//! pattern = '\+'
//! token = 10
//! ```
//!
//! Rules without an explicit `token` are numbered by position, starting at 1.

use super::error::ScanError;
use super::format::OutputFormat;
use super::scanner::{Definition, Scanner};
use super::token::Token;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, Source, ValueKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/toki.default.toml");

/// Top-level configuration consumed by the `toki` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct TokiConfig {
    pub output: OutputConfig,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl TokiConfig {
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::from_configs(&self.rules)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub fail_on_error: bool,
}

/// One `[[rules]]` entry as written in a rule file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleConfig {
    pub name: String,
    pub pattern: String,
    #[serde(default)]
    pub token: Option<u32>,
}

impl RuleConfig {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: u32) -> Self {
        self.token = Some(token);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRule {
    pub name: String,
    pub definition: Definition,
}

/// Rule entries with their token ids resolved, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<NamedRule>,
}

impl RuleSet {
    pub fn from_configs(configs: &[RuleConfig]) -> Self {
        let rules = configs
            .iter()
            .zip(1u32..)
            .map(|(config, ordinal)| NamedRule {
                name: config.name.clone(),
                definition: Definition::new(
                    config.token.unwrap_or(ordinal),
                    config.pattern.clone(),
                ),
            })
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[NamedRule] {
        &self.rules
    }

    pub fn definitions(&self) -> impl Iterator<Item = Definition> + '_ {
        self.rules.iter().map(|rule| rule.definition.clone())
    }

    /// Compile into a [`Scanner`].
    ///
    /// Fails if two rules resolve to the same token, then on the first rule the scanner
    /// itself rejects.
    pub fn compile(&self) -> Result<Scanner, ScanError> {
        self.check_unique_tokens()?;
        Scanner::new(self.definitions())
    }

    fn check_unique_tokens(&self) -> Result<(), ScanError> {
        let mut seen: HashMap<Token, &str> = HashMap::with_capacity(self.rules.len());
        for rule in &self.rules {
            if let Some(first) = seen.insert(rule.definition.token, &rule.name) {
                return Err(ScanError::DuplicateToken {
                    token: rule.definition.token,
                    first: first.to_string(),
                    second: rule.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Name of the rule declaring `token`.
    pub fn name_of(&self, token: Token) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.definition.token == token)
            .map(|rule| rule.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builds a [`TokiConfig`] from the embedded defaults, then any rule sources, then
/// command-line settings. Later layers win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
        .layer(File::from_str(DEFAULT_TOML, FileFormat::Toml))
    }

    /// Read rules (and optionally `[output]` settings) from a TOML file that must exist.
    pub fn with_rules_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(File::from(path.as_ref()).format(FileFormat::Toml).required(true))
    }

    pub fn with_rules_toml(self, contents: &str) -> Self {
        self.layer(File::from_str(contents, FileFormat::Toml))
    }

    pub fn with_format(self, format: OutputFormat) -> Result<Self, ConfigError> {
        self.set("output.format", format.name())
    }

    pub fn with_fail_on_error(self, fail_on_error: bool) -> Result<Self, ConfigError> {
        self.set("output.fail_on_error", fail_on_error)
    }

    pub fn build(self) -> Result<TokiConfig, ConfigError> {
        let config: TokiConfig = self.builder.build()?.try_deserialize()?;
        tracing::debug!(rules = config.rules.len(), format = %config.output.format, "loaded config");
        Ok(config)
    }

    fn layer<S>(mut self, source: S) -> Self
    where
        S: Source + Send + Sync + 'static,
    {
        self.builder = self.builder.add_source(source);
        self
    }

    fn set(mut self, key: &str, value: impl Into<ValueKind>) -> Result<Self, ConfigError> {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
