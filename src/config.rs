//! Import configuration
//!
//! Settings can be built in code or loaded from a TOML file:
//!
//! ```toml
//! skip-hidden = true
//! require-namespace = false
//!
//! [output]
//! pretty = true
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How a document is walked and what ends up in the report
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImportConfig {
    /// Leave hidden shapes, and everything inside them, out of the result
    pub skip_hidden: bool,
    /// Reject documents whose root does not declare the penpot namespace
    pub require_namespace: bool,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Indent JSON output
    pub pretty: bool,
    /// Include the list of skipped nodes
    pub report_skipped: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            skip_hidden: false,
            require_namespace: true,
            output: OutputConfig::default(),
        }
    }
}

impl ImportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a configuration from a TOML string; missing keys keep their defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    pub fn with_require_namespace(mut self, require: bool) -> Self {
        self.require_namespace = require;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.output.pretty = pretty;
        self
    }

    pub fn with_report_skipped(mut self, report: bool) -> Self {
        self.output.report_skipped = report;
        self
    }
}
