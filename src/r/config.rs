//! Configuration loader for the rparse tool.
//!
//! `defaults/rparse.default.toml` is embedded into the binary so that documented defaults
//! and runtime behavior cannot drift. User files are layered on top of those defaults via
//! [`Loader`] before deserializing into [`RConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/rparse.default.toml");

/// Top-level configuration consumed by rparse.
#[derive(Debug, Clone, Deserialize)]
pub struct RConfig {
    pub inspect: InspectConfig,
    pub check: CheckConfig,
}

/// Controls the token and tree dumps.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub tokens: TokensConfig,
    pub treeviz: TreevizConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokensConfig {
    pub include_trivia: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreevizConfig {
    pub show_line_numbers: bool,
    pub label_width: usize,
}

impl TreevizConfig {
    /// Parameters understood by
    /// [to_treeviz_str_with_params](crate::r::formats::to_treeviz_str_with_params)
    pub fn to_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert(
            "show-linum".to_string(),
            self.show_line_numbers.to_string(),
        );
        params.insert("label-width".to_string(), self.label_width.to_string());
        params
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckConfig {
    /// 0 means no limit
    pub max_errors: usize,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file, ignored when absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. from a command-line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<RConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<RConfig, ConfigError> {
    Loader::new().build()
}
