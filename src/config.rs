//! Configuration loading
//!
//! `defaults/macrosub.default.toml` is embedded into the binary so the
//! documented defaults and runtime behavior stay in sync. Callers layer an
//! optional file and the environment on top of those defaults via [`Loader`]
//! before deserializing into [`MacrosubConfig`].

use crate::batch::{BatchOptions, FailurePolicy};
use crate::rewrite::RewriteOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/macrosub.default.toml");

/// Name of the optional per-project configuration file
pub const CONFIG_FILE: &str = "macrosub.toml";

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "MACROSUB";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MacrosubConfig {
    pub batch: BatchConfig,
    pub rewrite: RewriteConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    pub on_error: FailurePolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewriteConfig {
    pub preserve_permissions: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub filter: String,
}

impl MacrosubConfig {
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            on_error: self.batch.on_error,
            rewrite: RewriteOptions {
                preserve_permissions: self.rewrite.preserve_permissions,
            },
        }
    }
}

/// Helper for layering overrides over the built-in defaults.
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `MACROSUB_*` environment variables, e.g.
    /// `MACROSUB_BATCH__ON_ERROR=continue`.
    pub fn with_environment(mut self) -> Self {
        let source = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MacrosubConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MacrosubConfig, ConfigError> {
    Loader::new().build()
}
