// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for starter-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. starter.toml (cwd, optional)
//! 3. --config
//! 4. STARTER_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! STARTER_GLOBAL__LOG_LEVEL=4       → global.log_level = 4
//! STARTER_TEMPLATES__SUFFIX=.in     → templates.suffix = ".in"
//! STARTER_PROCESS__MODE=replace     → process.mode = "replace"
//! ```
//!
//! A double underscore separates sections so that keys may contain single
//! underscores. `STARTER_CMD` and `STARTER_DIR` belong to the CLI and are
//! not configuration keys.

pub mod loader;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::process::LaunchMode;
use crate::core::template::TEMPLATE_SUFFIX;
use crate::error::{ConfigError, Result};
use crate::logging::LogLevel;

use loader::ConfigLoader;

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "starter.toml";

/// Environment variable prefix for configuration keys.
pub const ENV_PREFIX: &str = "STARTER";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Template file processing.
    pub templates: TemplatesConfig,
    /// Target process launching.
    pub process: ProcessConfig,
}

/// Logging options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Console verbosity, 0 (silent) to 5 (trace).
    pub log_level: LogLevel,
    /// Optional log file; file logging is off without it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Suffix marking template files.
    pub suffix: String,
    /// Overwrite existing destination files.
    pub force: bool,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            suffix: TEMPLATE_SUFFIX.to_string(),
            force: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessConfig {
    pub mode: LaunchMode,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use starter_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("starter.toml")
    ///     .with_env_prefix("STARTER")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unusable template suffix or
    /// a launch mode this platform does not support.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let suffix = self.templates.suffix.as_str();
        if suffix.is_empty() || suffix.chars().all(|c| c == '.') {
            return Err(ConfigError::InvalidValue {
                section: "templates".to_string(),
                key: "suffix".to_string(),
                message: format!("expected a file name suffix such as '.tmpl', got '{suffix}'"),
            });
        }

        if !self.process.mode.is_supported() {
            return Err(ConfigError::InvalidValue {
                section: "process".to_string(),
                key: "mode".to_string(),
                message: format!("'{}' is not supported on this platform", self.process.mode),
            });
        }

        Ok(())
    }

    /// Format configuration options for display, one `key = value` per line.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "global.log_level",
            self.global.log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("templates.suffix", self.templates.suffix.clone());
        options.insert("templates.force", self.templates.force.to_string());
        options.insert("process.mode", self.process.mode.to_string());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
