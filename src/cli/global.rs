// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Options that map onto configuration keys.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Extra TOML file, after starter.toml
//! --log-level N     ← global.log_level (0-5)
//! --log-file FILE   ← global.log_file
//! --mode MODE       ← process.mode
//!
//! Precedence: CLI flags > STARTER_* env > --config > starter.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::core::process::LaunchMode;

/// Options layered over the configuration files.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to an additional TOML configuration file.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5))]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// How to start the command.
    #[arg(long = "mode", value_name = "MODE", value_enum)]
    pub mode: Option<LaunchMode>,
}

impl GlobalOptions {
    /// Converts command-line options to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides = Vec::new();

        if let Some(level) = self.log_level {
            overrides.push(("global.log_level", level.into()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file", path.display().to_string().into()));
        }

        if let Some(mode) = self.mode {
            overrides.push(("process.mode", mode.to_string().into()));
        }

        overrides
    }
}
