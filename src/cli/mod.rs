// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for starter-rs using clap derive.
//!
//! # Command Line
//!
//! ```text
//! starter --cmd TEMPLATE [--dir TEMPLATE] [--force]
//!         [-c FILE] [-l LEVEL] [--log-file FILE] [--mode MODE]
//!         [-- ARGS...]
//!
//! --cmd   ← STARTER_CMD
//! --dir   ← STARTER_DIR (default ".")
//! ARGS    → passed verbatim to the command
//! ```

pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use clap::Parser;

/// Environment-driven config templating and process starter
///
/// Renders every template file in a directory from the environment, then
/// starts a command and relays signals to it.
#[derive(Debug, Parser)]
#[command(
    name = "starter",
    author,
    version,
    about = "Environment-driven config templating and process starter",
    long_about = "starter-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Extends the environment with URL variables derived from\n\
                  container link variables, renders every `*.tmpl` file in\n\
                  --dir next to itself, then starts --cmd with the extended\n\
                  environment. Both --cmd and --dir may themselves contain\n\
                  template markup.",
    after_help = "TEMPLATES:\n\n\
                  {{E \"KEY\"}}         first value of KEY, empty if unset\n\
                  {{J \"KEY\"}}         all values of KEY joined with ','\n\
                  {{J \"KEY\" \"#\"}}     all values of KEY joined with '#'\n\
                  {{KEY}}             first value of KEY, an error if unset\n\n\
                  Existing files are never overwritten unless --force is given."
)]
pub struct Cli {
    /// Command to start; may contain template markup.
    #[arg(long, env = "STARTER_CMD", value_name = "TEMPLATE")]
    pub cmd: String,

    /// Directory holding the template files; may contain template markup.
    #[arg(long, env = "STARTER_DIR", value_name = "TEMPLATE", default_value = ".")]
    pub dir: String,

    /// Overwrite existing destination files.
    #[arg(long)]
    pub force: bool,

    /// Options shared with the configuration files
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Arguments passed verbatim to the command
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

impl Cli {
    /// All configuration overrides given on the command line.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides = self.global.to_config_overrides();
        if self.force {
            overrides.push(("templates.force", true.into()));
        }
        overrides
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
