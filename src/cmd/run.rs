// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The starter pipeline.
//!
//! ```text
//! environment
//!     |
//!     v
//! extend_variables ---------------------------> VarTable
//!     |
//!     v
//! fill_args(cmd, dir)        cmd first, then dir
//!     |
//!     v
//! find_template_files(dir)   listing order
//!     |
//!     v
//! process_template(each)     stops at the first failure
//!     |
//!     v
//! execute_command(cmd, args) --> ExitStatus
//! ```
//!
//! Every stage runs to completion before the next one starts. The command
//! is never started if any earlier stage failed.

use std::process::ExitStatus;

use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::Config;
use crate::core::process::execute_command_with_mode;
use crate::core::template::{TemplateProcessor, fill_args};
use crate::core::vars::read_extended_variables;
use crate::core::vars::table::VarTable;
use crate::error::{Result, StarterError};

/// Runs the pipeline on the current process environment.
///
/// # Errors
///
/// Returns the first stage failure; see [`run_with_variables`].
pub async fn run_starter(cli: &Cli, config: &Config) -> Result<ExitStatus> {
    let vars = read_extended_variables();
    run_with_variables(&vars, &cli.cmd, &cli.dir, &cli.args, config).await
}

/// Runs the pipeline on an already extended variable table.
///
/// # Errors
///
/// Returns a template error for `cmd`/`dir`, a file error for the first
/// template that cannot be rendered, or a process error if the command
/// cannot be started or waited for.
pub async fn run_with_variables(
    vars: &VarTable,
    cmd_template: &str,
    dir_template: &str,
    args: &[String],
    config: &Config,
) -> Result<ExitStatus> {
    let (cmd, dir) = fill_args(cmd_template, dir_template, vars).map_err(StarterError::from)?;
    debug!(cmd = %cmd, dir = %dir, "filled arguments");

    let processor = TemplateProcessor::builder()
        .dir(dir)
        .suffix(config.templates.suffix.as_str())
        .force(config.templates.force)
        .build();

    let files = processor.find_template_files()?;
    for file in &files {
        processor.process_template(file, vars)?;
    }
    info!(count = files.len(), dir = %processor.dir().display(), "templates processed");

    let status = execute_command_with_mode(&cmd, args, vars, config.process.mode).await?;
    Ok(status)
}
