// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Launching the target command.
//!
//! ```text
//! execute_command(cmd, args, vars)
//!        |
//!        v
//! CommandSpec::resolve()   which + env flattening
//!        |
//!   LaunchMode
//!   /        \
//!  v          v
//! Supervise   Replace (Unix)
//! spawn       execve, never returns on success
//! relay signals
//! wait --> ExitStatus
//! ```

pub mod command;
#[cfg(unix)]
mod replace;
#[cfg(unix)]
mod signals;
mod supervisor;
#[cfg(windows)]
mod windows;

use std::process::ExitStatus;

use serde::{Deserialize, Serialize};

use crate::core::vars::table::VarTable;
use crate::error::StarterResult;

pub use command::CommandSpec;
pub use supervisor::supervise;

/// How the target command is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    /// Spawn a child, relay signals to it and wait for it.
    #[default]
    Supervise,
    /// Replace this process with the command (Unix only).
    Replace,
}

impl LaunchMode {
    /// Whether this platform can launch in this mode.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        match self {
            Self::Supervise => true,
            Self::Replace => cfg!(unix),
        }
    }
}

impl std::fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Supervise => write!(f, "supervise"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

/// Resolves `cmd`, then runs it with `vars` as its environment.
///
/// # Errors
///
/// Returns `ProcessError::CommandNotFound`, `Exec` or `Wait`.
pub async fn execute_command(
    cmd: &str,
    extra_args: &[String],
    vars: &VarTable,
) -> StarterResult<ExitStatus> {
    execute_command_with_mode(cmd, extra_args, vars, LaunchMode::Supervise).await
}

/// Like [`execute_command`], with an explicit launch mode.
///
/// In [`LaunchMode::Replace`] this only returns on failure.
///
/// # Errors
///
/// Returns `ProcessError::CommandNotFound`, `Exec`, `Wait` or `Unsupported`.
pub async fn execute_command_with_mode(
    cmd: &str,
    extra_args: &[String],
    vars: &VarTable,
    mode: LaunchMode,
) -> StarterResult<ExitStatus> {
    let spec = CommandSpec::resolve(cmd, extra_args, vars).inspect_err(|e| {
        tracing::error!(cmd = %cmd, error = %e, "error executing command");
    })?;

    match mode {
        LaunchMode::Supervise => supervise(&spec).await,
        #[cfg(unix)]
        LaunchMode::Replace => Err(replace::replace_process(&spec).into()),
        #[cfg(not(unix))]
        LaunchMode::Replace => {
            Err(crate::error::ProcessError::Unsupported(format!("launch mode '{mode}'")).into())
        }
    }
}
