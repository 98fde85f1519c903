// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process image replacement (`execve`), Unix only.
//!
//! The child takes over this process, its pid and its signals, so no relay
//! is involved. Returns only if the replacement failed.

use std::os::unix::process::CommandExt;
use std::process::Command;

use tracing::info;

use super::command::CommandSpec;
use crate::error::ProcessError;

/// Replaces the current process with the command.
pub(super) fn replace_process(spec: &CommandSpec) -> ProcessError {
    info!(binary = %spec.binary().display(), args = ?spec.args(), "replacing process");

    let source = Command::new(spec.binary())
        .arg0(spec.program())
        .args(spec.args())
        .env_clear()
        .envs(spec.env().iter().map(|(k, v)| (k, v)))
        .exec();

    ProcessError::Exec {
        command: spec.program().to_string(),
        source,
    }
}
