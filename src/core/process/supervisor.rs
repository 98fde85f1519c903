// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Spawn, relay, wait.
//!
//! ```text
//! SignalRelay::listen()
//!        |
//!        v
//! spawn(CommandSpec)  --> Exec error
//!        |
//!        v
//! loop select {
//!   child.wait()  --> ExitStatus / Wait error
//!   relay.recv()  --> forward(pid, sig)
//! }
//! ```
//!
//! The wait has no timeout. A SIGKILL to the supervisor cannot be relayed.

use std::process::ExitStatus;

use tracing::{info, warn};

use super::command::CommandSpec;
use crate::error::{ProcessError, StarterResult};

#[cfg(unix)]
use super::signals::{SignalRelay, forward};
#[cfg(windows)]
use super::windows::{SignalRelay, forward};

/// Starts the command and waits for it, relaying signals until it exits.
///
/// # Errors
///
/// Returns `ProcessError::Exec` if the child cannot be started and
/// `ProcessError::Wait` if waiting for it fails.
pub async fn supervise(spec: &CommandSpec) -> StarterResult<ExitStatus> {
    #[cfg(any(unix, windows))]
    let mut relay = SignalRelay::listen();

    info!(binary = %spec.binary().display(), args = ?spec.args(), "starting");

    let mut child = spec.to_command().spawn().map_err(|source| ProcessError::Exec {
        command: spec.program().to_string(),
        source,
    })?;

    let Some(pid) = child.id() else {
        // Already reaped; nothing to relay to.
        let status = child.wait().await.map_err(|source| ProcessError::Wait {
            command: spec.program().to_string(),
            source,
        })?;
        return Ok(status);
    };
    info!(pid = pid, "process started");

    let status = loop {
        #[cfg(any(unix, windows))]
        {
            tokio::select! {
                status = child.wait() => break status,
                Some(sig) = relay.recv() => forward(pid, sig),
            }
        }

        #[cfg(not(any(unix, windows)))]
        {
            warn!("signal relay is not available on this platform");
            break child.wait().await;
        }
    };

    let status = status.map_err(|source| ProcessError::Wait {
        command: spec.program().to_string(),
        source,
    })?;

    if status.success() {
        info!(pid = pid, status = %status, "process exited");
    } else {
        warn!(pid = pid, status = %status, "process exited");
    }
    Ok(status)
}
