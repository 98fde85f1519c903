// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Windows console-control relay.
//!
//! ```text
//! child spawned with CREATE_NEW_PROCESS_GROUP
//! ctrl_c / ctrl_break received --> GenerateConsoleCtrlEvent(CTRL_BREAK_EVENT, pid)
//! ```
//!
//! Only interrupt-style events are relayed; there is no portable way to
//! deliver anything else to another process.

use tokio::process::Command;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Console event as delivered to the supervisor.
pub(super) type RawSignal = u32;

const CTRL_C: RawSignal = 0;
const CTRL_BREAK: RawSignal = 1;

pub(super) fn configure(command: &mut Command) {
    command.creation_flags(windows::Win32::System::Threading::CREATE_NEW_PROCESS_GROUP.0);
}

pub(super) struct SignalRelay {
    rx: mpsc::UnboundedReceiver<RawSignal>,
    token: CancellationToken,
}

impl SignalRelay {
    pub(super) fn listen() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();

        match tokio::signal::windows::ctrl_c() {
            Ok(mut stream) => {
                let tx = tx.clone();
                let token = token.clone();
                tokio::spawn(async move {
                    loop {
                        tokio::select! {
                            () = token.cancelled() => break,
                            received = stream.recv() => {
                                if received.is_none() || tx.send(CTRL_C).is_err() {
                                    break;
                                }
                            }
                        }
                    }
                });
            }
            Err(e) => debug!(error = %e, "cannot listen for ctrl-c"),
        }

        match tokio::signal::windows::ctrl_break() {
            Ok(mut stream) => {
                let token = token.clone();
                tokio::spawn(async move {
                    loop {
                        tokio::select! {
                            () = token.cancelled() => break,
                            received = stream.recv() => {
                                if received.is_none() || tx.send(CTRL_BREAK).is_err() {
                                    break;
                                }
                            }
                        }
                    }
                });
            }
            Err(e) => debug!(error = %e, "cannot listen for ctrl-break"),
        }

        Self { rx, token }
    }

    pub(super) async fn recv(&mut self) -> Option<RawSignal> {
        self.rx.recv().await
    }
}

impl Drop for SignalRelay {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Relays a console event to the child's process group as CTRL_BREAK.
pub(super) fn forward(pid: u32, event: RawSignal) {
    use windows::Win32::System::Console::{CTRL_BREAK_EVENT, GenerateConsoleCtrlEvent};

    // SAFETY: GenerateConsoleCtrlEvent is safe to call with a valid process group ID
    let result = unsafe { GenerateConsoleCtrlEvent(CTRL_BREAK_EVENT, pid) };
    match result {
        Ok(()) => debug!(pid = pid, event = event, "forwarded console event"),
        Err(e) => warn!(pid = pid, event = event, error = %e.message(), "failed to forward console event"),
    }
}
