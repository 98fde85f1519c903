// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Unix signal relay.
//!
//! ```text
//! SignalRelay::listen()            before spawn
//!   one task per catchable signal
//!   tokio::signal::unix::signal(kind).recv()
//!        |
//!        v  mpsc (signal number)
//! supervisor select loop
//!   forward(pid, signo) --> kill(2)
//!
//! not relayed: SIGKILL, SIGSTOP (uncatchable)
//!              SIGSEGV, SIGBUS, SIGILL, SIGFPE, SIGTRAP (faults)
//!              SIGCHLD (our own child's exit)
//! ```

use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Signal as delivered to the supervisor.
pub(super) type RawSignal = i32;

/// Signals the relay listens for.
pub(super) fn relayed_signals() -> impl Iterator<Item = Signal> {
    Signal::iterator().filter(|sig| {
        !matches!(
            sig,
            Signal::SIGKILL
                | Signal::SIGSTOP
                | Signal::SIGSEGV
                | Signal::SIGBUS
                | Signal::SIGILL
                | Signal::SIGFPE
                | Signal::SIGTRAP
                | Signal::SIGCHLD
        )
    })
}

/// Receives every relayable signal delivered to this process.
///
/// Listener tasks stop when the relay is dropped.
pub(super) struct SignalRelay {
    rx: mpsc::UnboundedReceiver<RawSignal>,
    token: CancellationToken,
}

impl SignalRelay {
    /// Installs the signal listeners. Must be called inside a tokio runtime.
    pub(super) fn listen() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();

        for sig in relayed_signals() {
            let signo = sig as RawSignal;
            let mut stream = match signal(SignalKind::from_raw(signo)) {
                Ok(stream) => stream,
                Err(e) => {
                    debug!(signal = %sig, error = %e, "cannot listen for signal");
                    continue;
                }
            };

            let tx = tx.clone();
            let token = token.clone();
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        () = token.cancelled() => break,
                        received = stream.recv() => {
                            if received.is_none() || tx.send(signo).is_err() {
                                break;
                            }
                        }
                    }
                }
            });
        }

        Self { rx, token }
    }

    /// Next received signal; `None` once no listener is left.
    pub(super) async fn recv(&mut self) -> Option<RawSignal> {
        self.rx.recv().await
    }
}

impl Drop for SignalRelay {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Sends `signo` unchanged to the child. Best effort: failures are logged.
pub(super) fn forward(pid: u32, signo: RawSignal) {
    let Ok(raw_pid) = i32::try_from(pid) else {
        warn!(pid = pid, "child pid out of range, cannot forward signal");
        return;
    };
    let sig = match Signal::try_from(signo) {
        Ok(sig) => sig,
        Err(e) => {
            warn!(signal = signo, error = %e, "unknown signal");
            return;
        }
    };

    trace!(pid = pid, signal = %sig, "forwarding signal");
    if let Err(e) = kill(Pid::from_raw(raw_pid), sig) {
        warn!(pid = pid, signal = %sig, error = %e, "failed to forward signal");
    } else {
        debug!(pid = pid, signal = %sig, "forwarded signal");
    }
}
