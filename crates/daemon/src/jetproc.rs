// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process supervision: spawns the jet worker binary, owns its stdio pipes,
//! and reaps it on exit. The engine crate never sees any of this — it only
//! depends on [`skywatch_engine::JetChannel`].
//!
//! Writes are issued synchronously against the child's stdin while the
//! scheduler lock is held: small and non-blocking for a properly sized pipe
//! buffer. Reads happen on a dedicated OS thread per jet, outside the lock,
//! and are forwarded into the reactor's fan-in channel.

use skywatch_core::{Command, Feedback, JetId};
use skywatch_engine::JetChannel;
use std::process::{Child, ChildStdin, Command as ProcessCommand, Stdio};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

/// Event produced by a jet's reader thread.
#[derive(Debug)]
pub enum JetEvent {
    Feedback(JetId, Feedback),
    /// The child's stdout closed, or a read otherwise failed — treated as
    /// an unexpected crash.
    Closed(JetId),
}

/// The controller's write endpoint to one jet, plus the child handle kept
/// alive for reaping.
pub struct JetProcess {
    child: Child,
    stdin: Option<ChildStdin>,
}

impl JetChannel for JetProcess {
    fn send_command(&mut self, command: Command) -> Result<(), String> {
        match &mut self.stdin {
            Some(stdin) => command.encode(stdin).map_err(|e| e.to_string()),
            None => Err("stdin already closed".to_string()),
        }
    }
}

impl JetProcess {
    /// Drops the write half. The jet worker's command loop reads this as an
    /// EOF and treats it as its own shutdown signal, so this is called
    /// before `reap` whenever the controller is tearing a jet down rather
    /// than waiting for it to finish on its own.
    pub fn close(&mut self) {
        self.stdin = None;
    }

    /// Blocks until the child exits.
    pub fn reap(&mut self) {
        match self.child.wait() {
            Ok(status) => info!(pid = self.child.id(), %status, "jet worker reaped"),
            Err(e) => warn!(pid = self.child.id(), error = %e, "failed to reap jet worker"),
        }
    }
}

/// Spawns the jet worker binary with `id`, `initial_fuel`, and the
/// configured landing/refuel durations as positional arguments, wires its
/// stdio, and starts a blocking reader thread that decodes `Feedback`
/// records and forwards them tagged by jet id.
pub fn spawn_jet(
    jet_binary: &std::path::Path,
    id: JetId,
    initial_fuel: i32,
    landing_secs: u64,
    refuel_secs: u64,
    events: UnboundedSender<JetEvent>,
) -> std::io::Result<JetProcess> {
    let mut child = ProcessCommand::new(jet_binary)
        .arg(id.as_u64().to_string())
        .arg(initial_fuel.to_string())
        .arg(landing_secs.to_string())
        .arg(refuel_secs.to_string())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    let stdin = child.stdin.take().expect("piped stdin");
    let stdout = child.stdout.take().expect("piped stdout");

    std::thread::spawn(move || reader_loop(id, stdout, events));

    info!(jet = %id, pid = child.id(), fuel = initial_fuel, "jet worker spawned");
    Ok(JetProcess {
        child,
        stdin: Some(stdin),
    })
}

fn reader_loop(id: JetId, mut stdout: impl std::io::Read, events: UnboundedSender<JetEvent>) {
    loop {
        match Feedback::decode(&mut stdout) {
            Ok(feedback) => {
                if events.send(JetEvent::Feedback(id, feedback)).is_err() {
                    return; // reactor has shut down
                }
            }
            Err(_) => {
                let _ = events.send(JetEvent::Closed(id));
                return;
            }
        }
    }
}
