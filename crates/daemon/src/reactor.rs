// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The I/O reactor: multiplexes the arrival source, the operator console,
//! and every live jet's feedback onto a single fan-in channel, and applies
//! each event to the scheduler state under its lock.
//!
//! Conceptually this polls every readiness source up to every 100ms; here
//! that is realized as an event-driven `mpsc` fan-in instead of a literal
//! timed poll (see DESIGN.md's open-question note) — every producer
//! (arrival source, console, each jet's reader thread) pushes into the
//! same queue, and `recv().await` resolves the instant any of them has
//! something, which only tightens the 100ms staleness bound.

use crate::console::{self, OperatorCommand};
use crate::jetproc::{spawn_jet, JetEvent, JetProcess};
use crate::logging::RunLog;
use skywatch_core::{CompletedJetStats, FeedbackKind, IdGen, JetId, SequentialIdGen};
use skywatch_engine::jet::JetRecord;
use skywatch_engine::{handle_emergency, handle_refuel_request, handle_refueled, QueueId, StatsLog};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{error, info, warn};

pub enum ReactorEvent {
    Arrival { fuel: i32 },
    ArrivalsDone,
    Operator(OperatorCommand),
    Jet(JetEvent),
}

pub type SharedState = skywatch_engine::SharedState<JetProcess>;

/// Runs until arrivals are done and no jets remain live, or an `exit`
/// operator command is received.
pub async fn run(
    state: SharedState,
    stats: Arc<StatsLog>,
    run_log: Arc<RunLog>,
    jet_binary: PathBuf,
    landing_secs: u64,
    refuel_secs: u64,
    mut events: UnboundedReceiver<ReactorEvent>,
    jet_event_tx: UnboundedSender<JetEvent>,
) {
    let ids = SequentialIdGen::new();
    let mut arrivals_done = false;
    let mut live: u64 = 0;

    while let Some(event) = events.recv().await {
        match event {
            ReactorEvent::Arrival { fuel } => {
                if spawn_and_register(
                    &state,
                    &jet_binary,
                    &ids,
                    fuel,
                    landing_secs,
                    refuel_secs,
                    &jet_event_tx,
                    &run_log,
                )
                .is_some()
                {
                    live += 1;
                }
            }
            ReactorEvent::ArrivalsDone => {
                arrivals_done = true;
                info!("arrivals done, {} jets still live", live);
            }
            ReactorEvent::Operator(OperatorCommand::Exit) => {
                info!("operator requested shutdown");
                drain_remaining_jets(&state, &run_log);
                break;
            }
            ReactorEvent::Operator(OperatorCommand::NewJet(fuel)) => {
                if spawn_and_register(
                    &state,
                    &jet_binary,
                    &ids,
                    fuel,
                    landing_secs,
                    refuel_secs,
                    &jet_event_tx,
                    &run_log,
                )
                .is_some()
                {
                    live += 1;
                }
            }
            ReactorEvent::Operator(OperatorCommand::ForceEmergency(id)) => {
                console::force_emergency(&mut state.lock(), id);
            }
            ReactorEvent::Operator(OperatorCommand::BoostPriority(id)) => {
                console::boost_priority(&mut state.lock(), id);
            }
            ReactorEvent::Operator(OperatorCommand::ChangeQuantum(n)) => {
                state.lock().config.q2_quantum = n;
            }
            ReactorEvent::Operator(OperatorCommand::Pause) => {
                state.lock().paused = true;
            }
            ReactorEvent::Operator(OperatorCommand::Resume) => {
                state.lock().paused = false;
            }
            ReactorEvent::Operator(OperatorCommand::Status) => {
                // The display task owns periodic snapshots; `status` just
                // logs one on demand.
                let snap = crate::display::snapshot(&*state.lock());
                info!("{}", crate::display::render_snapshot(&snap));
            }
            ReactorEvent::Jet(JetEvent::Feedback(id, feedback)) => {
                if apply_feedback(&state, &stats, &run_log, id, feedback.kind, feedback.data) {
                    live = live.saturating_sub(1);
                }
            }
            ReactorEvent::Jet(JetEvent::Closed(id)) => {
                warn!(jet = %id, "jet channel closed unexpectedly");
                complete_jet(&state, &stats, &run_log, id);
                live = live.saturating_sub(1);
            }
        }

        if arrivals_done && live == 0 {
            info!("no jets remain and arrivals are done, shutting down");
            break;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn spawn_and_register(
    state: &SharedState,
    jet_binary: &std::path::Path,
    ids: &SequentialIdGen,
    fuel: i32,
    landing_secs: u64,
    refuel_secs: u64,
    jet_event_tx: &UnboundedSender<JetEvent>,
    run_log: &RunLog,
) -> Option<JetId> {
    let id = ids.next();
    let process = match spawn_jet(jet_binary, id, fuel, landing_secs, refuel_secs, jet_event_tx.clone()) {
        Ok(p) => p,
        Err(e) => {
            error!(jet = %id, error = %e, "failed to spawn jet worker");
            return None;
        }
    };

    let arrival_ticks = state.lock().elapsed_ticks;
    let record = JetRecord::new(id, process, fuel, arrival_ticks);
    let mut guard = state.lock();
    if let Err(e) = guard.insert_new(record) {
        warn!(jet = %id, error = %e, "arrival dropped, Q2 is full");
        return None;
    }
    drop(guard);

    run_log.append(&format!("arrival {} fuel={}", id, fuel));
    Some(id)
}

/// Applies one feedback message. Returns `true` if the jet completed
/// (landed) as a result.
fn apply_feedback(
    state: &SharedState,
    stats: &Arc<StatsLog>,
    run_log: &RunLog,
    id: JetId,
    kind: FeedbackKind,
    data: i32,
) -> bool {
    let mut guard = state.lock();
    match kind {
        FeedbackKind::FuelLow => {
            if let Some((which, idx)) = guard.find(id) {
                if let Some(record) = guard.queue_mut(which).get_mut(idx) {
                    record.fuel = data;
                    record.fuel_low_fired = true;
                }
            }
            drop(guard);
            run_log.append(&format!("fuel_low {} fuel={}", id, data));
            false
        }
        FeedbackKind::Emergency => {
            handle_emergency(&mut guard, id, data);
            drop(guard);
            run_log.append(&format!("emergency {} fuel={}", id, data));
            false
        }
        FeedbackKind::WaitingFuel => {
            handle_refuel_request(&mut guard, id, data);
            drop(guard);
            run_log.append(&format!("waiting_fuel {} fuel={}", id, data));
            false
        }
        FeedbackKind::Refueling => {
            drop(guard);
            run_log.append(&format!("refueling {}", id));
            false
        }
        FeedbackKind::Refueled => {
            handle_refueled(&mut guard, id, data);
            drop(guard);
            run_log.append(&format!("refueled {} fuel={}", id, data));
            false
        }
        FeedbackKind::Landed => {
            drop(guard);
            complete_jet(state, stats, run_log, id);
            true
        }
    }
}

fn complete_jet(state: &SharedState, stats: &Arc<StatsLog>, run_log: &RunLog, id: JetId) {
    let mut guard = state.lock();
    let completion_ticks = guard.elapsed_ticks;
    let Some(mut record) = guard.clear(id) else {
        warn!(jet = %id, "completion for a jet that was already cleared");
        return;
    };
    drop(guard);

    record.channel.close();
    record.channel.reap();
    stats.record(CompletedJetStats {
        id,
        arrival_ticks: record.arrival_ticks,
        completion_ticks,
        first_dispatch_ticks: record.first_dispatch_ticks,
        accumulated_wait_ticks: record.accumulated_wait_ticks,
    });
    run_log.append(&format!("landed {}", id));
}

/// Closes and reaps every jet still queued or on the runway. Called on an
/// `exit` command and again after the daemon's top-level `select!` returns,
/// so a jet worker is never left orphaned regardless of which shutdown path
/// fired (operator exit, SIGTERM/SIGINT, or the reactor's own arrivals-done
/// gate).
pub fn drain_remaining_jets(state: &SharedState, run_log: &RunLog) {
    let mut guard = state.lock();
    let ids: Vec<JetId> = [QueueId::Q1, QueueId::Q2, QueueId::Q3]
        .into_iter()
        .flat_map(|which| guard.queue(which).iter().map(|(_, r)| r.id).collect::<Vec<_>>())
        .collect();

    for id in ids {
        if let Some(mut record) = guard.clear(id) {
            record.channel.close();
            record.channel.reap();
            run_log.append(&format!("drained {}", id));
        }
    }
}
