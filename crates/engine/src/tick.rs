// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The once-per-second tick and the two asynchronous feedback events
//! (emergency, refuel request) that can also move jets between tiers. Step
//! order within a tick is normative: wait accounting, aging, round-robin
//! demotion, then dispatch.

use crate::jet::JetChannel;
use crate::policy::QueueId;
use crate::state::SchedulerState;
use skywatch_core::{Command, JetId, JetStatus};

/// What happened during a single tick, for logging at the call site. Not
/// consumed by the engine itself — a pure report.
#[derive(Debug, Default, Clone)]
pub struct TickOutcome {
    pub aged_up: Vec<JetId>,
    pub demoted: Option<JetId>,
    pub dispatched: Option<(JetId, Command)>,
    pub send_failed: Option<JetId>,
}

/// Runs one simulated second. No-op (beyond the pause gate) if the
/// scheduler is paused.
pub fn tick<C: JetChannel>(state: &mut SchedulerState<C>) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    // Step 1: gate.
    if state.paused {
        return outcome;
    }
    state.elapsed_ticks += 1;

    // Step 2: wait accounting.
    if state.runway_busy {
        state.runway_busy_ticks += 1;
    }
    for which in [QueueId::Q1, QueueId::Q2, QueueId::Q3] {
        for (_, record) in state.queue_mut(which).iter_mut() {
            if record.waiting_for_dispatch() {
                record.accumulated_wait_ticks += 1;
            }
        }
    }

    // Step 3: aging, Q3 -> Q2.
    let threshold = state.config.aging_threshold;
    let to_age: Vec<(usize, JetId)> = state
        .queue_mut(QueueId::Q3)
        .iter_mut()
        .map(|(idx, record)| {
            record.standby_ticks += 1;
            (idx, record.id, record.standby_ticks)
        })
        .filter(|&(_, _, standby)| standby > threshold)
        .map(|(idx, id, _)| (idx, id))
        .collect();
    for (idx, id) in to_age {
        if state
            .move_jet(id, QueueId::Q3, idx, QueueId::Q2)
            .is_ok()
        {
            outcome.aged_up.push(id);
        }
    }

    // Step 4: RR demotion for a Q2-origin runway holder.
    if state.runway_busy && state.runway_origin == Some(QueueId::Q2) {
        if let Some(id) = state.runway_jet {
            if let Some((which, idx)) = state.find(id) {
                let quantum_hit = {
                    let record = state.queue_mut(which).get_mut(idx).expect("found above");
                    record.runway_ticks += 1;
                    record.runway_ticks >= state.config.q2_quantum
                };
                if quantum_hit {
                    state.runway_busy = false;
                    state.runway_jet = None;
                    state.runway_origin = None;
                    state.context_switches += 1;
                    if state.move_jet(id, which, idx, QueueId::Q3).is_ok() {
                        outcome.demoted = Some(id);
                    }
                }
            }
        }
    }

    // Step 5: dispatch, only if the runway is idle.
    if !state.runway_busy {
        dispatch(state, &mut outcome);
    }

    outcome
}

fn dispatch<C: JetChannel>(state: &mut SchedulerState<C>, outcome: &mut TickOutcome) {
    // Q1: SRTF, ties broken by lowest slot index (`iter` visits in index order).
    let q1_pick = state
        .queue(QueueId::Q1)
        .iter()
        .filter(|(_, j)| j.status == JetStatus::InQueue)
        .min_by_key(|(idx, j)| (j.fuel, *idx))
        .map(|(idx, j)| (idx, j.id));

    if let Some((idx, id)) = q1_pick {
        send_and_mark(
            state,
            QueueId::Q1,
            idx,
            id,
            Command::StartLanding,
            JetStatus::LandingCmdSent,
            outcome,
        );
        return;
    }

    // Q2: a parked refuel request takes priority over a fresh landing, FIFO.
    let refuel_pick = state
        .queue(QueueId::Q2)
        .iter()
        .find(|(_, j)| j.status == JetStatus::WaitingFuel)
        .map(|(idx, j)| (idx, j.id));

    if let Some((idx, id)) = refuel_pick {
        send_and_mark(
            state,
            QueueId::Q2,
            idx,
            id,
            Command::Refuel,
            JetStatus::Refueling,
            outcome,
        );
        return;
    }

    let q2_pick = state
        .queue(QueueId::Q2)
        .iter()
        .find(|(_, j)| j.status == JetStatus::InQueue)
        .map(|(idx, j)| (idx, j.id));

    if let Some((idx, id)) = q2_pick {
        if let Some(record) = state.queue_mut(QueueId::Q2).get_mut(idx) {
            record.runway_ticks = 0;
        }
        send_and_mark(
            state,
            QueueId::Q2,
            idx,
            id,
            Command::StartLanding,
            JetStatus::LandingCmdSent,
            outcome,
        );
    }

    // Q3 never dispatches: it is a standby/aging pool.
}

fn send_and_mark<C: JetChannel>(
    state: &mut SchedulerState<C>,
    origin: QueueId,
    idx: usize,
    id: JetId,
    command: Command,
    next_status: JetStatus,
    outcome: &mut TickOutcome,
) {
    let elapsed_ticks = state.elapsed_ticks;
    let record = state.queue_mut(origin).get_mut(idx).expect("found above");
    match record.channel.send_command(command) {
        Ok(()) => {
            record.status = next_status;
            if record.first_dispatch_ticks.is_none() {
                record.first_dispatch_ticks = Some(elapsed_ticks);
            }
            state.runway_busy = true;
            state.runway_jet = Some(id);
            state.runway_origin = Some(origin);
            state.context_switches += 1;
            outcome.dispatched = Some((id, command));
        }
        Err(_) => {
            // Leave the jet queued on a channel write failure; the next
            // tick will retry.
            outcome.send_failed = Some(id);
        }
    }
}

/// Emergency feedback: move the jet to Q1, preempting the runway holder by
/// this rule: a Q1-origin holder is preempted only if the incoming fuel is
/// strictly less; a Q2-origin holder is always preempted. Preemption never
/// applies while the holder is refueling.
pub fn handle_emergency<C: JetChannel>(state: &mut SchedulerState<C>, id: JetId, fuel: i32) {
    let Some((which, idx)) = state.find(id) else {
        return;
    };
    {
        let record = state.queue_mut(which).get_mut(idx).expect("found above");
        record.fuel = fuel;
        record.emergency_fired = true;
    }
    if which != QueueId::Q1 {
        if state.move_jet(id, which, idx, QueueId::Q1).is_err() {
            return;
        }
    }

    let Some(holder_id) = state.runway_jet else {
        return;
    };
    if holder_id == id {
        return;
    }
    let Some((holder_queue, holder_idx)) = state.find(holder_id) else {
        return;
    };
    let holder = state
        .queue(holder_queue)
        .get(holder_idx)
        .expect("found above");
    if holder.status == JetStatus::Refueling {
        return;
    }

    let should_preempt = match state.runway_origin {
        Some(QueueId::Q1) => fuel < holder.fuel,
        Some(QueueId::Q2) => true,
        _ => false,
    };
    if should_preempt {
        state.preempt_runway();
    }
}

/// Refuel-request feedback: parks the jet in Q3 with `WaitingFuel`. It will
/// not be dispatched a `Refuel` command until aging promotes it back to Q2.
pub fn handle_refuel_request<C: JetChannel>(state: &mut SchedulerState<C>, id: JetId, fuel: i32) {
    let Some((which, idx)) = state.find(id) else {
        return;
    };
    {
        let record = state.queue_mut(which).get_mut(idx).expect("found above");
        record.fuel = fuel;
        record.status = JetStatus::WaitingFuel;
        record.waiting_fuel_fired = true;
    }
    if which != QueueId::Q3 {
        let _ = state.move_jet(id, which, idx, QueueId::Q3);
    }
}

/// Refueled feedback: restore fuel, clear the runway if the jet held it,
/// and put it back in the normal dispatch pool.
pub fn handle_refueled<C: JetChannel>(state: &mut SchedulerState<C>, id: JetId, new_fuel: i32) {
    let Some((which, idx)) = state.find(id) else {
        return;
    };
    let record = state.queue_mut(which).get_mut(idx).expect("found above");
    record.fuel = new_fuel;
    record.status = JetStatus::InQueue;
    if state.runway_jet == Some(id) {
        state.runway_busy = false;
        state.runway_jet = None;
        state.runway_origin = None;
    }
}

#[cfg(test)]
#[path = "tick_tests.rs"]
mod tests;
