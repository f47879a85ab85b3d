use super::*;
use crate::jet::JetRecord;
use crate::test_support::FakeJetChannel;
use skywatch_core::JetId;

fn jet(id: u64, fuel: i32) -> JetRecord<FakeJetChannel> {
    JetRecord::new(JetId::new(id), FakeJetChannel::new(), fuel, 0)
}

fn fresh_state() -> SchedulerState<FakeJetChannel> {
    SchedulerState::new(crate::policy::Config::default())
}

// Scenario 1: single landing.
#[test]
fn single_jet_is_dispatched_on_first_tick() {
    let mut state = fresh_state();
    state.insert_new(jet(1, 60)).unwrap();

    let outcome = tick(&mut state);
    assert_eq!(outcome.dispatched, Some((JetId::new(1), Command::StartLanding)));
    assert_eq!(state.elapsed_ticks, 1);

    let (which, idx) = state.find(JetId::new(1)).unwrap();
    let record = state.queue(which).get(idx).unwrap();
    assert_eq!(record.status, JetStatus::LandingCmdSent);
    assert_eq!(record.first_dispatch_ticks, Some(1));
}

// Scenario 2 / P8: an emergency from Q2-origin always preempts.
#[test]
fn emergency_always_preempts_q2_origin_holder() {
    let mut state = fresh_state();
    state.insert_new(jet(1, 60)).unwrap();
    tick(&mut state); // A dispatched from Q2.
    assert_eq!(state.runway_origin, Some(QueueId::Q2));

    state.insert_new(jet(2, 18)).unwrap();
    handle_emergency(&mut state, JetId::new(2), 8);

    assert_eq!(state.find(JetId::new(2)).unwrap().0, QueueId::Q1);
    assert!(!state.runway_busy, "preempting Q2 holder must free the runway");
    let (which, idx) = state.find(JetId::new(1)).unwrap();
    assert_eq!(state.queue(which).get(idx).unwrap().status, JetStatus::InQueue);

    let outcome = tick(&mut state);
    assert_eq!(outcome.dispatched, Some((JetId::new(2), Command::StartLanding)));
}

#[test]
fn emergency_never_preempts_a_refueling_holder() {
    let mut state = fresh_state();
    state.insert_new(jet(1, 40)).unwrap();
    handle_refuel_request(&mut state, JetId::new(1), 25);
    // Age it back to Q2 so it can be dispatched a Refuel.
    for _ in 0..(state.config.aging_threshold + 1) {
        tick(&mut state);
    }
    assert_eq!(state.runway_origin, Some(QueueId::Q2));
    let (which, idx) = state.find(JetId::new(1)).unwrap();
    assert_eq!(state.queue(which).get(idx).unwrap().status, JetStatus::Refueling);

    state.insert_new(jet(2, 5)).unwrap();
    handle_emergency(&mut state, JetId::new(2), 2);

    assert!(state.runway_busy, "a refueling holder must never be preempted");
}

// Scenario 3 / P4: RR quantum bound.
#[test]
fn q2_holder_is_demoted_to_q3_after_quantum_ticks() {
    let mut state = fresh_state();
    state.insert_new(jet(1, 60)).unwrap();
    state.insert_new(jet(2, 60)).unwrap();

    tick(&mut state); // A dispatched.
    let quantum = state.config.q2_quantum;
    let mut last_outcome = TickOutcome::default();
    for _ in 0..quantum {
        last_outcome = tick(&mut state);
    }

    assert_eq!(last_outcome.demoted, Some(JetId::new(1)));
    assert_eq!(state.find(JetId::new(1)).unwrap().0, QueueId::Q3);
    assert_eq!(last_outcome.dispatched, Some((JetId::new(2), Command::StartLanding)));
}

// P5: aging bound.
#[test]
fn q3_jet_is_promoted_after_aging_threshold() {
    let mut state = fresh_state();
    state.queue_mut(QueueId::Q3).insert(jet(1, 60));

    for _ in 0..state.config.aging_threshold {
        let outcome = tick(&mut state);
        assert!(outcome.aged_up.is_empty());
    }
    let outcome = tick(&mut state);
    assert_eq!(outcome.aged_up, vec![JetId::new(1)]);
    assert_eq!(state.find(JetId::new(1)).unwrap().0, QueueId::Q2);
}

// Scenario 4: refuel cycle.
#[test]
fn refuel_cycle_parks_then_ages_then_redispatches() {
    let mut state = fresh_state();
    state.insert_new(jet(1, 40)).unwrap();
    handle_refuel_request(&mut state, JetId::new(1), 25);

    let (which, _) = state.find(JetId::new(1)).unwrap();
    assert_eq!(which, QueueId::Q3);

    for _ in 0..(state.config.aging_threshold + 1) {
        tick(&mut state);
    }
    let (which, idx) = state.find(JetId::new(1)).unwrap();
    assert_eq!(which, QueueId::Q2);
    // Dispatch happens as part of aging's tick loop; Refuel must have been sent.
    let record = state.queue(which).get(idx).unwrap();
    assert_eq!(record.channel.last_command(), Some(Command::Refuel));
    assert_eq!(record.status, JetStatus::Refueling);

    handle_refueled(&mut state, JetId::new(1), 100);
    let (which, idx) = state.find(JetId::new(1)).unwrap();
    assert_eq!(state.queue(which).get(idx).unwrap().fuel, 100);
    assert_eq!(state.queue(which).get(idx).unwrap().status, JetStatus::InQueue);
    assert!(!state.runway_busy);

    let outcome = tick(&mut state);
    assert_eq!(outcome.dispatched, Some((JetId::new(1), Command::StartLanding)));
}

// Scenario 5: pause halts all progression.
#[test]
fn pause_halts_tick_progression() {
    let mut state = fresh_state();
    state.insert_new(jet(1, 60)).unwrap();
    tick(&mut state);
    let ticks_before = state.elapsed_ticks;
    let wait_before = {
        let (which, idx) = state.find(JetId::new(1)).unwrap();
        state.queue(which).get(idx).unwrap().accumulated_wait_ticks
    };

    state.paused = true;
    tick(&mut state);
    tick(&mut state);

    assert_eq!(state.elapsed_ticks, ticks_before);
    let (which, idx) = state.find(JetId::new(1)).unwrap();
    assert_eq!(
        state.queue(which).get(idx).unwrap().accumulated_wait_ticks,
        wait_before
    );
}

// Scenario 6 / P6: SRTF tie-break in Q1.
#[test]
fn q1_dispatches_lowest_fuel_first() {
    let mut state = fresh_state();
    state.queue_mut(QueueId::Q1).insert(jet(1, 8));
    state.queue_mut(QueueId::Q1).insert(jet(2, 5));

    let outcome = tick(&mut state);
    assert_eq!(outcome.dispatched, Some((JetId::new(2), Command::StartLanding)));
}

// P6: Q1 always preferred over Q2 when the runway is free.
#[test]
fn q1_is_dispatched_before_q2_when_both_are_ready() {
    let mut state = fresh_state();
    state.insert_new(jet(1, 60)).unwrap();
    state.queue_mut(QueueId::Q1).insert(jet(2, 5));

    let outcome = tick(&mut state);
    assert_eq!(outcome.dispatched, Some((JetId::new(2), Command::StartLanding)));
}

// P1/P3: invariants hold across a denser sequence of moves.
#[test]
fn invariants_hold_across_a_mixed_sequence() {
    let mut state = fresh_state();
    for i in 1..=5u64 {
        state.insert_new(jet(i, 60)).unwrap();
    }
    for _ in 0..12 {
        tick(&mut state);
    }
    handle_emergency(&mut state, JetId::new(3), 9);
    tick(&mut state);

    assert!(state.counts_are_consistent());
    let mut seen = std::collections::HashSet::new();
    for which in [QueueId::Q1, QueueId::Q2, QueueId::Q3] {
        for (_, record) in state.queue(which).iter() {
            assert!(seen.insert(record.id), "jet {:?} appeared in more than one queue", record.id);
        }
    }
}

#[yare::parameterized(
    lower_fuel_preempts     = { 5, true },
    equal_fuel_does_not     = { 9, false },
    higher_fuel_does_not    = { 20, false },
)]
fn q1_origin_preemption_follows_strict_less_than(incoming_fuel: i32, expect_preempted: bool) {
    let mut state = fresh_state();
    state.queue_mut(QueueId::Q1).insert(jet(1, 9));
    tick(&mut state);
    assert_eq!(state.runway_jet, Some(JetId::new(1)));

    state.queue_mut(QueueId::Q2).insert(jet(2, 30));
    handle_emergency(&mut state, JetId::new(2), incoming_fuel);

    assert_eq!(!state.runway_busy, expect_preempted);
}

// Error-path: a send failure leaves the jet queued for a retry next tick.
#[test]
fn send_failure_leaves_jet_queued() {
    let mut state = fresh_state();
    let mut record = jet(1, 60);
    record.channel.fail_next = true;
    state.insert_new(record).unwrap();

    let outcome = tick(&mut state);
    assert_eq!(outcome.send_failed, Some(JetId::new(1)));
    assert!(!state.runway_busy);
    let (which, idx) = state.find(JetId::new(1)).unwrap();
    assert_eq!(state.queue(which).get(idx).unwrap().status, JetStatus::InQueue);

    let outcome = tick(&mut state);
    assert_eq!(outcome.dispatched, Some((JetId::new(1), Command::StartLanding)));
}
