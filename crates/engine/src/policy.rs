// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named constants and the tunable run configuration.

/// Default capacity of each priority queue's slot table.
pub const QUEUE_CAPACITY: usize = 20;

/// A Q3 jet is promoted back to Q2 once it has waited strictly longer than
/// this many ticks.
pub const DEFAULT_AGING_THRESHOLD: u64 = 10;

/// Default Q2 round-robin quantum, in ticks.
pub const DEFAULT_Q2_QUANTUM: u64 = 5;

/// Default landing duration communicated to jet workers, in seconds.
pub const DEFAULT_LANDING_SECS: u64 = 12;

/// Default refuel duration communicated to jet workers, in seconds.
pub const DEFAULT_REFUEL_SECS: u64 = 10;

/// The three priority tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueId {
    /// SRTF, keyed on fuel.
    Q1,
    /// Round-robin with a bounded quantum.
    Q2,
    /// FCFS standby/aging pool. Never dispatches.
    Q3,
}

/// Tunable policy knobs for a run. Defaults match the simulator's canonical
/// values; all are operator- or config-overridable.
#[derive(Debug, Clone)]
pub struct Config {
    pub queue_capacity: usize,
    pub aging_threshold: u64,
    pub q2_quantum: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queue_capacity: QUEUE_CAPACITY,
            aging_threshold: DEFAULT_AGING_THRESHOLD,
            q2_quantum: DEFAULT_Q2_QUANTUM,
        }
    }
}
