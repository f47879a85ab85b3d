// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-jet and per-run statistics.

use crate::id::JetId;

/// Statistics captured for a jet at the moment it lands or its channel
/// closes unexpectedly, before its slot is cleared.
#[derive(Debug, Clone, Copy)]
pub struct CompletedJetStats {
    pub id: JetId,
    pub arrival_ticks: u64,
    pub completion_ticks: u64,
    pub first_dispatch_ticks: Option<u64>,
    pub accumulated_wait_ticks: u64,
}

impl CompletedJetStats {
    pub fn turnaround(&self) -> u64 {
        self.completion_ticks.saturating_sub(self.arrival_ticks)
    }

    pub fn waiting(&self) -> u64 {
        self.accumulated_wait_ticks
    }

    /// Response time: time to first dispatch, falling back to turnaround if
    /// the jet was never dispatched (e.g. it crashed while still queued).
    pub fn response(&self) -> u64 {
        match self.first_dispatch_ticks {
            Some(ts) => ts.saturating_sub(self.arrival_ticks),
            None => self.turnaround(),
        }
    }
}

/// Run-wide aggregates reported at shutdown.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub total_ticks: u64,
    pub context_switches: u64,
    pub runway_busy_ticks: u64,
    pub completed: Vec<CompletedJetStats>,
}

impl RunStats {
    pub fn utilization(&self) -> f64 {
        if self.total_ticks == 0 {
            0.0
        } else {
            self.runway_busy_ticks as f64 / self.total_ticks as f64
        }
    }
}

/// Renders a tick count as `<minutes>m<seconds>s` when it exceeds a minute,
/// otherwise as a bare second count.
pub fn format_elapsed(ticks: u64) -> String {
    if ticks < 60 {
        format!("{}s", ticks)
    } else {
        format!("{}m{}s", ticks / 60, ticks % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_falls_back_to_turnaround_when_never_dispatched() {
        let stats = CompletedJetStats {
            id: JetId::new(1),
            arrival_ticks: 5,
            completion_ticks: 9,
            first_dispatch_ticks: None,
            accumulated_wait_ticks: 4,
        };
        assert_eq!(stats.response(), stats.turnaround());
    }

    #[test]
    fn utilization_with_zero_ticks_is_zero() {
        let stats = RunStats::default();
        assert_eq!(stats.utilization(), 0.0);
    }

    #[yare::parameterized(
        under_a_minute = { 45, "45s" },
        at_a_minute    = { 60, "1m0s" },
        over_a_minute  = { 125, "2m5s" },
    )]
    fn elapsed(ticks: u64, expected: &str) {
        assert_eq!(format_elapsed(ticks), expected);
    }
}
