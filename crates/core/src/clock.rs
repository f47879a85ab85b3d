// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wall-clock abstraction used for human-readable log timestamps.
//!
//! Scheduler statistics (turnaround, waiting, response) are measured in
//! simulated ticks and never touch this trait; `Clock` exists only so log
//! lines carry a real timestamp without making the rest of the engine
//! depend on `SystemTime`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now_unix(&self) -> u64;
}

#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// A clock a test can advance deterministically.
#[derive(Debug, Clone)]
pub struct FakeClock {
    secs: Arc<AtomicU64>,
}

impl FakeClock {
    pub fn new(start_unix: u64) -> Self {
        Self {
            secs: Arc::new(AtomicU64::new(start_unix)),
        }
    }

    pub fn advance(&self, secs: u64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn now_unix(&self) -> u64 {
        self.secs.load(Ordering::SeqCst)
    }
}

/// Renders seconds-since-epoch as a `[HH:MM:SS]` UTC timestamp for log
/// lines, without pulling in a timezone database.
pub fn format_hms(unix_secs: u64) -> String {
    let secs_today = unix_secs % 86_400;
    format!(
        "[{:02}:{:02}:{:02}]",
        secs_today / 3600,
        (secs_today % 3600) / 60,
        secs_today % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_clock_advances() {
        let clock = FakeClock::new(1000);
        assert_eq!(clock.now_unix(), 1000);
        clock.advance(5);
        assert_eq!(clock.now_unix(), 1005);
    }

    #[yare::parameterized(
        midnight  = { 0, "[00:00:00]" },
        one_hour  = { 3661, "[01:01:01]" },
        wraps_day = { 86_400 + 5, "[00:00:05]" },
    )]
    fn hms_formatting(secs: u64, expected: &str) {
        assert_eq!(format_hms(secs), expected);
    }
}
