// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Completed-jet statistics, behind their own mutex so that end-of-run
//! reporting never contends with the hot scheduler lock.

use parking_lot::Mutex;
use skywatch_core::CompletedJetStats;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct StatsLog {
    inner: Mutex<Vec<CompletedJetStats>>,
}

impl StatsLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record(&self, stats: CompletedJetStats) {
        self.inner.lock().push(stats);
    }

    pub fn snapshot(&self) -> Vec<CompletedJetStats> {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skywatch_core::JetId;

    fn sample(id: u64) -> CompletedJetStats {
        CompletedJetStats {
            id: JetId::new(id),
            arrival_ticks: 0,
            completion_ticks: 10,
            first_dispatch_ticks: Some(1),
            accumulated_wait_ticks: 1,
        }
    }

    #[test]
    fn records_accumulate_independently_of_scheduler_lock() {
        let log = StatsLog::new();
        log.record(sample(1));
        log.record(sample(2));
        assert_eq!(log.snapshot().len(), 2);
    }
}
