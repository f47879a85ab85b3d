// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal deterministic jet generator.
//!
//! A full jet generator (randomized fuel/arrival seeding, scheduled bursts)
//! is treated as an external collaborator and is out of scope here. This is
//! the in-scope stand-in needed to drive the daemon end-to-end without an
//! external process: it emits a fixed number of arrivals at a fixed
//! interval, with fuel drawn from a small deterministic rotation rather
//! than randomness.

use crate::reactor::ReactorEvent;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Duration;

/// Fuel values cycled through for each synthetic arrival, chosen to
/// exercise a spread of dispatch/aging/emergency behavior without relying
/// on randomness, keeping runs reproducible.
const FUEL_ROTATION: &[i32] = &[60, 45, 90, 30, 75];

pub async fn run(count: u32, interval_secs: u64, events: UnboundedSender<ReactorEvent>) {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    for i in 0..count {
        ticker.tick().await;
        let fuel = FUEL_ROTATION[i as usize % FUEL_ROTATION.len()];
        if events.send(ReactorEvent::Arrival { fuel }).is_err() {
            return;
        }
    }
    let _ = events.send(ReactorEvent::ArrivalsDone);
}
