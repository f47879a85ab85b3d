// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! skywatch-engine: the MLFQ scheduler state machine — queue storage, the
//! tick engine, and the preemption/aging/dispatch policy. Knows nothing
//! about how a jet process is spawned or how its channel bytes travel;
//! that boundary is the [`JetChannel`] trait.

pub mod error;
pub mod jet;
pub mod policy;
pub mod queue;
pub mod state;
pub mod stats;
pub mod tick;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::SchedulerError;
pub use jet::{JetChannel, JetRecord};
pub use policy::{Config, QueueId};
pub use queue::SlotTable;
pub use state::SchedulerState;
pub use stats::StatsLog;
pub use tick::{handle_emergency, handle_refuel_request, handle_refueled, tick, TickOutcome};

use parking_lot::Mutex;
use std::sync::Arc;

/// Shared handle to the scheduler state, the single lock every mutator
/// (tick, reactor feedback handler, console command) acquires for the
/// duration of one coherent mutation.
pub type SharedState<C> = Arc<Mutex<SchedulerState<C>>>;
