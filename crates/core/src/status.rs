// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jet lifecycle status.

/// Where a jet is in its lifecycle, independent of which queue holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JetStatus {
    /// Sitting in a queue, eligible for dispatch.
    InQueue,
    /// Parked after a refuel request, waiting to be re-promoted and dispatched a `Refuel`.
    WaitingFuel,
    /// On the runway, `StartLanding` already sent.
    LandingCmdSent,
    /// On the runway, `Refuel` already sent.
    Refueling,
}

impl JetStatus {
    /// Invariant I4: jets in Q3 may only be `InQueue` or `WaitingFuel`.
    pub fn valid_in_q3(self) -> bool {
        matches!(self, JetStatus::InQueue | JetStatus::WaitingFuel)
    }
}
