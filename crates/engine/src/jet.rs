// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The jet record and the channel capability the engine dispatches over.

use skywatch_core::{Command, JetId, JetStatus};

/// Abstraction over "can send a `Command` to this jet". The engine depends
/// only on this trait, never on how a jet process is spawned or how its
/// bytes travel — that is the daemon's concern (see `skywatch-daemon`'s
/// process supervision).
pub trait JetChannel: Send {
    fn send_command(&mut self, command: Command) -> Result<(), String>;
}

/// One live jet's scheduling-relevant state.
pub struct JetRecord<C: JetChannel> {
    pub id: JetId,
    pub channel: C,
    pub fuel: i32,
    pub status: JetStatus,
    pub runway_ticks: u64,
    pub standby_ticks: u64,
    pub arrival_ticks: u64,
    pub first_dispatch_ticks: Option<u64>,
    pub accumulated_wait_ticks: u64,
    /// Edge-triggered feedback flags, latched once fired (P7).
    pub fuel_low_fired: bool,
    pub waiting_fuel_fired: bool,
    pub emergency_fired: bool,
}

impl<C: JetChannel> JetRecord<C> {
    pub fn new(id: JetId, channel: C, fuel: i32, arrival_ticks: u64) -> Self {
        Self {
            id,
            channel,
            fuel,
            status: JetStatus::InQueue,
            runway_ticks: 0,
            standby_ticks: 0,
            arrival_ticks,
            first_dispatch_ticks: None,
            accumulated_wait_ticks: 0,
            fuel_low_fired: false,
            waiting_fuel_fired: false,
            emergency_fired: false,
        }
    }

    pub fn waiting_for_dispatch(&self) -> bool {
        matches!(self.status, JetStatus::InQueue | JetStatus::WaitingFuel)
    }
}
