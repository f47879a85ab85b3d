// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared scheduler state: queue storage plus the slot-stable mutation
//! primitives every handler (tick, reactor feedback, console command) goes
//! through. A single caller is expected to hold this behind one mutex (see
//! `skywatch-daemon::reactor`); every method here assumes exclusive access.

use crate::error::SchedulerError;
use crate::jet::{JetChannel, JetRecord};
use crate::policy::{Config, QueueId};
use crate::queue::SlotTable;
use skywatch_core::JetId;

pub struct SchedulerState<C: JetChannel> {
    q1: SlotTable<JetRecord<C>>,
    q2: SlotTable<JetRecord<C>>,
    q3: SlotTable<JetRecord<C>>,

    pub runway_busy: bool,
    pub runway_jet: Option<JetId>,
    pub runway_origin: Option<QueueId>,

    pub config: Config,
    pub paused: bool,
    pub context_switches: u64,
    pub runway_busy_ticks: u64,
    pub elapsed_ticks: u64,
}

impl<C: JetChannel> SchedulerState<C> {
    pub fn new(config: Config) -> Self {
        Self {
            q1: SlotTable::new(config.queue_capacity),
            q2: SlotTable::new(config.queue_capacity),
            q3: SlotTable::new(config.queue_capacity),
            runway_busy: false,
            runway_jet: None,
            runway_origin: None,
            config,
            paused: false,
            context_switches: 0,
            runway_busy_ticks: 0,
            elapsed_ticks: 0,
        }
    }

    pub fn queue(&self, which: QueueId) -> &SlotTable<JetRecord<C>> {
        match which {
            QueueId::Q1 => &self.q1,
            QueueId::Q2 => &self.q2,
            QueueId::Q3 => &self.q3,
        }
    }

    pub fn queue_mut(&mut self, which: QueueId) -> &mut SlotTable<JetRecord<C>> {
        match which {
            QueueId::Q1 => &mut self.q1,
            QueueId::Q2 => &mut self.q2,
            QueueId::Q3 => &mut self.q3,
        }
    }

    /// I1: a jet exists in at most one queue. Linear scan across all three
    /// tiers; acceptable at this capacity (see `queue.rs`'s design note).
    pub fn find(&self, id: JetId) -> Option<(QueueId, usize)> {
        for which in [QueueId::Q1, QueueId::Q2, QueueId::Q3] {
            if let Some((idx, _)) = self.queue(which).iter().find(|(_, j)| j.id == id) {
                return Some((which, idx));
            }
        }
        None
    }

    /// Inserts a newly-arrived jet at the first free Q2 slot (mid-priority
    /// entry point for all arrivals).
    pub fn insert_new(&mut self, record: JetRecord<C>) -> Result<(), SchedulerError> {
        self.q2
            .insert(record)
            .map(|_| ())
            .ok_or(SchedulerError::QueueFull(QueueId::Q2))
    }

    /// Moves the jet at `(from, from_idx)` into `to`, resetting the
    /// bookkeeping fields that no longer apply in the destination tier.
    /// Fails without mutating state if `to` is full.
    pub fn move_jet(
        &mut self,
        id: JetId,
        from: QueueId,
        from_idx: usize,
        to: QueueId,
    ) -> Result<usize, SchedulerError> {
        if self.queue(to).is_full() {
            return Err(SchedulerError::QueueFull(to));
        }
        let mut record = self
            .queue_mut(from)
            .remove(from_idx)
            .ok_or(SchedulerError::JetNotFound(id))?;

        record.runway_ticks = 0;
        if to != QueueId::Q3 {
            record.standby_ticks = 0;
        }
        // Only a move into Q3 preserves WaitingFuel; every other
        // destination normalizes status back to InQueue.
        if to != QueueId::Q3 {
            record.status = skywatch_core::JetStatus::InQueue;
        }
        debug_assert!(to != QueueId::Q3 || record.status.valid_in_q3());

        let idx = self
            .queue_mut(to)
            .insert(record)
            .expect("capacity already checked above");
        Ok(idx)
    }

    /// Clears the runway, if held, and resets the displaced jet to `InQueue`
    /// with its runway-ticks counter zeroed. Returns the displaced jet's id.
    pub fn preempt_runway(&mut self) -> Option<JetId> {
        let jet_id = self.runway_jet.take()?;
        let origin = self.runway_origin.take();
        self.runway_busy = false;
        self.context_switches += 1;

        if let Some(origin) = origin {
            if let Some((_, idx)) = self.find(jet_id) {
                if let Some(record) = self.queue_mut(origin).get_mut(idx) {
                    record.status = skywatch_core::JetStatus::InQueue;
                    record.runway_ticks = 0;
                }
            }
        }
        Some(jet_id)
    }

    /// Removes a jet's slot entirely (landed, or channel closed
    /// unexpectedly). Idempotent: clearing an id that is not found is a
    /// logged no-op at the call site, not an error here.
    pub fn clear(&mut self, id: JetId) -> Option<JetRecord<C>> {
        let (which, idx) = self.find(id)?;
        if self.runway_jet == Some(id) {
            self.runway_jet = None;
            self.runway_origin = None;
            self.runway_busy = false;
        }
        self.queue_mut(which).remove(idx)
    }

    /// I3: every queue's maintained count matches its true occupied count.
    /// I4: every jet parked in Q3 is `InQueue` or `WaitingFuel`.
    pub fn counts_are_consistent(&self) -> bool {
        self.q1.count() == self.q1.occupied_count()
            && self.q2.count() == self.q2.occupied_count()
            && self.q3.count() == self.q3.occupied_count()
            && self.q3.iter().all(|(_, j)| j.status.valid_in_q3())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
