// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory jet channel for deterministic scheduler tests: no process, no
//! real time, just a record of every command sent.

use crate::jet::JetChannel;
use skywatch_core::Command;

#[derive(Debug, Default, Clone)]
pub struct FakeJetChannel {
    pub sent: Vec<Command>,
    pub fail_next: bool,
}

impl FakeJetChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_command(&self) -> Option<Command> {
        self.sent.last().copied()
    }
}

impl JetChannel for FakeJetChannel {
    fn send_command(&mut self, command: Command) -> Result<(), String> {
        if self.fail_next {
            self.fail_next = false;
            return Err("simulated send failure".to_string());
        }
        self.sent.push(command);
        Ok(())
    }
}
