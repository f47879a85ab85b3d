// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator console: one line-oriented command per input line, each
//! mutation acquiring the scheduler lock for its duration. Handler
//! functions mirror the daemon's old request-handler style — one function
//! per command, returning a typed response instead of mutating blindly.

use skywatch_core::JetId;
use skywatch_engine::{handle_emergency, policy::QueueId, JetChannel, SchedulerState};

#[derive(Debug, Clone, PartialEq)]
pub enum OperatorCommand {
    Status,
    NewJet(i32),
    ForceEmergency(JetId),
    BoostPriority(JetId),
    ChangeQuantum(u64),
    Pause,
    Resume,
    Exit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Empty,
    UnknownCommand(String),
    BadArgument { command: String, arg: String },
}

/// Parses one operator input line. Unrecognized or malformed input is
/// reported, never a panic: ignored with a message, no state change.
pub fn parse_line(line: &str) -> Result<OperatorCommand, ParseError> {
    let mut parts = line.split_whitespace();
    let command = parts.next().ok_or(ParseError::Empty)?;

    let bad = |arg: &str| ParseError::BadArgument {
        command: command.to_string(),
        arg: arg.to_string(),
    };

    match command {
        "status" => Ok(OperatorCommand::Status),
        "exit" => Ok(OperatorCommand::Exit),
        "pause_sim" => Ok(OperatorCommand::Pause),
        "resume_sim" => Ok(OperatorCommand::Resume),
        "new_jet" => {
            let arg = parts.next().ok_or_else(|| bad(""))?;
            let fuel: i32 = arg.parse().map_err(|_| bad(arg))?;
            if fuel <= 0 {
                return Err(bad(arg));
            }
            Ok(OperatorCommand::NewJet(fuel))
        }
        "force_emergency" | "boost_priority" => {
            let arg = parts.next().ok_or_else(|| bad(""))?;
            let n: u64 = arg.parse().map_err(|_| bad(arg))?;
            let id = JetId::new(n);
            Ok(if command == "force_emergency" {
                OperatorCommand::ForceEmergency(id)
            } else {
                OperatorCommand::BoostPriority(id)
            })
        }
        "change_quantum" => {
            let arg = parts.next().ok_or_else(|| bad(""))?;
            let n: u64 = arg.parse().map_err(|_| bad(arg))?;
            if n == 0 {
                return Err(bad(arg));
            }
            Ok(OperatorCommand::ChangeQuantum(n))
        }
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

/// Forces an emergency with `fuel=1`, as if the jet itself had reported it.
pub fn force_emergency<C: JetChannel>(state: &mut SchedulerState<C>, id: JetId) {
    handle_emergency(state, id, 1);
}

/// Promotes a jet one priority level: Q3 -> Q2 -> Q1. A no-op at Q1.
pub fn boost_priority<C: JetChannel>(state: &mut SchedulerState<C>, id: JetId) {
    let Some((which, idx)) = state.find(id) else {
        return;
    };
    let target = match which {
        QueueId::Q3 => QueueId::Q2,
        QueueId::Q2 => QueueId::Q1,
        QueueId::Q1 => return,
    };
    let _ = state.move_jet(id, which, idx, target);
}
