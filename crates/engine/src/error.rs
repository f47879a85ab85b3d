// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the scheduler engine.

use crate::policy::QueueId;
use thiserror::Error;
use skywatch_core::JetId;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("queue {0:?} is full")]
    QueueFull(QueueId),
    #[error("jet {0} not found")]
    JetNotFound(JetId),
    #[error("failed to send command to jet {id}: {reason}")]
    SendFailed { id: JetId, reason: String },
}
