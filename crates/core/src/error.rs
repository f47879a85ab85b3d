// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the wire protocol.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unknown command tag: {0}")]
    UnknownCommandTag(u32),
    #[error("unknown feedback tag: {0}")]
    UnknownFeedbackTag(u32),
    #[error("truncated read: expected {expected} bytes, got {got}")]
    Truncated { expected: usize, got: usize },
    #[error("channel io error: {0}")]
    Io(#[from] std::io::Error),
}
