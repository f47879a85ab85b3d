// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the daemon process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("failed to spawn jet worker: {0}")]
    SpawnFailed(#[from] std::io::Error),
    #[error("jet worker child has no stdin/stdout pipe")]
    MissingPipe,
    #[error("failed to create log directory or file: {0}")]
    LogSetup(String),
}
