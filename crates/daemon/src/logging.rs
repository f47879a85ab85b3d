// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured tracing output plus the append-only, human-readable run log
//! named by run identity.

use crate::config::Config;
use crate::error::DaemonError;
use skywatch_core::clock::{format_hms, Clock, SystemClock};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub fn setup_tracing(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, DaemonError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    std::fs::create_dir_all(&config.log_dir)
        .map_err(|e| DaemonError::LogSetup(e.to_string()))?;

    let file_appender =
        tracing_appender::rolling::never(&config.log_dir, format!("{}.trace.log", config.run_id));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}

/// Append-only plain-text log of significant scheduler events: dispatch,
/// preemption, promotion, completion. Independent of the `tracing` output —
/// meant for post-run inspection rather than live operational monitoring.
/// Each line is stamped `[HH:MM:SS]`, matching the run log format of the
/// system this simulator replaces.
pub struct RunLog {
    file: Mutex<File>,
    clock: Arc<dyn Clock>,
}

impl RunLog {
    pub fn open(path: PathBuf) -> Result<Self, DaemonError> {
        Self::open_with_clock(path, Arc::new(SystemClock))
    }

    pub fn open_with_clock(path: PathBuf, clock: Arc<dyn Clock>) -> Result<Self, DaemonError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DaemonError::LogSetup(e.to_string()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| DaemonError::LogSetup(e.to_string()))?;
        Ok(Self {
            file: Mutex::new(file),
            clock,
        })
    }

    pub fn append(&self, line: &str) {
        let Ok(mut file) = self.file.lock() else {
            return;
        };
        let stamp = format_hms(self.clock.now_unix());
        // Best-effort: a failed write to the run log must never take down
        // the scheduler loop.
        let _ = writeln!(file, "{} {}", stamp, line);
    }
}
