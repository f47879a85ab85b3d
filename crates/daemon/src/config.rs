// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run-level configuration, resolved once at startup from CLI flags with
//! documented defaults. No required environment variables.

use clap::Parser;
use skywatch_engine::policy::{
    DEFAULT_AGING_THRESHOLD, DEFAULT_LANDING_SECS, DEFAULT_Q2_QUANTUM, DEFAULT_REFUEL_SECS,
    QUEUE_CAPACITY,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "skywatchd", about = "MLFQ air-traffic-control simulator")]
pub struct Config {
    /// Round-robin quantum for Q2, in simulated seconds.
    #[arg(long, default_value_t = DEFAULT_Q2_QUANTUM)]
    pub q2_quantum: u64,

    /// Ticks a jet may sit in Q3 before it ages back to Q2.
    #[arg(long, default_value_t = DEFAULT_AGING_THRESHOLD)]
    pub aging_threshold: u64,

    /// Per-queue slot table capacity.
    #[arg(long, default_value_t = QUEUE_CAPACITY)]
    pub queue_capacity: usize,

    /// Landing duration communicated to jet workers, in seconds.
    #[arg(long, default_value_t = DEFAULT_LANDING_SECS)]
    pub landing_secs: u64,

    /// Refuel duration communicated to jet workers, in seconds.
    #[arg(long, default_value_t = DEFAULT_REFUEL_SECS)]
    pub refuel_secs: u64,

    /// Identifies this run; used to name the append-only log file.
    #[arg(long, default_value = "skywatch")]
    pub run_id: String,

    /// Directory the run log and tracing output are written under.
    #[arg(long, default_value = "./logs")]
    pub log_dir: PathBuf,

    /// Path to the jet worker executable. Defaults to the sibling binary
    /// built by this workspace.
    #[arg(long)]
    pub jet_binary: Option<PathBuf>,

    /// Number of synthetic jets the built-in arrival source generates
    /// before signalling arrivals-done. Zero disables the built-in
    /// generator entirely (operator-only arrivals via `new_jet`).
    #[arg(long, default_value_t = 0)]
    pub synthetic_arrivals: u32,

    /// Seconds between synthetic arrivals.
    #[arg(long, default_value_t = 3)]
    pub arrival_interval_secs: u64,
}

impl Config {
    pub fn engine_config(&self) -> skywatch_engine::Config {
        skywatch_engine::Config {
            queue_capacity: self.queue_capacity,
            aging_threshold: self.aging_threshold,
            q2_quantum: self.q2_quantum,
        }
    }

    pub fn run_log_path(&self) -> PathBuf {
        self.log_dir.join(format!("{}_skywatch_log.txt", self.run_id))
    }

    pub fn jet_binary_path(&self) -> PathBuf {
        self.jet_binary.clone().unwrap_or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.join("skywatch-jet")))
                .unwrap_or_else(|| PathBuf::from("skywatch-jet"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_log_path_is_named_by_run_id() {
        let config = Config::parse_from(["skywatchd", "--run-id", "abc"]);
        assert_eq!(
            config.run_log_path(),
            PathBuf::from("./logs/abc_skywatch_log.txt")
        );
    }
}
