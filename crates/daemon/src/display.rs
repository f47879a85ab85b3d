// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic queue/runway snapshot and the end-of-run summary. DTO structs
//! are plain data, the way the daemon's old protocol DTOs were — summary
//! structs with no behavior beyond rendering.

use skywatch_core::{format_elapsed, JetId, JetStatus, RunStats};
use skywatch_engine::{policy::QueueId, JetChannel, SchedulerState};

#[derive(Debug, Clone)]
pub struct JetSnapshot {
    pub id: JetId,
    pub fuel: i32,
    pub status: JetStatus,
}

#[derive(Debug, Clone)]
pub struct QueueSnapshot {
    pub q1: Vec<JetSnapshot>,
    pub q2: Vec<JetSnapshot>,
    pub q3: Vec<JetSnapshot>,
    pub runway_jet: Option<JetId>,
    pub q2_quantum: u64,
    pub paused: bool,
    pub elapsed_ticks: u64,
}

pub fn snapshot<C: JetChannel>(state: &SchedulerState<C>) -> QueueSnapshot {
    let collect = |which: QueueId| -> Vec<JetSnapshot> {
        state
            .queue(which)
            .iter()
            .map(|(_, j)| JetSnapshot {
                id: j.id,
                fuel: j.fuel,
                status: j.status,
            })
            .collect()
    };
    QueueSnapshot {
        q1: collect(QueueId::Q1),
        q2: collect(QueueId::Q2),
        q3: collect(QueueId::Q3),
        runway_jet: state.runway_jet,
        q2_quantum: state.config.q2_quantum,
        paused: state.paused,
        elapsed_ticks: state.elapsed_ticks,
    }
}

/// Renders a snapshot as the operator's periodic status line.
pub fn render_snapshot(snapshot: &QueueSnapshot) -> String {
    format!(
        "[t={}{}] runway={} q1={} q2={} q3={} quantum={}",
        format_elapsed(snapshot.elapsed_ticks),
        if snapshot.paused { " PAUSED" } else { "" },
        snapshot
            .runway_jet
            .map(|id| id.to_string())
            .unwrap_or_else(|| "idle".to_string()),
        snapshot.q1.len(),
        snapshot.q2.len(),
        snapshot.q3.len(),
        snapshot.q2_quantum,
    )
}

/// Renders the end-of-run summary: per-jet turnaround/wait/response plus
/// system-wide context switches and runway utilization.
pub fn render_summary(stats: &RunStats) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "run complete after {}: {} jets landed, {} context switches, {:.1}% runway utilization\n",
        format_elapsed(stats.total_ticks),
        stats.completed.len(),
        stats.context_switches,
        stats.utilization() * 100.0,
    ));
    for jet in &stats.completed {
        out.push_str(&format!(
            "  {} turnaround={} wait={} response={}\n",
            jet.id,
            format_elapsed(jet.turnaround()),
            format_elapsed(jet.waiting()),
            format_elapsed(jet.response()),
        ));
    }
    out
}
