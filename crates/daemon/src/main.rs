// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! skywatchd: owns the tick engine, the I/O reactor, the operator console,
//! and the periodic display. Spawned worker binaries are `skywatch-jet`
//! processes (see `skywatch-jet`).

use clap::Parser;
use skywatch_daemon::config::Config;
use skywatch_daemon::console::{self, OperatorCommand};
use skywatch_daemon::display;
use skywatch_daemon::jetproc::JetEvent;
use skywatch_daemon::logging::{setup_tracing, RunLog};
use skywatch_daemon::reactor::{self, ReactorEvent};
use skywatch_engine::{tick, SchedulerState, StatsLog};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tokio::sync::Notify;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    let _log_guard = setup_tracing(&config).map_err(|e| {
        eprintln!("failed to set up logging: {e}");
        e
    })?;
    let run_log = Arc::new(RunLog::open(config.run_log_path())?);

    info!(run_id = %config.run_id, "skywatchd starting");

    let jet_binary = config.jet_binary_path();
    if std::fs::metadata(&jet_binary).is_err() {
        error!(path = %jet_binary.display(), "jet worker binary not found, refusing to start");
        eprintln!("skywatchd: jet worker binary not found at {}", jet_binary.display());
        std::process::exit(1);
    }

    let state: reactor::SharedState =
        Arc::new(parking_lot::Mutex::new(SchedulerState::new(config.engine_config())));
    let stats = StatsLog::new();

    let (events_tx, events_rx) = mpsc::unbounded_channel::<ReactorEvent>();
    let (jet_tx, mut jet_rx) = mpsc::unbounded_channel::<JetEvent>();

    // Forward jet feedback into the reactor's single fan-in channel.
    {
        let events_tx = events_tx.clone();
        tokio::spawn(async move {
            while let Some(event) = jet_rx.recv().await {
                if events_tx.send(ReactorEvent::Jet(event)).is_err() {
                    return;
                }
            }
        });
    }

    let shutdown = Arc::new(Notify::new());

    // The reactor owns jet spawning and state mutation; runs to completion
    // when arrivals are done and no jets remain, or on an `exit` command.
    let reactor_handle = {
        let state = Arc::clone(&state);
        let stats = Arc::clone(&stats);
        let run_log = Arc::clone(&run_log);
        let jet_binary = jet_binary.clone();
        let landing_secs = config.landing_secs;
        let refuel_secs = config.refuel_secs;
        let shutdown = Arc::clone(&shutdown);
        tokio::spawn(async move {
            reactor::run(
                state,
                stats,
                run_log,
                jet_binary,
                landing_secs,
                refuel_secs,
                events_rx,
                jet_tx,
            )
            .await;
            shutdown.notify_waiters();
        })
    };

    // Tick task: one simulated second per wall-clock second.
    {
        let state = Arc::clone(&state);
        let run_log = Arc::clone(&run_log);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
            loop {
                interval.tick().await;
                let outcome = tick(&mut state.lock());
                for id in &outcome.aged_up {
                    run_log.append(&format!("aged_up {id}"));
                }
                if let Some(id) = outcome.demoted {
                    run_log.append(&format!("demoted {id}"));
                }
                if let Some((id, _)) = outcome.dispatched {
                    run_log.append(&format!("dispatched {id}"));
                }
                if let Some(id) = outcome.send_failed {
                    error!(jet = %id, "command send failed, will retry next tick");
                }
            }
        });
    }

    // Display task: a status line every two simulated seconds.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(2));
            loop {
                interval.tick().await;
                let snapshot = display::snapshot(&state.lock());
                info!("{}", display::render_snapshot(&snapshot));
            }
        });
    }

    // Operator console: one command per stdin line. The read is bounded by a
    // 1s idle timeout so this task keeps checking in rather than blocking
    // forever on a line that never arrives, letting it notice shutdown.
    {
        let events_tx = events_tx.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match tokio::time::timeout(std::time::Duration::from_secs(1), lines.next_line())
                    .await
                {
                    Ok(Ok(Some(line))) => match console::parse_line(&line) {
                        Ok(command) => {
                            let is_exit = command == OperatorCommand::Exit;
                            if events_tx.send(ReactorEvent::Operator(command)).is_err() || is_exit
                            {
                                return;
                            }
                        }
                        Err(e) => error!("could not parse operator command: {:?}", e),
                    },
                    Ok(Ok(None)) => return,
                    Ok(Err(e)) => {
                        error!("error reading operator input: {}", e);
                        return;
                    }
                    Err(_) => continue,
                }
            }
        });
    }

    // Built-in arrival source, only when synthetic arrivals were requested.
    if config.synthetic_arrivals > 0 {
        let events_tx = events_tx.clone();
        let count = config.synthetic_arrivals;
        let interval_secs = config.arrival_interval_secs;
        tokio::spawn(async move {
            skywatch_daemon::arrival_source::run(count, interval_secs, events_tx).await;
        });
    } else {
        let _ = events_tx.send(ReactorEvent::ArrivalsDone);
    }

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = reactor_handle => {
            info!("reactor finished, all jets landed");
        }
        _ = shutdown.notified() => {}
        _ = sigterm.recv() => {
            info!("received SIGTERM, shutting down");
        }
        _ = sigint.recv() => {
            info!("received SIGINT, shutting down");
        }
    }

    // Belt-and-suspenders: the reactor already drains on an `exit` command,
    // but a SIGTERM/SIGINT race can land here with jets still queued. A
    // no-op when nothing remains.
    reactor::drain_remaining_jets(&state, &run_log);

    let completed = stats.snapshot();
    let elapsed_ticks = state.lock().elapsed_ticks;
    let context_switches = state.lock().context_switches;
    let runway_busy_ticks = state.lock().runway_busy_ticks;
    let summary = skywatch_core::RunStats {
        total_ticks: elapsed_ticks,
        context_switches,
        runway_busy_ticks,
        completed,
    };
    print!("{}", display::render_summary(&summary));
    run_log.append("run complete");

    Ok(())
}
