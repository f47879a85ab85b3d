// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! skywatch-jet: the worker process spawned per jet. Two threads share one
//! fuel counter and one feedback writer: a fuel ticker that burns one unit
//! per simulated second and raises edge-triggered feedback, and a command
//! loop that blocks on the controller's stdin and executes landing/refuel
//! sequences.

use skywatch_core::{Command, Feedback, FeedbackKind, REFUEL_AMOUNT};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
enum ArgsError {
    #[error("expected <jet_id> <initial_fuel> <landing_secs> <refuel_secs>, got {0:?}")]
    WrongArity(Vec<String>),
    #[error("bad {field}: {value}")]
    NotAnInteger { field: &'static str, value: String },
}

struct Args {
    id: u64,
    initial_fuel: i32,
    landing_secs: u64,
    refuel_secs: u64,
}

fn parse_args() -> Result<Args, ArgsError> {
    let argv: Vec<String> = std::env::args().collect();
    if argv.len() != 5 {
        return Err(ArgsError::WrongArity(argv[1..].to_vec()));
    }
    let parse_u64 = |i: usize, field: &'static str| -> Result<u64, ArgsError> {
        argv[i]
            .parse()
            .map_err(|_| ArgsError::NotAnInteger { field, value: argv[i].clone() })
    };
    Ok(Args {
        id: parse_u64(1, "jet_id")?,
        initial_fuel: argv[2]
            .parse()
            .map_err(|_| ArgsError::NotAnInteger { field: "initial_fuel", value: argv[2].clone() })?,
        landing_secs: parse_u64(3, "landing_secs")?,
        refuel_secs: parse_u64(4, "refuel_secs")?,
    })
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("skywatch-jet: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    tracing::info!(jet_id = args.id, fuel = args.initial_fuel, "jet process started");

    let fuel = Arc::new(AtomicI32::new(args.initial_fuel));
    let landing = Arc::new(AtomicBool::new(false));
    let keep_running = Arc::new(AtomicBool::new(true));

    let (tx, rx) = mpsc::channel::<Feedback>();

    let writer = std::thread::spawn(move || {
        let mut stdout = io::stdout();
        for feedback in rx {
            if feedback.encode(&mut stdout).is_err() {
                return;
            }
            let _ = stdout.flush();
        }
    });

    let fuel_thread = {
        let fuel = Arc::clone(&fuel);
        let landing = Arc::clone(&landing);
        let keep_running = Arc::clone(&keep_running);
        let tx = tx.clone();
        std::thread::spawn(move || fuel_ticker(fuel, landing, keep_running, tx))
    };

    run_command_loop(&args, fuel, landing, keep_running, tx);

    let _ = fuel_thread.join();
    let _ = writer.join();
}

/// Burns one fuel unit per second and raises each edge-triggered threshold
/// at most once. Suppressed while `landing` is set, matching the source
/// jet's behavior of never reporting fuel state mid-landing.
fn fuel_ticker(
    fuel: Arc<AtomicI32>,
    landing: Arc<AtomicBool>,
    keep_running: Arc<AtomicBool>,
    tx: Sender<Feedback>,
) {
    let mut fuel_low_fired = false;
    let mut waiting_fuel_fired = false;
    let mut emergency_fired = false;

    while keep_running.load(Ordering::Acquire) && fuel.load(Ordering::Acquire) > 0 {
        std::thread::sleep(Duration::from_secs(1));
        let current = fuel.fetch_sub(1, Ordering::AcqRel) - 1;

        if landing.load(Ordering::Acquire) {
            continue;
        }

        for feedback in threshold_crossings(
            current,
            &mut fuel_low_fired,
            &mut waiting_fuel_fired,
            &mut emergency_fired,
        ) {
            if tx.send(feedback).is_err() {
                return;
            }
        }
    }
}

/// Which edge-triggered feedback (if any) `current` fuel crosses, latching
/// each flag so it fires at most once per jet lifetime.
///
/// Order matches the source jet: the fuel-low check precedes the
/// waiting-fuel check in code, but since fuel only descends, waiting-fuel
/// (25) always fires chronologically before fuel-low (20).
fn threshold_crossings(
    current: i32,
    fuel_low_fired: &mut bool,
    waiting_fuel_fired: &mut bool,
    emergency_fired: &mut bool,
) -> Vec<Feedback> {
    let mut out = Vec::new();
    if current == 20 && !*fuel_low_fired {
        *fuel_low_fired = true;
        out.push(Feedback::new(FeedbackKind::FuelLow, current));
    }
    if current == 25 && !*waiting_fuel_fired {
        *waiting_fuel_fired = true;
        out.push(Feedback::new(FeedbackKind::WaitingFuel, current));
    }
    if current <= 10 && !*emergency_fired {
        *emergency_fired = true;
        out.push(Feedback::new(FeedbackKind::Emergency, current));
    }
    out
}

fn run_command_loop(
    args: &Args,
    fuel: Arc<AtomicI32>,
    landing: Arc<AtomicBool>,
    keep_running: Arc<AtomicBool>,
    tx: Sender<Feedback>,
) {
    let mut stdin = io::stdin();
    loop {
        let command = match Command::decode(&mut stdin) {
            Ok(c) => c,
            Err(_) => {
                // Controller closed its write half, or sent garbage: treat
                // either as a shutdown signal.
                keep_running.store(false, Ordering::Release);
                return;
            }
        };

        match command {
            Command::StartLanding => {
                landing.store(true, Ordering::Release);
                std::thread::sleep(Duration::from_secs(args.landing_secs));
                keep_running.store(false, Ordering::Release);
                let _ = tx.send(Feedback::new(FeedbackKind::Landed, 0));
                return;
            }
            Command::Refuel => {
                let _ = tx.send(Feedback::new(FeedbackKind::Refueling, 0));
                std::thread::sleep(Duration::from_secs(args.refuel_secs));
                let new_fuel = fuel.fetch_add(REFUEL_AMOUNT, Ordering::AcqRel) + REFUEL_AMOUNT;
                let _ = tx.send(Feedback::new(FeedbackKind::Refueled, new_fuel));
            }
            Command::Shutdown => {
                keep_running.store(false, Ordering::Release);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waiting_fuel_fires_before_fuel_low_as_fuel_descends() {
        let (mut low, mut waiting, mut emergency) = (false, false, false);
        let at_25 = threshold_crossings(25, &mut low, &mut waiting, &mut emergency);
        assert_eq!(at_25, vec![Feedback::new(FeedbackKind::WaitingFuel, 25)]);
        assert!(waiting && !low);

        let at_20 = threshold_crossings(20, &mut low, &mut waiting, &mut emergency);
        assert_eq!(at_20, vec![Feedback::new(FeedbackKind::FuelLow, 20)]);
    }

    #[test]
    fn each_threshold_fires_at_most_once() {
        let (mut low, mut waiting, mut emergency) = (false, false, false);
        threshold_crossings(20, &mut low, &mut waiting, &mut emergency);
        let again = threshold_crossings(20, &mut low, &mut waiting, &mut emergency);
        assert!(again.is_empty());
    }

    #[test]
    fn emergency_fires_for_any_fuel_at_or_below_ten() {
        let (mut low, mut waiting, mut emergency) = (false, false, false);
        let fired = threshold_crossings(7, &mut low, &mut waiting, &mut emergency);
        assert_eq!(fired, vec![Feedback::new(FeedbackKind::Emergency, 7)]);
    }

    #[test]
    fn parse_args_rejects_wrong_arity() {
        // parse_args reads std::env::args(), which under `cargo test` carries
        // the test harness's own argv, not the 4 positional args this binary
        // expects — so it is always expected to reject.
        assert!(parse_args().is_err());
    }
}
