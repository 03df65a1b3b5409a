//! Session Countdown - a countdown timer that fires a terminal action exactly once
//!
//! This is the main entry point for the session-countdown application.

use std::io::Write;

use anyhow::anyhow;
use chrono::Local;
use tokio::sync::{oneshot, watch};
use tracing::{error, info, warn};

use session_countdown::{
    config::{Command, Config, CountdownArgs, KeyArgs, NavArgs},
    page::{data_date, next_deadline, seconds_until, KeyPress, NavState},
    services::execute_expire_command,
    state::TimerSnapshot,
    tasks::{create, expire_or_cancel, IntervalTicks, TimerOutcome},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout carries only the rendered countdown
    tracing_subscriber::fmt()
        .with_env_filter(format!("session_countdown={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    match config.command {
        Command::Countdown(args) => run_countdown(args).await,
        Command::Nav(args) => print_nav(args),
        Command::Key(args) => print_key(args),
    }
}

async fn run_countdown(args: CountdownArgs) -> anyhow::Result<()> {
    let seconds = if args.until_tomorrow {
        let now = Local::now();
        let deadline = next_deadline(&now, args.hour)
            .ok_or_else(|| anyhow!("No valid deadline tomorrow at {:02}:00", args.hour))?;
        info!("Counting down to {}", data_date(&deadline));
        seconds_until(&now, &deadline)
    } else {
        args.seconds
    };

    let (expired_tx, expired_rx) = oneshot::channel();
    let json = args.json;

    let on_tick = move |formatted: &str| -> anyhow::Result<()> {
        if !json {
            writeln!(std::io::stdout().lock(), "{}", formatted)?;
        }
        Ok(())
    };
    let on_expire = move || -> anyhow::Result<()> {
        expired_tx
            .send(())
            .map_err(|_| anyhow!("Countdown runner is no longer waiting"))
    };

    let mut handle = create(seconds, IntervalTicks::every_second(), on_tick, on_expire)?;
    info!("Countdown {} started: {} seconds", handle.id(), seconds);

    let printer = json.then(|| tokio::spawn(print_snapshots(handle.subscribe())));

    let shutdown = async {
        match shutdown_signal().await {
            Ok(signal) => info!("Signal {} received, cancelling countdown", signal),
            Err(e) => error!("Signal handling failed, cancelling countdown: {}", e),
        }
    };
    let expired = expire_or_cancel(&mut handle, expired_rx, shutdown).await;

    if expired {
        match &args.on_expire {
            Some(command) => execute_expire_command(command).await?,
            None => info!("Time's up"),
        }
    }

    let outcome = handle.wait().await?;
    if let Some(printer) = printer {
        if let Err(e) = printer.await {
            warn!("Snapshot printer did not complete: {}", e);
        }
    }

    match outcome {
        TimerOutcome::Expired => info!("Countdown complete"),
        TimerOutcome::Cancelled => info!("Countdown cancelled"),
        TimerOutcome::SourceClosed => warn!("Countdown stopped without expiring"),
    }
    Ok(())
}

/// Print one JSON line per published snapshot until the timer stops
async fn print_snapshots(mut snapshots: watch::Receiver<TimerSnapshot>) {
    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow_and_update().clone();
        match serde_json::to_string(&snapshot) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!("Failed to serialize snapshot: {}", e),
        }
        if !snapshot.is_active() {
            break;
        }
    }
}

fn print_nav(args: NavArgs) -> anyhow::Result<()> {
    let state = NavState::init(&args.cookies);
    println!("{}", serde_json::to_string(&state)?);
    Ok(())
}

fn print_key(args: KeyArgs) -> anyhow::Result<()> {
    let press = KeyPress {
        key: args.key,
        ctrl: args.ctrl,
    };
    let verdict = if press.accepts(&args.value) { "accept" } else { "reject" };
    println!("{}", verdict);
    Ok(())
}
