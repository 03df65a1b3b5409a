//! Countdown timer background task and its handle

use std::{
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
};
use tokio::{
    sync::{oneshot, watch},
    task::{JoinError, JoinHandle},
};
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::{
    error::TimerError,
    state::TimerSnapshot,
    timer::{Countdown, TickOutcome},
};
use super::TickSource;

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

/// How a countdown task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    /// Reached zero and ran the terminal action
    Expired,
    /// Stopped through [`TimerHandle::cancel`]
    Cancelled,
    /// The tick source closed before the timer reached zero
    SourceClosed,
}

enum Event {
    Cancel,
    HandleDropped,
    Tick(Option<()>),
}

/// Create a countdown and start consuming `ticks` immediately.
///
/// A negative `initial_seconds` fails with [`TimerError::InvalidDuration`]
/// before anything is spawned. Must be called from within a tokio runtime.
pub fn create<S, R, E>(
    initial_seconds: i64,
    ticks: S,
    on_tick: R,
    on_expire: E,
) -> Result<TimerHandle, TimerError>
where
    S: TickSource,
    R: FnMut(&str) -> anyhow::Result<()> + Send + 'static,
    E: FnOnce() -> anyhow::Result<()> + Send + 'static,
{
    let countdown = Countdown::new(initial_seconds, on_tick, on_expire)?;
    let id = NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed);

    let (cancel_tx, cancel_rx) = watch::channel(false);
    let (snapshot_tx, snapshot_rx) = watch::channel(countdown.snapshot());

    let span = info_span!("countdown", id);
    let task = tokio::spawn(
        countdown_task(countdown, ticks, cancel_rx, snapshot_tx).instrument(span),
    );

    Ok(TimerHandle {
        id,
        cancel_tx,
        snapshot_rx,
        task: Some(task),
        outcome: None,
    })
}

/// Drive a countdown from a tick source until it expires, is cancelled,
/// or the source closes
pub async fn countdown_task<S: TickSource>(
    mut countdown: Countdown,
    mut ticks: S,
    mut cancel_rx: watch::Receiver<bool>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
) -> Result<TimerOutcome, TimerError> {
    info!("Starting countdown from {} seconds", countdown.remaining_seconds());

    let mut handle_alive = true;

    loop {
        let event = tokio::select! {
            biased;

            changed = cancel_rx.changed(), if handle_alive => {
                if changed.is_ok() { Event::Cancel } else { Event::HandleDropped }
            }

            tick = ticks.next_tick() => Event::Tick(tick),
        };

        match event {
            Event::Cancel => {
                countdown.stop();
                snapshot_tx.send_replace(countdown.snapshot());
                info!("Countdown cancelled with {} seconds left", countdown.remaining_seconds());
                return Ok(TimerOutcome::Cancelled);
            }
            Event::HandleDropped => {
                debug!("Timer handle dropped, countdown continues detached");
                handle_alive = false;
            }
            Event::Tick(None) => {
                countdown.stop();
                snapshot_tx.send_replace(countdown.snapshot());
                warn!("Tick source closed with {} seconds left", countdown.remaining_seconds());
                return Ok(TimerOutcome::SourceClosed);
            }
            Event::Tick(Some(())) => match countdown.tick() {
                Ok(TickOutcome::Running) => {
                    snapshot_tx.send_replace(countdown.snapshot());
                }
                Ok(TickOutcome::Expired(expiry)) => {
                    snapshot_tx.send_replace(countdown.snapshot());
                    drop(ticks);
                    info!("Countdown expired, running terminal action");
                    if let Err(e) = expiry.fire() {
                        error!("Terminal action failed: {}", e);
                        return Err(e);
                    }
                    return Ok(TimerOutcome::Expired);
                }
                Ok(TickOutcome::Ignored) => {
                    debug!("Tick ignored by stopped countdown");
                }
                Err(e) => {
                    error!("Render callback failed, stopping countdown: {}", e);
                    countdown.stop();
                    snapshot_tx.send_replace(countdown.snapshot());
                    return Err(e);
                }
            },
        }
    }
}

/// Handle to a running countdown
#[derive(Debug)]
pub struct TimerHandle {
    id: u64,
    cancel_tx: watch::Sender<bool>,
    snapshot_rx: watch::Receiver<TimerSnapshot>,
    task: Option<JoinHandle<Result<TimerOutcome, TimerError>>>,
    /// Result of the task, when collected by `cancel`
    outcome: Option<Result<TimerOutcome, TimerError>>,
}

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Latest published state of the timer
    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver notified on every tick and on stop
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Check if the driving task has finished
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stop the countdown and release its tick source.
    ///
    /// Returns once the task has exited, so no callback runs after this.
    /// Cancelling a finished or already-cancelled timer does nothing.
    pub async fn cancel(&mut self) {
        let Some(task) = self.task.take() else {
            debug!("Countdown {} already released", self.id);
            return;
        };

        // Fails only when the task already dropped its receiver on exit
        let _ = self.cancel_tx.send(true);

        let result = join_result(task.await);
        debug!("Countdown {} released: {:?}", self.id, result);
        self.outcome = Some(result);
    }

    /// Wait for the countdown to end and report how it ended.
    ///
    /// Callback failures surface here as [`TimerError::Callback`], also
    /// when the timer had already failed before [`cancel`](Self::cancel)
    /// collected it.
    pub async fn wait(mut self) -> Result<TimerOutcome, TimerError> {
        match self.task.take() {
            Some(task) => join_result(task.await),
            None => self.outcome.take().unwrap_or(Ok(TimerOutcome::Cancelled)),
        }
    }
}

/// Wait for the terminal action to report in through `expired`, or for
/// `shutdown`, which cancels the timer. Expiry wins when both are ready.
///
/// Returns true if the timer expired.
pub async fn expire_or_cancel<F>(
    handle: &mut TimerHandle,
    expired: oneshot::Receiver<()>,
    shutdown: F,
) -> bool
where
    F: Future<Output = ()>,
{
    tokio::select! {
        biased;

        fired = expired => fired.is_ok(),
        _ = shutdown => {
            handle.cancel().await;
            false
        }
    }
}

fn join_result(
    joined: Result<Result<TimerOutcome, TimerError>, JoinError>,
) -> Result<TimerOutcome, TimerError> {
    joined.map_err(|e| TimerError::TaskFailed(e.to_string()))?
}
