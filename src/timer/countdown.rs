//! Countdown core: decrement, render, expire once
//!
//! `Countdown` is a synchronous state machine with no notion of time. Whoever
//! owns it calls [`Countdown::tick`] once per period; the async driver in
//! `tasks::countdown_task` does that from a [`TickSource`](crate::tasks::TickSource).

use std::fmt;

use tracing::debug;

use crate::{
    error::TimerError,
    state::{TimerSnapshot, TimerState},
};
use super::format_mm_ss;

/// Render callback, receives the formatted `mm:ss` string
pub type RenderFn = Box<dyn FnMut(&str) -> anyhow::Result<()> + Send>;

/// Terminal action, runs at most once
pub type ExpireFn = Box<dyn FnOnce() -> anyhow::Result<()> + Send>;

/// Pending terminal action handed out by the tick that exhausted the timer.
///
/// The timer is already `Stopped` when this exists, so firing it (or
/// failing to) can never make the timer fire again.
pub struct Expiry(ExpireFn);

impl Expiry {
    /// Run the terminal action
    pub fn fire(self) -> Result<(), TimerError> {
        (self.0)().map_err(TimerError::Callback)
    }
}

impl fmt::Debug for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Expiry")
    }
}

/// Result of delivering one tick
#[derive(Debug)]
pub enum TickOutcome {
    /// Rendered, still time left
    Running,
    /// Rendered `00:00`; the caller must release its tick source and fire this
    Expired(Expiry),
    /// The timer was already stopped; nothing was rendered
    Ignored,
}

/// A countdown over whole seconds
pub struct Countdown {
    remaining: i64,
    state: TimerState,
    on_tick: RenderFn,
    on_expire: Option<ExpireFn>,
}

impl Countdown {
    /// Create an active countdown. Fails if `initial_seconds` is negative.
    pub fn new<R, E>(initial_seconds: i64, on_tick: R, on_expire: E) -> Result<Self, TimerError>
    where
        R: FnMut(&str) -> anyhow::Result<()> + Send + 'static,
        E: FnOnce() -> anyhow::Result<()> + Send + 'static,
    {
        if initial_seconds < 0 {
            return Err(TimerError::InvalidDuration(initial_seconds));
        }

        Ok(Self {
            remaining: initial_seconds,
            state: TimerState::Active,
            on_tick: Box::new(on_tick),
            on_expire: Some(Box::new(on_expire)),
        })
    }

    /// Deliver one tick.
    ///
    /// The decrement happens before `on_tick` runs, so an error from the
    /// render callback leaves the countdown one second further along.
    pub fn tick(&mut self) -> Result<TickOutcome, TimerError> {
        if !self.state.is_active() {
            debug!("Tick delivered to stopped countdown, ignoring");
            return Ok(TickOutcome::Ignored);
        }

        self.remaining = (self.remaining - 1).max(0);
        let formatted = format_mm_ss(self.remaining);
        (self.on_tick)(&formatted).map_err(TimerError::Callback)?;

        if self.remaining > 0 {
            return Ok(TickOutcome::Running);
        }

        self.state = TimerState::Stopped;
        match self.on_expire.take() {
            Some(action) => Ok(TickOutcome::Expired(Expiry(action))),
            None => Ok(TickOutcome::Ignored),
        }
    }

    /// Stop without running the terminal action. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.state.is_active() {
            return false;
        }
        self.state = TimerState::Stopped;
        self.on_expire = None;
        true
    }

    pub fn remaining_seconds(&self) -> i64 {
        self.remaining
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Current state as a publishable snapshot
    pub fn snapshot(&self) -> TimerSnapshot {
        match self.state {
            TimerState::Active => TimerSnapshot::active(self.remaining),
            TimerState::Stopped => TimerSnapshot::stopped(self.remaining),
        }
    }
}

impl fmt::Debug for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Countdown")
            .field("remaining", &self.remaining)
            .field("state", &self.state)
            .field("expire_pending", &self.on_expire.is_some())
            .finish()
    }
}
