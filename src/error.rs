//! Error types for countdown timers

use thiserror::Error;

/// Errors raised while creating or driving a countdown timer
#[derive(Error, Debug)]
pub enum TimerError {
    /// The initial duration was negative; no timer was created
    #[error("Invalid countdown duration: {0} seconds (must be non-negative)")]
    InvalidDuration(i64),

    /// A render or terminal-action callback returned an error
    #[error("Countdown callback failed: {0:#}")]
    Callback(anyhow::Error),

    /// The driver task panicked or was aborted
    #[error("Countdown task failed: {0}")]
    TaskFailed(String),
}
