//! Background tasks module
//!
//! This module contains the task that drives a countdown from a tick source,
//! the handle used to observe and cancel it, and the tick sources themselves.

pub mod countdown_task;
pub mod tick_source;

// Re-export main types and functions
pub use countdown_task::{countdown_task, create, expire_or_cancel, TimerHandle, TimerOutcome};
pub use tick_source::{IntervalTicks, TickSource};
