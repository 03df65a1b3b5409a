//! Session Countdown - a countdown timer that renders `mm:ss` every tick and
//! fires a terminal action exactly once
//!
//! The core is a time-free state machine ([`timer::Countdown`]) driven by a
//! tokio task from an injected [`tasks::TickSource`]. A handful of page
//! helpers (login nav links, integer keystroke filter, next-day deadline)
//! live in [`page`].

pub mod config;
pub mod error;
pub mod page;
pub mod services;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use state::{TimerSnapshot, TimerState};
pub use tasks::{create, IntervalTicks, TickSource, TimerHandle, TimerOutcome};
pub use utils::signals::shutdown_signal;
