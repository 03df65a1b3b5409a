//! Countdown timer core
//!
//! Time-free state machine and `mm:ss` formatting. Driving it from a real
//! clock lives in the `tasks` module.

pub mod countdown;
pub mod format;

// Re-export main types
pub use countdown::{Countdown, Expiry, ExpireFn, RenderFn, TickOutcome};
pub use format::format_mm_ss;
