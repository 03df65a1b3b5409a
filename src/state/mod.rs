//! State management module
//!
//! This module contains the timer lifecycle state and the snapshots
//! published to watchers.

pub mod timer_state;

// Re-export main types
pub use timer_state::{TimerSnapshot, TimerState};
