//! Timer state and the snapshot published on every tick

use serde::{Deserialize, Serialize};

use crate::timer::format_mm_ss;

/// Lifecycle of a countdown timer. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Active,
    Stopped,
}

impl TimerState {
    /// Check if the timer is still consuming ticks
    pub fn is_active(&self) -> bool {
        matches!(self, TimerState::Active)
    }
}

/// Point-in-time view of a timer for watchers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub remaining_seconds: i64,
    pub formatted: String,
}

impl TimerSnapshot {
    /// Snapshot of an active timer with `remaining_seconds` left
    pub fn active(remaining_seconds: i64) -> Self {
        Self::new(TimerState::Active, remaining_seconds)
    }

    /// Snapshot of a stopped timer
    pub fn stopped(remaining_seconds: i64) -> Self {
        Self::new(TimerState::Stopped, remaining_seconds)
    }

    fn new(state: TimerState, remaining_seconds: i64) -> Self {
        Self {
            state,
            remaining_seconds,
            formatted: format_mm_ss(remaining_seconds),
        }
    }

    /// Check if the timer is active
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_formats_remaining() {
        let snapshot = TimerSnapshot::active(125);
        assert!(snapshot.is_active());
        assert_eq!(snapshot.formatted, "02:05");

        let snapshot = TimerSnapshot::stopped(0);
        assert!(!snapshot.is_active());
        assert_eq!(snapshot.formatted, "00:00");
    }

    #[test]
    fn test_snapshot_serializes_lowercase_state() {
        let json = serde_json::to_value(TimerSnapshot::active(3)).unwrap();
        assert_eq!(json["state"], "active");
        assert_eq!(json["remaining_seconds"], 3);
        assert_eq!(json["formatted"], "00:03");
    }
}
