//! Periodic tick sources consumed by the countdown task

use std::{future::Future, time::Duration};
use tokio::{
    sync::mpsc,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};

/// A serial stream of ticks. `None` means the source is closed for good.
pub trait TickSource: Send + 'static {
    fn next_tick(&mut self) -> impl Future<Output = Option<()>> + Send;
}

/// Wall-clock ticks every `period`, first one a full period after creation
#[derive(Debug)]
pub struct IntervalTicks {
    interval: Interval,
}

impl IntervalTicks {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        // A stalled runtime should not replay a burst of missed seconds
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    /// One tick per second
    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl TickSource for IntervalTicks {
    fn next_tick(&mut self) -> impl Future<Output = Option<()>> + Send {
        async move {
            self.interval.tick().await;
            Some(())
        }
    }
}

/// Ticks pumped by hand, one per message
impl TickSource for mpsc::UnboundedReceiver<()> {
    fn next_tick(&mut self) -> impl Future<Output = Option<()>> + Send {
        self.recv()
    }
}
