//! Fixed-period game clock

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::{debug, trace};

/// A single repeating timer owned by a game session.
///
/// The first tick arrives one full period after [`start`](Self::start) or
/// [`restart`](Self::restart). Ticks missed while the owner was busy are
/// skipped rather than delivered in a burst. A stopped driver never ticks.
#[derive(Debug)]
pub struct TickDriver {
    period: Duration,
    interval: Option<Interval>,
    ticks: u64,
}

impl TickDriver {
    /// Create a stopped driver
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
            ticks: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Ticks delivered since the last start
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Start ticking. Has no effect on a driver that is already running.
    pub fn start(&mut self) {
        if self.interval.is_none() {
            self.arm();
        }
    }

    /// Drop the current schedule and start a fresh one from now
    pub fn restart(&mut self) {
        self.arm();
    }

    pub fn stop(&mut self) {
        if self.interval.take().is_some() {
            debug!(ticks = self.ticks, "tick driver stopped");
        }
    }

    /// Wait for the next tick. Cancel-safe, so it can sit in a `select!`.
    /// Never resolves while the driver is stopped.
    pub async fn tick(&mut self) -> Instant {
        match self.interval.as_mut() {
            Some(interval) => {
                let at = interval.tick().await;
                self.ticks += 1;
                trace!(tick = self.ticks, "tick");
                at
            }
            None => std::future::pending().await,
        }
    }

    fn arm(&mut self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(interval);
        self.ticks = 0;
        debug!(period_ms = self.period.as_millis() as u64, "tick driver armed");
    }
}
