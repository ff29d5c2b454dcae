//! One-second tick sources.
//!
//! The controller owns exactly one clock and never lets two ticks be armed at
//! once: every phase transition cancels before it schedules again. Clocks do
//! not call back into the controller; whoever drives the session waits on the
//! clock and then calls [`TimerController::tick`](super::TimerController::tick).

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

pub const TICK: Duration = Duration::from_secs(1);

pub trait Clock {
    /// Arm a repeating one-second tick. The clock must not already be armed.
    fn schedule(&mut self);
    /// Disarm. No-op when nothing is armed.
    fn cancel(&mut self);
    fn is_scheduled(&self) -> bool;
}

/// Clock whose ticks are delivered by hand. Counts how often it was armed
/// and disarmed so tests can check the controller's bookkeeping.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    armed: bool,
    schedules: usize,
    cancels: usize,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedules(&self) -> usize {
        self.schedules
    }

    pub fn cancels(&self) -> usize {
        self.cancels
    }
}

impl Clock for ManualClock {
    fn schedule(&mut self) {
        assert!(!self.armed, "clock scheduled while already armed");
        self.armed = true;
        self.schedules += 1;
    }

    fn cancel(&mut self) {
        if self.armed {
            self.armed = false;
            self.cancels += 1;
        }
    }

    fn is_scheduled(&self) -> bool {
        self.armed
    }
}

/// Wall-clock ticks from a tokio interval.
#[derive(Debug, Default)]
pub struct IntervalClock {
    interval: Option<Interval>,
}

impl IntervalClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves on the next tick while armed; pends forever while disarmed.
    pub async fn fired(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Clock for IntervalClock {
    fn schedule(&mut self) {
        debug_assert!(self.interval.is_none(), "clock scheduled while already armed");
        // First tick one second from now, not immediately.
        let mut interval = interval_at(Instant::now() + TICK, TICK);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn cancel(&mut self) {
        self.interval = None;
    }

    fn is_scheduled(&self) -> bool {
        self.interval.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_counts_arming() {
        let mut clock = ManualClock::new();
        clock.schedule();
        clock.cancel();
        clock.cancel();
        clock.schedule();
        assert!(clock.is_scheduled());
        assert_eq!(clock.schedules(), 2);
        assert_eq!(clock.cancels(), 1);
    }

    #[test]
    #[should_panic(expected = "already armed")]
    fn manual_clock_rejects_double_schedule() {
        let mut clock = ManualClock::new();
        clock.schedule();
        clock.schedule();
    }

    #[tokio::test(start_paused = true)]
    async fn interval_clock_ticks_once_per_second() {
        let mut clock = IntervalClock::new();
        clock.schedule();
        let start = Instant::now();
        clock.fired().await;
        clock.fired().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_interval_clock_never_fires() {
        let mut clock = IntervalClock::new();
        clock.schedule();
        clock.cancel();
        let fired = tokio::time::timeout(Duration::from_secs(5), clock.fired()).await;
        assert!(fired.is_err());
    }
}
