//! Fixed-rate tick pacing

use std::thread;
use std::time::{Duration, Instant};

/// Default target ticks per second.
pub const DEFAULT_TPS: i32 = 30;

/// Sleeps out the remainder of each tick period.
///
/// A target of 1 sleeps a flat second after every tick regardless of how
/// long the tick took. Zero or negative targets run unthrottled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickScheduler {
    target_tps: i32,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_TPS)
    }
}

impl TickScheduler {
    pub fn new(target_tps: i32) -> Self {
        Self { target_tps }
    }

    pub fn target_tps(&self) -> i32 {
        self.target_tps
    }

    pub fn is_throttled(&self) -> bool {
        self.target_tps > 0
    }

    /// Length of one tick, or `None` when unthrottled.
    pub fn period(&self) -> Option<Duration> {
        let tps = u32::try_from(self.target_tps).ok().filter(|&t| t > 0)?;
        Some(Duration::from_secs(1) / tps)
    }

    /// How long to sleep after a tick that took `elapsed`.
    pub fn sleep_after(&self, elapsed: Duration) -> Option<Duration> {
        let period = self.period()?;
        if self.target_tps == 1 {
            return Some(period);
        }
        Some(period.saturating_sub(elapsed)).filter(|d| !d.is_zero())
    }

    /// Run `tick`, then sleep whatever is left of the period.
    pub fn run_tick<T>(&self, tick: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = tick();
        if let Some(pause) = self.sleep_after(start.elapsed()) {
            thread::sleep(pause);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_target() {
        assert_eq!(
            TickScheduler::new(30).period(),
            Some(Duration::from_nanos(33_333_333))
        );
        assert_eq!(TickScheduler::new(1).period(), Some(Duration::from_secs(1)));
        assert_eq!(TickScheduler::new(0).period(), None);
        assert_eq!(TickScheduler::new(-5).period(), None);
        assert_eq!(TickScheduler::default().target_tps(), DEFAULT_TPS);
    }

    #[test]
    fn test_sleep_is_remainder_of_period() {
        let sched = TickScheduler::new(10);
        assert_eq!(
            sched.sleep_after(Duration::from_millis(30)),
            Some(Duration::from_millis(70))
        );
        // Overrun ticks do not sleep at all
        assert_eq!(sched.sleep_after(Duration::from_millis(150)), None);
    }

    #[test]
    fn test_one_tps_sleeps_flat_second() {
        let sched = TickScheduler::new(1);
        assert_eq!(
            sched.sleep_after(Duration::from_millis(400)),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_unthrottled_never_sleeps() {
        let sched = TickScheduler::new(0);
        assert!(!sched.is_throttled());
        assert_eq!(sched.sleep_after(Duration::ZERO), None);
        assert_eq!(sched.run_tick(|| 7), 7);
    }
}
