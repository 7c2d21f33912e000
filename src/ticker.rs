//! Fixed timestep scheduling
//!
//! `Ticker` turns elapsed wall time into a whole number of ticks. Time comes
//! from a `Clock`, so tests can drive the loop without sleeping.

use std::time::{Duration, Instant};

/// Source of elapsed time
pub trait Clock {
    /// Time since the previous call (or since creation on the first call)
    fn elapsed(&mut self) -> Duration;

    /// Wait roughly `duration` before the next iteration
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock backed by `Instant`
#[derive(Debug)]
pub struct SystemClock {
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        dt
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Deterministic clock: sleeping advances time exactly
#[derive(Debug, Default)]
pub struct ManualClock {
    pending: Duration,
    total: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add time without sleeping
    pub fn advance(&mut self, duration: Duration) {
        self.pending += duration;
        self.total += duration;
    }

    /// All time that has passed on this clock
    pub fn total(&self) -> Duration {
        self.total
    }
}

impl Clock for ManualClock {
    fn elapsed(&mut self) -> Duration {
        std::mem::take(&mut self.pending)
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    max_substeps: u32,
    accumulator: Duration,
}

impl Ticker {
    pub fn new(interval: Duration, max_substeps: u32) -> Self {
        Self {
            interval,
            max_substeps: max_substeps.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Bank `elapsed` and return how many ticks are due.
    ///
    /// At most `max_substeps` are returned; the excess is dropped so a long
    /// stall cannot snowball into ever longer catch-up frames.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut due = 0;
        while self.accumulator >= self.interval && due < self.max_substeps {
            self.accumulator -= self.interval;
            due += 1;
        }
        if due == self.max_substeps && self.accumulator >= self.interval {
            log::warn!("Dropping {:?} of backlog after {} ticks", self.accumulator, due);
            self.accumulator = Duration::ZERO;
        }
        due
    }

    /// Forget banked time (after a pause in ticking)
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_20: Duration = Duration::from_millis(20);

    #[test]
    fn test_ticker_accumulates_remainder() {
        let mut ticker = Ticker::new(MS_20, 8);

        assert_eq!(ticker.advance(Duration::from_millis(45)), 2);
        // 5ms carried over
        assert_eq!(ticker.advance(Duration::from_millis(14)), 0);
        assert_eq!(ticker.advance(Duration::from_millis(1)), 1);
    }

    #[test]
    fn test_ticker_caps_substeps() {
        let mut ticker = Ticker::new(MS_20, 4);

        assert_eq!(ticker.advance(Duration::from_secs(1)), 4);
        // Backlog was dropped, not replayed
        assert_eq!(ticker.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_ticker_reset() {
        let mut ticker = Ticker::new(MS_20, 8);
        ticker.advance(Duration::from_millis(19));
        ticker.reset();
        assert_eq!(ticker.advance(Duration::from_millis(19)), 0);
    }

    #[test]
    fn test_manual_clock() {
        let mut clock = ManualClock::new();
        clock.sleep(MS_20);
        clock.advance(Duration::from_millis(5));

        assert_eq!(clock.elapsed(), Duration::from_millis(25));
        assert_eq!(clock.elapsed(), Duration::ZERO);
        assert_eq!(clock.total(), Duration::from_millis(25));
    }
}
