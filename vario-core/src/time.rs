//! Time management for the control loop
//!
//! The rate estimator works on millisecond timestamps supplied by the caller.
//! This module provides the clock abstraction for hosts that do not track
//! timestamps themselves:
//! - Monotonic clock (std, for host simulation)
//! - Fixed clock (for deterministic tests)
//! - Cycle timer remembering the previous loop timestamp

/// Timestamp in milliseconds since device boot (or any monotonic origin)
pub type Timestamp = u64;

/// Source of time for the system
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;
}

/// Monotonic time source backed by `std::time::Instant`
///
/// Starts at 0 when created, always increases
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MonotonicTime {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicTime {
    /// Start a clock at 0 ms
    pub fn new() -> Self {
        Self { origin: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicTime {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_millis() as Timestamp
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Create a clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to an absolute timestamp
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move the clock forward
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

/// Remembers the timestamp of the previous control-loop cycle
///
/// Each `lap` returns the `(previous, now)` pair the rate estimator needs.
/// The first lap has no previous timestamp and returns `None`.
#[derive(Debug, Clone, Default)]
pub struct CycleTimer {
    last: Option<Timestamp>,
}

impl CycleTimer {
    /// Timer with no laps recorded
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Record `now` and return the previous lap timestamp with it
    pub fn lap(&mut self, now: Timestamp) -> Option<(Timestamp, Timestamp)> {
        let previous = self.last.replace(now);
        previous.map(|last| (last, now))
    }

    /// Timestamp of the most recent lap
    pub fn last(&self) -> Option<Timestamp> {
        self.last
    }

    /// Forget the previous lap
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Milliseconds between two timestamps, zero if the clock went backwards
pub fn delta_ms(earlier: Timestamp, later: Timestamp) -> u64 {
    later.saturating_sub(earlier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_advances() {
        let mut time = FixedTime::new(1000);
        assert_eq!(time.now(), 1000);

        time.advance(500);
        assert_eq!(time.now(), 1500);

        time.set(20);
        assert_eq!(time.now(), 20);
    }

    #[test]
    fn cycle_timer_pairs_laps() {
        let mut timer = CycleTimer::new();
        assert_eq!(timer.lap(100), None);
        assert_eq!(timer.lap(140), Some((100, 140)));
        assert_eq!(timer.lap(180), Some((140, 180)));
        assert_eq!(timer.last(), Some(180));

        timer.reset();
        assert_eq!(timer.lap(200), None);
    }

    #[test]
    fn backwards_clock_gives_zero_delta() {
        assert_eq!(delta_ms(1000, 1200), 200);
        assert_eq!(delta_ms(1200, 1000), 0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn monotonic_time_never_decreases() {
        let clock = MonotonicTime::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
