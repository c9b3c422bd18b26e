//! Time-Related Constants
//!
//! Conversion factors and rate-window parameters. Timestamps in the core are
//! milliseconds.

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Divisor applied to the caller's sample frequency to size the rate window.
///
/// `window = max(1, frequency_hz / 5)`: at 25 Hz the rate averages the last
/// 5 deltas, i.e. ~200 ms of history.
pub const RATE_WINDOW_DIVISOR: u16 = 5;

/// Smallest rate window (samples). A window of one is the instantaneous rate.
pub const MIN_RATE_WINDOW: u16 = 1;
