//! Vertical Speed Estimator
//!
//! ## Algorithm
//!
//! The estimator keeps two accumulators, one for altitude deltas and one for
//! elapsed time, each holding at most `window` shares:
//!
//! ```text
//! window = max(1, frequency_hz / 5)
//!
//! filling  (count < window):  acc += new;               count += 1
//! saturated (count == window): acc -= acc / count; acc += new
//!
//! rate = mean_delta * 1000 / elapsed_ms        [m/s]
//! ```
//!
//! Once saturated this is an exponentially decaying average with a time
//! constant of roughly `window` samples. It needs no sample history, just
//! three numbers, and tolerates jitter in the loop period because the time
//! accumulator decays at the same pace as the altitude accumulator.
//!
//! At 25 Hz the window is 5 samples (~200 ms of history). A frequency hint
//! below 5 Hz gives a window of one: the instantaneous rate.
//!
//! ## Changing the Frequency
//!
//! If the caller lowers the hint so the window shrinks below the current
//! count, both accumulators are scaled down to `window` shares first. The
//! ratio, and therefore the reported rate, is preserved.

use crate::{
    constants::time::{MIN_RATE_WINDOW, MS_PER_SECOND, RATE_WINDOW_DIVISOR},
    errors::{VarioError, VarioResult},
};

/// Rate window size for a sample frequency
pub fn window_for(frequency_hint: u16) -> u16 {
    (frequency_hint / RATE_WINDOW_DIVISOR).max(MIN_RATE_WINDOW)
}

/// Bounded-memory climb rate accumulator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateEstimator {
    mean: f32,
    elapsed_ms: f32,
    count: u16,
}

impl RateEstimator {
    /// Empty estimator
    pub const fn new() -> Self {
        Self { mean: 0.0, elapsed_ms: 0.0, count: 0 }
    }

    /// Fold one altitude delta into the accumulators and return the rate in m/s
    ///
    /// # Errors
    ///
    /// `DivisionByZero` while no elapsed time has been accumulated. The
    /// accumulator update of the call is kept.
    pub fn update(
        &mut self,
        delta_altitude_m: f32,
        delta_ms: u64,
        frequency_hint: u16,
    ) -> VarioResult<f32> {
        let window = window_for(frequency_hint);
        self.shrink_to(window);

        let delta_ms = delta_ms as f32;
        if self.count < window {
            self.mean += delta_altitude_m;
            self.elapsed_ms += delta_ms;
            self.count += 1;
            if self.count == window {
                vario_debug!("rate window saturated at {} samples", window);
            }
        } else {
            let share = self.count as f32;
            self.mean -= self.mean / share;
            self.mean += delta_altitude_m;
            self.elapsed_ms -= self.elapsed_ms / share;
            self.elapsed_ms += delta_ms;
        }

        self.current()
    }

    /// Rate from the accumulators without adding a sample
    pub fn current(&self) -> VarioResult<f32> {
        if self.elapsed_ms == 0.0 {
            return Err(VarioError::DivisionByZero);
        }
        Ok(self.mean * MS_PER_SECOND as f32 / self.elapsed_ms)
    }

    fn shrink_to(&mut self, window: u16) {
        if self.count <= window {
            return;
        }
        let scale = window as f32 / self.count as f32;
        vario_debug!("rate window shrunk from {} to {} samples", self.count, window);
        self.mean *= scale;
        self.elapsed_ms *= scale;
        self.count = window;
    }

    /// Accumulated altitude delta (m)
    pub fn mean_delta(&self) -> f32 {
        self.mean
    }

    /// Accumulated elapsed time (ms)
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Shares currently held, never above the window
    pub fn count(&self) -> u16 {
        self.count
    }

    /// Drop all history
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
