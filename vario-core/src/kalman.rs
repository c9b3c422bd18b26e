//! Scalar Kalman Smoother for the Climb Rate
//!
//! The raw rate from [`RateEstimator`](crate::rate::RateEstimator) still jumps
//! by a few tenths of a m/s between cycles, which sounds awful on an audio
//! vario. This one-state filter treats the true rate as a random walk:
//!
//! ```text
//! Pc = P + q              prediction covariance
//! G  = Pc / (Pc + r)      gain
//! P  = (1 - G) · Pc       updated covariance
//! Xp = Xe                 prediction
//! Xe = G · (z - Xp) + Xp  updated estimate
//! ```
//!
//! `q` is the process variance and `r` the measurement variance from
//! [`KalmanConfig`]. The filter starts at `P = 1`, `Xe = 0`, so the first few
//! measurements are followed closely and the gain then settles at a value
//! fixed by `q / r`.

use crate::config::KalmanConfig;

/// One-dimensional Kalman filter
#[derive(Debug, Clone, PartialEq)]
pub struct KalmanSmoother {
    process_variance: f32,
    measurement_variance: f32,
    covariance: f32,
    gain: f32,
    predicted: f32,
    estimate: f32,
}

impl KalmanSmoother {
    /// Filter in its initial state using the given tuning
    pub fn new(config: &KalmanConfig) -> Self {
        Self {
            process_variance: config.process_variance,
            measurement_variance: config.measurement_variance,
            covariance: 1.0,
            gain: 0.0,
            predicted: 0.0,
            estimate: 0.0,
        }
    }

    /// Fold one measurement in and return the new estimate
    pub fn update(&mut self, measurement: f32) -> f32 {
        let predicted_covariance = self.covariance + self.process_variance;
        self.gain = predicted_covariance / (predicted_covariance + self.measurement_variance);
        self.covariance = (1.0 - self.gain) * predicted_covariance;
        self.predicted = self.estimate;
        self.estimate = self.gain * (measurement - self.predicted) + self.predicted;
        self.estimate
    }

    /// Current estimate
    pub fn estimate(&self) -> f32 {
        self.estimate
    }

    /// Estimate before the last update
    pub fn prediction(&self) -> f32 {
        self.predicted
    }

    /// Gain used by the last update
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Estimate covariance `P`
    pub fn variance(&self) -> f32 {
        self.covariance
    }

    /// Back to `P = 1`, `Xe = 0`, keeping the tuning
    pub fn reset(&mut self) {
        self.covariance = 1.0;
        self.gain = 0.0;
        self.predicted = 0.0;
        self.estimate = 0.0;
    }
}

impl Default for KalmanSmoother {
    fn default() -> Self {
        Self::new(&KalmanConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_follows_measurement() {
        let mut filter = KalmanSmoother::default();
        let estimate = filter.update(2.0);
        // P starts at 1, so the first gain is almost 1
        assert!(filter.gain() > 0.999);
        assert!((estimate - 2.0).abs() < 1e-3);
    }

    #[test]
    fn covariance_shrinks_and_settles() {
        let mut filter = KalmanSmoother::default();
        let mut previous = filter.variance();
        for _ in 0..20 {
            filter.update(1.0);
            // f32 rounding may nudge a settled covariance up by one ULP
            assert!(filter.variance() <= previous * (1.0 + 1e-5));
            previous = filter.variance();
        }
        // steady state: P² + qP - qr = 0
        let (q, r) = (4e-5_f32, 1e-4_f32);
        let steady = (-q + libm::sqrtf(q * q + 4.0 * q * r)) / 2.0;
        for _ in 0..500 {
            filter.update(1.0);
        }
        assert!((filter.variance() - steady).abs() < 1e-6);
    }

    #[test]
    fn settled_covariance_stays_within_rounding() {
        let mut filter = KalmanSmoother::default();
        for _ in 0..10 {
            filter.update(1.0);
        }
        let settled = filter.variance();
        for _ in 0..50 {
            filter.update(1.0);
            assert!((filter.variance() - settled).abs() <= settled * 1e-5);
        }
    }

    #[test]
    fn smooths_noise() {
        let mut filter = KalmanSmoother::default();
        let mut raw_var = 0.0;
        let mut smooth_var = 0.0;
        for i in 0..400 {
            let noise = if i % 2 == 0 { 0.5 } else { -0.5 };
            let out = filter.update(3.0 + noise);
            if i >= 200 {
                raw_var += noise * noise;
                smooth_var += (out - 3.0) * (out - 3.0);
            }
        }
        assert!(smooth_var < raw_var);
    }

    #[test]
    fn reset_keeps_tuning() {
        let config = KalmanConfig::default().with_measurement_variance(0.5);
        let mut filter = KalmanSmoother::new(&config);
        filter.update(4.0);
        filter.reset();
        assert_eq!(filter, KalmanSmoother::new(&config));
        assert_eq!(filter.prediction(), 0.0);
    }
}
