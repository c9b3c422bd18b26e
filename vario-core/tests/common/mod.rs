//! Common test utilities for the integration tests
//!
//! This module provides:
//! - A deterministic noise source
//! - The inverse barometric formula, to turn an altitude profile into pressures
//! - A simulated barometer replaying a flight profile

#![allow(dead_code)]

use vario_core::{Sample, SensorAdapter, SensorConfig, VarioError, VarioResult};

/// Deterministic pseudo random numbers for noise
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        // Xorshift algorithm
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / 16777216.0
    }

    pub fn gen_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// Pressure (hPa) at `altitude_m` above the level where pressure is `reference_hpa`
///
/// Inverse of the hypsometric formula the core uses.
pub fn pressure_at(altitude_m: f32, temperature_c: f32, reference_hpa: f32) -> f32 {
    let temperature_k = temperature_c + 273.15;
    let base = altitude_m * 0.0065 / temperature_k + 1.0;
    reference_hpa / base.powf(1.0 / 0.190223)
}

/// Altitudes sampled every `period_ms` for a constant vertical speed
pub fn constant_climb(start_m: f32, rate_mps: f32, period_ms: u64, samples: usize) -> Vec<f32> {
    (0..samples)
        .map(|i| start_m + rate_mps * (i as u64 * period_ms) as f32 / 1000.0)
        .collect()
}

/// Barometer replaying an altitude profile
pub struct SimulatedBarometer {
    altitudes: Vec<f32>,
    index: usize,
    temperature_c: f32,
    sea_level_hpa: f32,
    noise: Option<(TestRng, f32)>,
    busy_polls: u32,
    pending: u32,
    pub reads: u32,
    pub configured: Option<SensorConfig>,
}

impl SimulatedBarometer {
    pub fn new(altitudes: Vec<f32>) -> Self {
        Self {
            altitudes,
            index: 0,
            temperature_c: 15.0,
            sea_level_hpa: 1013.25,
            noise: None,
            busy_polls: 0,
            pending: 0,
            reads: 0,
            configured: None,
        }
    }

    /// Air temperature reported with every sample
    pub fn with_temperature(mut self, temperature_c: f32) -> Self {
        self.temperature_c = temperature_c;
        self
    }

    /// Actual sea level pressure of the simulated weather
    pub fn with_sea_level(mut self, sea_level_hpa: f32) -> Self {
        self.sea_level_hpa = sea_level_hpa;
        self
    }

    /// Uniform pressure noise of ±`amplitude_hpa`
    pub fn with_noise(mut self, seed: u32, amplitude_hpa: f32) -> Self {
        self.noise = Some((TestRng::new(seed), amplitude_hpa));
        self
    }

    /// Report not-ready this many times before every sample
    pub fn with_busy_polls(mut self, polls: u32) -> Self {
        self.busy_polls = polls;
        self.pending = polls;
        self
    }
}

impl SensorAdapter for SimulatedBarometer {
    fn configure(&mut self, config: &SensorConfig) -> VarioResult<()> {
        self.configured = Some(*config);
        Ok(())
    }

    fn try_read_sample(&mut self) -> nb::Result<Sample, VarioError> {
        if self.pending > 0 {
            self.pending -= 1;
            return Err(nb::Error::WouldBlock);
        }
        let Some(&altitude) = self.altitudes.get(self.index) else {
            return Err(nb::Error::Other(VarioError::SensorFault { reason: "profile ended" }));
        };
        self.index += 1;
        self.pending = self.busy_polls;
        self.reads += 1;

        let mut pressure = pressure_at(altitude, self.temperature_c, self.sea_level_hpa);
        if let Some((rng, amplitude)) = self.noise.as_mut() {
            pressure += rng.gen_range(-*amplitude, *amplitude);
        }
        Ok(Sample::new(self.temperature_c, pressure))
    }
}

/// Population variance of a series
pub fn variance(values: &[f32]) -> f32 {
    let mean = values.iter().sum::<f32>() / values.len() as f32;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / values.len() as f32
}

pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
