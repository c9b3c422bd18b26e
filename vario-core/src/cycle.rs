//! Cycle Gate: at most one sensor read per control-loop iteration
//!
//! Within one iteration the caller may ask for altitude, raw rate and smoothed
//! rate in any order. Only the first request polls the sensor; the others get
//! the cached sample. [`CycleGate::end_cycle`] re-arms the gate for the next
//! iteration.
//!
//! The gate also owns the altitude pair the rate estimator differentiates:
//!
//! - `altitude`: computed from the most recent accepted sample
//! - `last_altitude`: moved to the previous altitude on the first fresh read
//!   of each cycle, and by the variometer after every rate computation
//!
//! The very first read seeds both with the same value, so the first delta is
//! zero rather than the full altitude.

use crate::{
    altitude::altitude_from_pressure,
    config::RetryPolicy,
    errors::VarioResult,
    sensor::{read_with_retry, Sample, SensorAdapter},
    validators::SampleValidator,
};

/// Sample served for the current cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleSample {
    /// Raw sensor sample
    pub sample: Sample,
    /// Altitude (m) relative to the reference in force when it was computed
    pub altitude_m: f32,
    /// True when this call polled the sensor, false when served from cache
    pub fresh: bool,
}

/// Per-cycle sample cache and altitude tracker
#[derive(Debug, Clone)]
pub struct CycleGate {
    retry: RetryPolicy,
    validator: SampleValidator,
    latest: Option<CycleSample>,
    fetched: bool,
    last_altitude: f32,
}

impl CycleGate {
    /// Gate with no sample yet
    pub fn new(retry: RetryPolicy, validator: SampleValidator) -> Self {
        Self {
            retry,
            validator,
            latest: None,
            fetched: false,
            last_altitude: 0.0,
        }
    }

    /// Return this cycle's sample, polling the sensor only if none was taken yet
    ///
    /// A failed read or a rejected sample leaves the cycle un-fetched, so the
    /// next call polls again. Nothing is cached on error.
    pub fn fetch<S>(&mut self, sensor: &mut S, reference_hpa: f32) -> VarioResult<CycleSample>
    where
        S: SensorAdapter + ?Sized,
    {
        if self.fetched {
            if let Some(latest) = self.latest {
                return Ok(CycleSample { fresh: false, ..latest });
            }
        }

        let sample = read_with_retry(sensor, &self.retry)?;
        if let Err(e) = self.validator.validate(&sample) {
            vario_warn!("rejected sample {:?}: {}", sample, e);
            return Err(e);
        }
        let altitude_m =
            altitude_from_pressure(sample.pressure_hpa, sample.temperature_c, reference_hpa)?;

        self.last_altitude = match self.latest {
            Some(previous) => previous.altitude_m,
            None => altitude_m,
        };

        let fetched = CycleSample { sample, altitude_m, fresh: true };
        self.latest = Some(fetched);
        self.fetched = true;
        vario_trace!("fetched {:?}, altitude {} m", sample, altitude_m);
        Ok(fetched)
    }

    /// Recompute the cached altitude for a new reference pressure
    ///
    /// `last_altitude` moves by the same offset, so the next rate sees no jump.
    pub fn rebase(&mut self, reference_hpa: f32) -> VarioResult<()> {
        let Some(latest) = self.latest.as_mut() else {
            return Ok(());
        };

        let altitude_m = altitude_from_pressure(
            latest.sample.pressure_hpa,
            latest.sample.temperature_c,
            reference_hpa,
        )?;
        self.last_altitude += altitude_m - latest.altitude_m;
        latest.altitude_m = altitude_m;
        Ok(())
    }

    /// Re-arm the gate for the next control-loop iteration
    pub fn end_cycle(&mut self) {
        self.fetched = false;
    }

    /// True once a sample was taken in the current cycle
    pub fn is_fetched(&self) -> bool {
        self.fetched
    }

    /// Most recent accepted sample, possibly from an earlier cycle
    pub fn latest(&self) -> Option<&CycleSample> {
        self.latest.as_ref()
    }

    /// Altitude the next delta is measured from
    pub fn last_altitude(&self) -> f32 {
        self.last_altitude
    }

    /// Move the delta origin, used after each rate computation
    pub fn set_last_altitude(&mut self, altitude_m: f32) {
        self.last_altitude = altitude_m;
    }
}

impl Default for CycleGate {
    fn default() -> Self {
        Self::new(RetryPolicy::default(), SampleValidator::default())
    }
}
