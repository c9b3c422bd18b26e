//! Variometer Facade
//!
//! [`Variometer`] owns the sensor adapter and every piece of estimator state:
//! reference pressure, cycle gate, rate accumulators and the Kalman smoother.
//! All mutation goes through its methods; there is no shared state and no
//! interior mutability.
//!
//! ## Control Loop
//!
//! ```text
//! loop {
//!     altitude(unit)         ─┐
//!     rate(last, now, hz)     ├─ any order, one sensor read in total
//!     smoothed_rate(...)     ─┘
//!     end_cycle()
//! }
//! ```
//!
//! Or let [`Variometer::tick`] do all of it with a [`TimeSource`].

use crate::{
    altitude::{reference_from_altitude, AltitudeUnit},
    config::VarioConfig,
    cycle::{CycleGate, CycleSample},
    errors::VarioResult,
    kalman::KalmanSmoother,
    rate::RateEstimator,
    reference::{ReferenceKind, ReferencePressure},
    sensor::SensorAdapter,
    time::{delta_ms, CycleTimer, TimeSource, Timestamp},
    validators::SampleValidator,
};

/// Raw and smoothed climb rate in m/s
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarioRate {
    /// Rate estimator output
    pub raw: f32,
    /// Kalman smoothed rate
    pub smoothed: f32,
}

/// Everything one [`Variometer::tick`] produces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Time of the cycle (ms)
    pub timestamp: Timestamp,
    /// Altitude in meters relative to the current reference
    pub altitude_m: f32,
    /// Climb rate, `None` on the first tick
    pub vario: Option<VarioRate>,
}

impl Reading {
    /// Altitude in the requested unit
    pub fn altitude(&self, unit: AltitudeUnit) -> f32 {
        unit.convert(self.altitude_m)
    }
}

/// Barometric altimeter and variometer over a [`SensorAdapter`]
#[derive(Debug)]
pub struct Variometer<S> {
    sensor: S,
    config: VarioConfig,
    reference: ReferencePressure,
    gate: CycleGate,
    rate: RateEstimator,
    smoother: KalmanSmoother,
    timer: CycleTimer,
}

impl<S: SensorAdapter> Variometer<S> {
    /// Variometer with default configuration
    pub fn new(sensor: S) -> Self {
        let config = VarioConfig::default();
        Self {
            sensor,
            reference: ReferencePressure::standard(),
            gate: CycleGate::new(config.retry, SampleValidator::default()),
            rate: RateEstimator::new(),
            smoother: KalmanSmoother::new(&config.kalman),
            timer: CycleTimer::new(),
            config,
        }
    }

    /// Variometer with a validated custom configuration
    pub fn with_config(sensor: S, config: VarioConfig) -> VarioResult<Self> {
        config.validate()?;
        Ok(Self {
            sensor,
            reference: ReferencePressure::initial(config.reference_hpa)?,
            gate: CycleGate::new(config.retry, SampleValidator::default()),
            rate: RateEstimator::new(),
            smoother: KalmanSmoother::new(&config.kalman),
            timer: CycleTimer::new(),
            config,
        })
    }

    /// Replace the sample plausibility limits
    ///
    /// Forgets any cached sample, so call it before the first read.
    pub fn with_validator(mut self, validator: SampleValidator) -> Self {
        self.gate = CycleGate::new(self.config.retry, validator);
        self
    }

    /// Hand the sampling settings to the adapter
    pub fn initialize(&mut self) -> VarioResult<()> {
        self.config.sensor.validate()?;
        self.sensor.configure(&self.config.sensor)?;
        vario_debug!("sensor configured: {:?}", self.config.sensor);
        Ok(())
    }

    /// Set QNH (hPa); later altitudes read above sea level
    pub fn set_reference(&mut self, qnh_hpa: f32) -> VarioResult<()> {
        self.apply_reference(qnh_hpa, ReferenceKind::Qnh)
    }

    /// Current reference pressure (hPa)
    pub fn reference(&self) -> f32 {
        self.reference.hpa()
    }

    /// How the current reference was obtained
    pub fn reference_kind(&self) -> ReferenceKind {
        self.reference.kind()
    }

    /// Back-solve QNH from a known altitude of the current position
    ///
    /// Uses this cycle's sample, reading the sensor if needed. Returns and
    /// stores the new reference.
    pub fn derive_reference_from_altitude(&mut self, altitude_m: f32) -> VarioResult<f32> {
        let fetched = self.ensure_sample_fetched()?;
        let qnh = reference_from_altitude(
            altitude_m,
            fetched.sample.temperature_c,
            fetched.sample.pressure_hpa,
        )?;
        self.apply_reference(qnh, ReferenceKind::Qnh)?;
        Ok(qnh)
    }

    /// Make the current position zero altitude (QFE) and return the pressure
    ///
    /// Reads through the same bounded retry as every other read.
    pub fn set_reference_to_ground_level(&mut self) -> VarioResult<f32> {
        let qfe = self.ensure_sample_fetched()?.sample.pressure_hpa;
        self.apply_reference(qfe, ReferenceKind::Qfe)?;
        Ok(qfe)
    }

    /// Altitude relative to the reference in `unit`
    pub fn altitude(&mut self, unit: AltitudeUnit) -> VarioResult<f32> {
        let altitude_m = self.ensure_sample_fetched()?.altitude_m;
        Ok(unit.convert(altitude_m))
    }

    /// Raw climb rate (m/s)
    ///
    /// `last` and `now` are the millisecond timestamps of the previous and
    /// current cycle; `frequency_hint` is the loop frequency in Hz and sizes
    /// the averaging window.
    ///
    /// # Errors
    ///
    /// Read errors from the sensor, or `DivisionByZero` while no time has
    /// elapsed in the window.
    pub fn rate(
        &mut self,
        last: Timestamp,
        now: Timestamp,
        frequency_hint: u16,
    ) -> VarioResult<f32> {
        let altitude_m = self.ensure_sample_fetched()?.altitude_m;
        let delta_altitude = altitude_m - self.gate.last_altitude();
        let rate = self.rate.update(delta_altitude, delta_ms(last, now), frequency_hint);
        self.gate.set_last_altitude(altitude_m);
        rate
    }

    /// Kalman smoothed climb rate (m/s)
    ///
    /// On error the smoother state is left untouched.
    pub fn smoothed_rate(
        &mut self,
        last: Timestamp,
        now: Timestamp,
        frequency_hint: u16,
    ) -> VarioResult<f32> {
        let measurement = self.rate(last, now, frequency_hint)?;
        Ok(self.smoother.update(measurement))
    }

    /// Allow the next request to read the sensor again
    pub fn end_cycle(&mut self) {
        self.gate.end_cycle();
    }

    /// Run one complete cycle against `clock`
    ///
    /// The cycle is ended even when the read fails.
    pub fn tick<T>(&mut self, clock: &T, frequency_hint: u16) -> VarioResult<Reading>
    where
        T: TimeSource + ?Sized,
    {
        let timestamp = clock.now();
        let reading = self.read_cycle(timestamp, frequency_hint);
        self.end_cycle();
        reading
    }

    fn read_cycle(&mut self, timestamp: Timestamp, frequency_hint: u16) -> VarioResult<Reading> {
        let altitude_m = self.ensure_sample_fetched()?.altitude_m;

        let vario = match self.timer.lap(timestamp) {
            Some((last, now)) => {
                let raw = self.rate(last, now, frequency_hint)?;
                let smoothed = self.smoother.update(raw);
                Some(VarioRate { raw, smoothed })
            }
            None => {
                self.gate.set_last_altitude(altitude_m);
                None
            }
        };

        Ok(Reading { timestamp, altitude_m, vario })
    }

    /// Forget rate history, smoother state and the tick timer
    pub fn reset_rate(&mut self) {
        self.rate.reset();
        self.smoother.reset();
        self.timer.reset();
    }

    /// True once the sensor was read in the current cycle
    pub fn is_cycle_fetched(&self) -> bool {
        self.gate.is_fetched()
    }

    /// Rate accumulator state
    pub fn rate_estimator(&self) -> &RateEstimator {
        &self.rate
    }

    /// Smoother state
    pub fn smoother(&self) -> &KalmanSmoother {
        &self.smoother
    }

    /// Active configuration
    pub fn config(&self) -> &VarioConfig {
        &self.config
    }

    /// Borrow the adapter
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Borrow the adapter mutably, e.g. to feed a simulation
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Give the adapter back
    pub fn release(self) -> S {
        self.sensor
    }

    fn ensure_sample_fetched(&mut self) -> VarioResult<CycleSample> {
        self.gate.fetch(&mut self.sensor, self.reference.hpa())
    }

    fn apply_reference(&mut self, hpa: f32, kind: ReferenceKind) -> VarioResult<()> {
        self.reference.set(hpa, kind)?;
        self.gate.rebase(hpa)?;
        vario_debug!("reference set to {} hPa ({:?})", hpa, kind);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{KalmanConfig, RetryPolicy, SensorConfig},
        errors::VarioError,
        sensor::ScriptedSensor,
        time::FixedTime,
    };

    type Sensor = ScriptedSensor<32>;

    fn vario_with(samples: &[(f32, f32)]) -> Variometer<Sensor> {
        let mut sensor = Sensor::new();
        for &(t, p) in samples {
            sensor.push_sample(t, p).unwrap();
        }
        Variometer::new(sensor)
    }

    #[test]
    fn initialize_configures_sensor() {
        let mut vario = vario_with(&[]);
        vario.initialize().unwrap();
        assert_eq!(vario.sensor().configure_calls(), 1);
        assert_eq!(vario.sensor().applied_config(), Some(&SensorConfig::default()));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = VarioConfig::default()
            .with_kalman(KalmanConfig::default().with_measurement_variance(0.0));
        assert!(Variometer::with_config(Sensor::new(), config).is_err());

        let config = VarioConfig::default().with_reference(1500.0);
        assert!(matches!(
            Variometer::with_config(Sensor::new(), config),
            Err(VarioError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn altitude_stable_within_cycle() {
        let mut vario = vario_with(&[(10.0, 900.0), (10.0, 850.0)]);
        let meters = vario.altitude(AltitudeUnit::Meters).unwrap();
        assert!(meters > 0.0);
        assert_eq!(vario.altitude(AltitudeUnit::Meters).unwrap(), meters);
        assert_eq!(vario.altitude(AltitudeUnit::Feet).unwrap(), meters * 3.28);
        assert_eq!(vario.sensor().samples_read(), 1);
    }

    #[test]
    fn qnh_from_known_altitude() {
        let mut vario = vario_with(&[(15.0, 1013.25)]);
        let qnh = vario.derive_reference_from_altitude(0.0).unwrap();
        assert!((qnh - 1013.25).abs() < 0.01);
        assert_eq!(vario.reference_kind(), ReferenceKind::Qnh);
        assert_eq!(vario.reference(), qnh);
    }

    #[test]
    fn ground_level_zeroes_altitude() {
        let mut vario = vario_with(&[(20.0, 955.0)]);
        assert_eq!(vario.set_reference_to_ground_level(), Ok(955.0));
        assert_eq!(vario.reference_kind(), ReferenceKind::Qfe);
        assert!(vario.altitude(AltitudeUnit::Meters).unwrap().abs() < 1e-3);
    }

    #[test]
    fn ground_level_uses_bounded_retry() {
        let config = VarioConfig::default().with_retry(RetryPolicy::attempts(3));
        let mut vario = Variometer::with_config(Sensor::new(), config).unwrap();
        assert_eq!(
            vario.set_reference_to_ground_level(),
            Err(VarioError::SensorNotReady { attempts: 3 })
        );
        assert_eq!(vario.reference(), 1013.25);
        assert_eq!(vario.sensor().polls(), 3);

        vario.sensor_mut().push_not_ready(2).unwrap();
        vario.sensor_mut().push_sample(18.0, 960.0).unwrap();
        assert_eq!(vario.set_reference_to_ground_level(), Ok(960.0));
    }

    #[test]
    fn reference_change_causes_no_spike() {
        let mut vario = vario_with(&[(10.0, 900.0), (10.0, 900.0)]);
        vario.rate(0, 100, 10).unwrap();
        vario.end_cycle();

        vario.set_reference(1020.0).unwrap();
        let rate = vario.rate(100, 200, 10).unwrap();
        assert!(rate.abs() < 1e-3, "rate {rate}");
    }

    #[test]
    fn invalid_reference_keeps_previous() {
        let mut vario = vario_with(&[]);
        assert!(vario.set_reference(f32::NAN).is_err());
        assert_eq!(vario.reference(), 1013.25);
        assert_eq!(vario.reference_kind(), ReferenceKind::Standard);
    }

    #[test]
    fn smoothed_rate_untouched_on_error() {
        let mut vario = vario_with(&[(10.0, 900.0)]);
        // first call: zero elapsed time
        assert_eq!(vario.smoothed_rate(100, 100, 25), Err(VarioError::DivisionByZero));
        assert_eq!(vario.smoother(), &KalmanSmoother::default());
    }

    #[test]
    fn tick_reports_climb() {
        let mut samples = [(15.0, 0.0); 20];
        for (i, sample) in samples.iter_mut().enumerate() {
            // ~0.12 hPa per step is roughly 1 m
            sample.1 = 950.0 - i as f32 * 0.12;
        }
        let mut vario = vario_with(&samples);
        let mut clock = FixedTime::new(0);

        let first = vario.tick(&clock, 5).unwrap();
        assert!(first.vario.is_none());
        assert!(!vario.is_cycle_fetched());

        let mut last = None;
        for _ in 1..20 {
            clock.advance(200);
            last = vario.tick(&clock, 5).unwrap().vario;
        }
        let rate = last.unwrap();
        assert!(rate.raw > 4.0 && rate.raw < 6.0, "raw {}", rate.raw);
        assert!(rate.smoothed > 4.0, "smoothed {}", rate.smoothed);
    }

    struct LoopCounter(core::cell::Cell<Timestamp>);

    impl TimeSource for LoopCounter {
        fn now(&self) -> Timestamp {
            let now = self.0.get();
            self.0.set(now + 250);
            now
        }
    }

    #[test]
    fn tick_needs_only_a_timestamp() {
        let mut vario = vario_with(&[(15.0, 950.0), (15.0, 950.0)]);
        let clock = LoopCounter(core::cell::Cell::new(1000));

        assert_eq!(vario.tick(&clock, 4).unwrap().timestamp, 1000);
        let reading = vario.tick(&clock, 4).unwrap();
        assert_eq!(reading.timestamp, 1250);
        assert_eq!(reading.vario.map(|v| v.raw), Some(0.0));
    }

    #[test]
    fn tick_ends_cycle_on_error() {
        let config = VarioConfig::default().with_retry(RetryPolicy::attempts(1));
        let mut sensor = Sensor::new();
        sensor.push_sample(10.0, 5000.0).unwrap();
        sensor.push_sample(10.0, 900.0).unwrap();
        let mut vario = Variometer::with_config(sensor, config).unwrap();
        let clock = FixedTime::new(0);

        assert!(vario.tick(&clock, 10).is_err());
        let reading = vario.tick(&clock, 10).unwrap();
        assert!(reading.altitude(AltitudeUnit::Meters) > 0.0);
        assert_eq!(vario.release().samples_read(), 2);
    }
}
