//! Barometric Sensor Adapter Interface
//!
//! The core never talks to a bus. It consumes samples through
//! [`SensorAdapter`], which a board crate implements on top of its BMP280 (or
//! compatible) driver. The trait follows the pull-based `nb` model:
//!
//! - `Ok(sample)`: a fresh conversion is available
//! - `Err(nb::Error::WouldBlock)`: conversion still running, poll again
//! - `Err(nb::Error::Other(e))`: the adapter failed; propagated unchanged
//!
//! ## Implementing an Adapter
//!
//! ```rust
//! use vario_core::config::SensorConfig;
//! use vario_core::sensor::{Sample, SensorAdapter};
//! use vario_core::{VarioError, VarioResult};
//!
//! struct Board {
//!     ready: bool,
//! }
//!
//! impl SensorAdapter for Board {
//!     fn configure(&mut self, config: &SensorConfig) -> VarioResult<()> {
//!         // write oversampling / filter / standby registers here
//!         let _ = config.output_rate_hz();
//!         Ok(())
//!     }
//!
//!     fn try_read_sample(&mut self) -> nb::Result<Sample, VarioError> {
//!         if !self.ready {
//!             return Err(nb::Error::WouldBlock);
//!         }
//!         Ok(Sample::new(21.5, 1002.3))
//!     }
//! }
//!
//! let mut board = Board { ready: true };
//! assert!(board.try_read_sample().is_ok());
//! ```
//!
//! For tests and host simulation, [`ScriptedSensor`] replays a queue of
//! results and [`PollFn`] wraps a closure.

mod scripted;

pub use scripted::{ScriptStep, ScriptedSensor};

use crate::{
    config::{RetryPolicy, SensorConfig},
    errors::{VarioError, VarioResult},
};

/// One temperature/pressure conversion from the barometer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Temperature in °C
    pub temperature_c: f32,
    /// Pressure in hPa
    pub pressure_hpa: f32,
}

impl Sample {
    /// Build a sample from temperature (°C) and pressure (hPa)
    pub const fn new(temperature_c: f32, pressure_hpa: f32) -> Self {
        Self { temperature_c, pressure_hpa }
    }
}

/// Capability set the core needs from a barometer driver
pub trait SensorAdapter {
    /// Apply chip-level sampling settings; called once by `Variometer::initialize`
    fn configure(&mut self, config: &SensorConfig) -> VarioResult<()>;

    /// Non-blocking poll for the next conversion
    ///
    /// Must not block. The caller owns the retry cadence.
    fn try_read_sample(&mut self) -> nb::Result<Sample, VarioError>;
}

impl<S: SensorAdapter + ?Sized> SensorAdapter for &mut S {
    fn configure(&mut self, config: &SensorConfig) -> VarioResult<()> {
        (**self).configure(config)
    }

    fn try_read_sample(&mut self) -> nb::Result<Sample, VarioError> {
        (**self).try_read_sample()
    }
}

/// Adapter backed by a closure, for simulations and quick tests
///
/// `configure` is a no-op.
pub struct PollFn<F> {
    poll: F,
}

/// Wrap a polling closure as a [`SensorAdapter`]
pub fn poll_fn<F>(poll: F) -> PollFn<F>
where
    F: FnMut() -> nb::Result<Sample, VarioError>,
{
    PollFn { poll }
}

impl<F> SensorAdapter for PollFn<F>
where
    F: FnMut() -> nb::Result<Sample, VarioError>,
{
    fn configure(&mut self, _config: &SensorConfig) -> VarioResult<()> {
        Ok(())
    }

    fn try_read_sample(&mut self) -> nb::Result<Sample, VarioError> {
        (self.poll)()
    }
}

/// Busy-poll the adapter until it yields a sample or the budget runs out
///
/// Adapter errors end the loop immediately. Exhausting the budget returns
/// `SensorNotReady`, never a stale or zeroed sample.
pub fn read_with_retry<S>(sensor: &mut S, policy: &RetryPolicy) -> VarioResult<Sample>
where
    S: SensorAdapter + ?Sized,
{
    for attempt in 1..=policy.max_attempts {
        match sensor.try_read_sample() {
            Ok(sample) => {
                vario_trace!("sample ready after {} polls: {:?}", attempt, sample);
                return Ok(sample);
            }
            Err(nb::Error::WouldBlock) => continue,
            Err(nb::Error::Other(e)) => return Err(e),
        }
    }

    vario_warn!("sensor not ready after {} polls", policy.max_attempts);
    Err(VarioError::SensorNotReady { attempts: policy.max_attempts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_returns_first_sample() {
        let mut polls = 0;
        let mut sensor = poll_fn(|| {
            polls += 1;
            if polls < 3 {
                Err(nb::Error::WouldBlock)
            } else {
                Ok(Sample::new(15.0, 1013.25))
            }
        });

        let sample = read_with_retry(&mut sensor, &RetryPolicy::attempts(5)).unwrap();
        assert_eq!(sample, Sample::new(15.0, 1013.25));
        drop(sensor);
        assert_eq!(polls, 3);
    }

    #[test]
    fn retry_budget_exhausted() {
        let mut sensor = poll_fn(|| Err(nb::Error::WouldBlock));
        let result = read_with_retry(&mut sensor, &RetryPolicy::attempts(4));
        assert_eq!(result, Err(VarioError::SensorNotReady { attempts: 4 }));
    }

    #[test]
    fn adapter_fault_not_retried() {
        let mut polls = 0;
        let mut sensor = poll_fn(|| {
            polls += 1;
            Err(nb::Error::Other(VarioError::SensorFault { reason: "bus nack" }))
        });

        let result = read_with_retry(&mut sensor, &RetryPolicy::attempts(10));
        assert_eq!(result, Err(VarioError::SensorFault { reason: "bus nack" }));
        drop(sensor);
        assert_eq!(polls, 1);
    }

    fn configure_and_read<S: SensorAdapter>(mut sensor: S) -> VarioResult<Sample> {
        sensor.configure(&SensorConfig::default())?;
        read_with_retry(&mut sensor, &RetryPolicy::attempts(1))
    }

    #[test]
    fn mutable_reference_is_an_adapter() {
        let mut sensor = poll_fn(|| Ok(Sample::new(10.0, 900.0)));
        assert_eq!(configure_and_read(&mut sensor), Ok(Sample::new(10.0, 900.0)));
        assert_eq!(configure_and_read(&mut sensor), Ok(Sample::new(10.0, 900.0)));
    }
}
