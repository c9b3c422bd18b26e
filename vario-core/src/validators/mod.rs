//! Sample Plausibility Validators
//!
//! Every fresh sample passes through a [`SampleValidator`] before it is
//! cached for the cycle or turned into altitude. A rejected sample is reported
//! to the caller and never substituted.
//!
//! ```rust
//! use vario_core::sensor::Sample;
//! use vario_core::validators::SampleValidator;
//!
//! let validator = SampleValidator::default();
//! assert!(validator.validate(&Sample::new(15.0, 1013.25)).is_ok());
//! assert!(validator.validate(&Sample::new(15.0, f32::NAN)).is_err());
//! ```

mod pressure;
mod temperature;
mod utils;

pub use pressure::PressureValidator;
pub use temperature::TemperatureValidator;

use crate::{errors::VarioResult, sensor::Sample};

/// Single-value validator
pub trait Validator {
    /// The type of value this validator handles
    type Value;

    /// Validate a single reading
    fn validate(&self, value: Self::Value) -> VarioResult<()>;
}

/// Checks both halves of a barometer sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleValidator {
    pressure: PressureValidator,
    temperature: TemperatureValidator,
}

impl SampleValidator {
    /// Combine custom pressure and temperature validators
    pub fn new(pressure: PressureValidator, temperature: TemperatureValidator) -> Self {
        Self { pressure, temperature }
    }

    /// Replace the pressure limits
    pub fn with_pressure(mut self, pressure: PressureValidator) -> Self {
        self.pressure = pressure;
        self
    }

    /// Replace the temperature limits
    pub fn with_temperature(mut self, temperature: TemperatureValidator) -> Self {
        self.temperature = temperature;
        self
    }

    /// Validate pressure first, then temperature
    pub fn validate(&self, sample: &Sample) -> VarioResult<()> {
        self.pressure.validate(sample.pressure_hpa)?;
        self.temperature.validate(sample.temperature_c)
    }
}
