//! Temperature validator for the barometer's internal thermometer
//!
//! The temperature enters the hypsometric formula directly, so a garbage
//! reading skews altitude as badly as a bad pressure. Limits default to the
//! sensor's operating range.

use crate::{
    constants::{
        physics::ABSOLUTE_ZERO_CELSIUS,
        sensors::{TEMP_SENSOR_MAX_C, TEMP_SENSOR_MIN_C},
    },
    errors::VarioResult,
};

use super::{utils, Validator};

/// Temperature validator for Celsius readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureValidator {
    /// Minimum valid temperature in Celsius
    min_celsius: f32,

    /// Maximum valid temperature in Celsius
    max_celsius: f32,
}

impl Default for TemperatureValidator {
    fn default() -> Self {
        Self {
            min_celsius: TEMP_SENSOR_MIN_C,
            max_celsius: TEMP_SENSOR_MAX_C,
        }
    }
}

impl TemperatureValidator {
    /// Create validator with custom limits
    pub fn new_with_limits(min: f32, max: f32) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };

        Self {
            min_celsius: min.max(ABSOLUTE_ZERO_CELSIUS),
            max_celsius: max,
        }
    }

    /// Accepted range as `(min, max)`
    pub fn limits(&self) -> (f32, f32) {
        (self.min_celsius, self.max_celsius)
    }
}

impl Validator for TemperatureValidator {
    type Value = f32;

    fn validate(&self, value: f32) -> VarioResult<()> {
        utils::check_finite(value)?;
        utils::check_range(value, self.min_celsius, self.max_celsius)
    }
}
