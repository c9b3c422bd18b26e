//! Atmospheric Pressure Validation
//!
//! ## Why validate samples at all?
//!
//! A vario turns every pressure sample into altitude and then differentiates
//! it. One glitched conversion (a bus bit flip, a half-written register burst)
//! becomes a climb or sink spike of hundreds of m/s, and through the rate
//! accumulator it lingers for a whole window. Rejecting the sample costs one
//! cycle; accepting it costs seconds of nonsense on the display.
//!
//! ## Limits
//!
//! ```text
//! Altitude      Typical pressure
//! ------------------------------
//! Dead Sea      1065 hPa
//! Sea level     1013 hPa
//! 3000 m         700 hPa
//! 9000 m         308 hPa
//! ```
//!
//! The default window is the BMP280 operating range, 300-1100 hPa, which
//! covers anything a glider or paraglider can reach.

use crate::{
    constants::sensors::{PRESSURE_SENSOR_MAX_HPA, PRESSURE_SENSOR_MIN_HPA},
    errors::{VarioError, VarioResult},
};

use super::{utils, Validator};

/// Pressure validator for atmospheric pressure in hPa (hectopascals)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureValidator {
    /// Minimum valid pressure in hPa
    min_hpa: f32,

    /// Maximum valid pressure in hPa
    max_hpa: f32,
}

impl Default for PressureValidator {
    fn default() -> Self {
        Self {
            min_hpa: PRESSURE_SENSOR_MIN_HPA,
            max_hpa: PRESSURE_SENSOR_MAX_HPA,
        }
    }
}

impl PressureValidator {
    /// Create validator with custom limits
    pub fn new_with_limits(min_hpa: f32, max_hpa: f32) -> Self {
        let (min_hpa, max_hpa) = if min_hpa > max_hpa {
            (max_hpa, min_hpa)
        } else {
            (min_hpa, max_hpa)
        };

        Self { min_hpa, max_hpa }
    }

    /// Accepted range as `(min, max)`
    pub fn limits(&self) -> (f32, f32) {
        (self.min_hpa, self.max_hpa)
    }
}

impl Validator for PressureValidator {
    type Value = f32;

    fn validate(&self, value: f32) -> VarioResult<()> {
        utils::check_finite(value)?;

        // Zero or negative pressure is not a reading, whatever the limits say
        if value <= 0.0 {
            return Err(VarioError::InvalidValue);
        }

        utils::check_range(value, self.min_hpa, self.max_hpa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_pressure() {
        let validator = PressureValidator::default();
        assert!(validator.validate(1013.25).is_ok());
        assert!(validator.validate(900.0).is_ok());
        assert!(validator.validate(350.0).is_ok());
    }

    #[test]
    fn pressure_out_of_range() {
        let validator = PressureValidator::default();
        assert!(matches!(validator.validate(250.0), Err(VarioError::OutOfRange { .. })));
        assert!(matches!(validator.validate(1200.0), Err(VarioError::OutOfRange { .. })));
    }

    #[test]
    fn non_physical_pressure() {
        let validator = PressureValidator::new_with_limits(-10.0, 2000.0);
        assert_eq!(validator.validate(0.0), Err(VarioError::InvalidValue));
        assert_eq!(validator.validate(f32::INFINITY), Err(VarioError::InvalidValue));
    }
}
