//! Pressure to Altitude Conversion
//!
//! Pure functions, no state. The variometer calls them with the current
//! reference pressure every time a fresh sample arrives.
//!
//! ## Formulas
//!
//! ```text
//! altitude  h   = ((P₀ / P)^0.190223 - 1) · (T + 273.15) / 0.0065
//! reference P₀  = (h · 0.0065 / (T + 273.15) + 1)^5.26 · P
//! ```
//!
//! `T` is the temperature measured by the barometer itself, so the altitude
//! follows the actual air column instead of the ISA 15 °C assumption.
//! [`standard_altitude`] gives the ISA variant for flight-level style output.
//!
//! ## Units
//!
//! Altitude is computed in meters. [`AltitudeUnit`] selects the display unit:
//!
//! ```rust
//! use vario_core::altitude::{convert, AltitudeUnit};
//!
//! let unit: AltitudeUnit = "ft".parse().unwrap();
//! assert_eq!(convert(100.0, unit), 328.0);
//! assert!(AltitudeUnit::try_from('x').is_err());
//! ```

use core::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::physics::{
        ABSOLUTE_ZERO_CELSIUS, CELSIUS_TO_KELVIN, FEET_PER_METER, HYPSOMETRIC_EXPONENT,
        ISA_EXPONENT, SEA_LEVEL_EXPONENT, SEA_LEVEL_TEMPERATURE_K, TEMPERATURE_LAPSE_RATE_K_PER_M,
    },
    errors::{VarioError, VarioResult},
};

/// Display unit for altitude values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AltitudeUnit {
    /// Meters
    #[default]
    Meters,
    /// Feet
    Feet,
}

impl AltitudeUnit {
    /// Short symbol as shown on a display
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Feet => "ft",
        }
    }

    /// Convert a value in meters into this unit
    pub fn convert(self, meters: f32) -> f32 {
        match self {
            Self::Meters => meters,
            Self::Feet => meters * FEET_PER_METER,
        }
    }
}

impl TryFrom<char> for AltitudeUnit {
    type Error = VarioError;

    fn try_from(symbol: char) -> VarioResult<Self> {
        match symbol {
            'm' | 'M' => Ok(Self::Meters),
            'f' | 'F' => Ok(Self::Feet),
            _ => Err(VarioError::InvalidArgument { reason: "unknown altitude unit" }),
        }
    }
}

impl FromStr for AltitudeUnit {
    type Err = VarioError;

    fn from_str(s: &str) -> VarioResult<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("m") {
            Ok(Self::Meters)
        } else if s.eq_ignore_ascii_case("ft") || s.eq_ignore_ascii_case("f") {
            Ok(Self::Feet)
        } else {
            Err(VarioError::InvalidArgument { reason: "unknown altitude unit" })
        }
    }
}

impl fmt::Display for AltitudeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AltitudeUnit {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.symbol())
    }
}

/// Convert an altitude in meters to `unit`
pub fn convert(altitude_m: f32, unit: AltitudeUnit) -> f32 {
    unit.convert(altitude_m)
}

fn check_pressure(pressure_hpa: f32) -> VarioResult<()> {
    if pressure_hpa.is_finite() && pressure_hpa > 0.0 {
        Ok(())
    } else {
        Err(VarioError::InvalidValue)
    }
}

fn air_temperature_k(temperature_c: f32) -> VarioResult<f32> {
    if !temperature_c.is_finite() || temperature_c <= ABSOLUTE_ZERO_CELSIUS {
        return Err(VarioError::InvalidValue);
    }
    Ok(temperature_c + CELSIUS_TO_KELVIN)
}

/// Altitude (m) above the level where pressure equals `reference_hpa`
///
/// Hypsometric formula using the measured air temperature. Positive when
/// `pressure_hpa` is below the reference.
///
/// # Errors
///
/// `InvalidValue` for non-positive or non-finite pressures and for
/// temperatures at or below absolute zero.
pub fn altitude_from_pressure(
    pressure_hpa: f32,
    temperature_c: f32,
    reference_hpa: f32,
) -> VarioResult<f32> {
    check_pressure(pressure_hpa)?;
    check_pressure(reference_hpa)?;
    let temperature_k = air_temperature_k(temperature_c)?;

    let ratio = reference_hpa / pressure_hpa;
    Ok((libm::powf(ratio, HYPSOMETRIC_EXPONENT) - 1.0) * temperature_k
        / TEMPERATURE_LAPSE_RATE_K_PER_M)
}

/// Reference pressure (hPa) that makes `pressure_hpa` read as `altitude_m`
///
/// Back-solve used to set QNH from a known field elevation.
pub fn reference_from_altitude(
    altitude_m: f32,
    temperature_c: f32,
    pressure_hpa: f32,
) -> VarioResult<f32> {
    if !altitude_m.is_finite() {
        return Err(VarioError::InvalidValue);
    }
    check_pressure(pressure_hpa)?;
    let temperature_k = air_temperature_k(temperature_c)?;

    let base = altitude_m * TEMPERATURE_LAPSE_RATE_K_PER_M / temperature_k + 1.0;
    if base <= 0.0 {
        // Altitude so far below the reference level the formula has no root
        return Err(VarioError::InvalidValue);
    }
    Ok(libm::powf(base, SEA_LEVEL_EXPONENT) * pressure_hpa)
}

/// ISA pressure altitude (m), ignoring the measured temperature
///
/// ```text
/// h = (T₀/L) × [1 - (P/P₀)^(R×L/g×M)]
/// ```
///
/// T₀ = 288.15 K and L = 0.0065 K/m. Accurate to a few tens of meters below
/// 6000 m in a standard atmosphere; not valid above the troposphere.
pub fn standard_altitude(pressure_hpa: f32, reference_hpa: f32) -> VarioResult<f32> {
    check_pressure(pressure_hpa)?;
    check_pressure(reference_hpa)?;

    let ratio = pressure_hpa / reference_hpa;
    Ok(SEA_LEVEL_TEMPERATURE_K / TEMPERATURE_LAPSE_RATE_K_PER_M
        * (1.0 - libm::powf(ratio, ISA_EXPONENT)))
}
