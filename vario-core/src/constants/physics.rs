//! Physical Constants for Barometric Altimetry
//!
//! Coefficients of the hypsometric / barometric formulas used to map pressure
//! to altitude and back. All pressures are in hPa, temperatures in °C unless
//! the name says Kelvin.

// ===== REFERENCE ATMOSPHERE =====

/// Standard atmospheric pressure at sea level (hPa).
///
/// Default reference pressure until a QNH or QFE is set.
///
/// Source: International Standard Atmosphere (ISA)
pub const SEA_LEVEL_PRESSURE_HPA: f32 = 1013.25;

/// Standard temperature at sea level (K).
///
/// Used by the temperature-independent ISA pressure altitude.
///
/// Source: International Standard Atmosphere (ISA), 15 °C
pub const SEA_LEVEL_TEMPERATURE_K: f32 = 288.15;

/// Offset between Celsius and Kelvin.
pub const CELSIUS_TO_KELVIN: f32 = 273.15;

/// Absolute zero in Celsius (°C).
///
/// Source: NIST Special Publication 330 (2019)
pub const ABSOLUTE_ZERO_CELSIUS: f32 = -273.15;

/// Tropospheric temperature lapse rate (K/m).
///
/// Temperature drops 6.5 °C per 1000 m up to ~11 km.
///
/// Source: International Standard Atmosphere (ISA)
pub const TEMPERATURE_LAPSE_RATE_K_PER_M: f32 = 0.0065;

// ===== BAROMETRIC FORMULA EXPONENTS =====

/// Exponent R·L / (g·M) of the hypsometric formula (dimensionless).
///
/// `h = ((P₀/P)^0.190223 - 1) · T / L`
///
/// Source: Bosch BMP280 application reference code
pub const HYPSOMETRIC_EXPONENT: f32 = 0.190223;

/// Exponent g·M / (R·L) used when back-solving sea level pressure.
///
/// `P₀ = (h·L / T + 1)^5.26 · P`, the rounded inverse of
/// [`HYPSOMETRIC_EXPONENT`].
pub const SEA_LEVEL_EXPONENT: f32 = 5.26;

// ===== UNIT CONVERSIONS =====

/// Feet per meter as used by vario displays.
///
/// Two-decimal factor: feet output is exactly `meters * 3.28`.
pub const FEET_PER_METER: f32 = 3.28;

/// Exponent R·L / (g·M) of the ISA pressure altitude formula.
///
/// With R = 8.31432 J/(mol·K), g = 9.80665 m/s², M = 0.0289644 kg/mol.
///
/// Source: U.S. Standard Atmosphere 1976
pub const ISA_EXPONENT: f32 = 0.190263;
