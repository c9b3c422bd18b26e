//! Barometer Specifications and Limits
//!
//! Operating limits of BMP280-class MEMS barometers and the polling defaults
//! of the core. Samples outside these limits are rejected rather than turned
//! into altitude.

// ===== PRESSURE SENSOR SPECIFICATIONS =====

/// Minimum measurable pressure (hPa).
///
/// Roughly 9000 m above sea level, well above any paraglider flight.
///
/// Source: Bosch BMP280 datasheet, operating range
pub const PRESSURE_SENSOR_MIN_HPA: f32 = 300.0;

/// Maximum measurable pressure (hPa).
///
/// Source: Bosch BMP280 datasheet, operating range
pub const PRESSURE_SENSOR_MAX_HPA: f32 = 1100.0;

/// Minimum operating temperature (°C).
///
/// Source: Bosch BMP280 datasheet
pub const TEMP_SENSOR_MIN_C: f32 = -40.0;

/// Maximum operating temperature (°C).
///
/// Source: Bosch BMP280 datasheet
pub const TEMP_SENSOR_MAX_C: f32 = 85.0;

// ===== BUS ADDRESSES =====

/// Primary I2C address (SDO pulled high).
pub const I2C_ADDRESS_PRIMARY: u8 = 0x77;

/// Alternate I2C address (SDO pulled low), the default on most vario boards.
pub const I2C_ADDRESS_ALTERNATE: u8 = 0x76;

// ===== POLLING =====

/// Default number of polls before a read gives up with `SensorNotReady`.
///
/// In normal mode with 62.5 ms standby a fresh conversion is available at
/// least every ~100 ms; the budget covers that at typical loop speeds
/// without hanging forever on a dead sensor.
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 1000;
