//! Constants for the Variometer Core
//!
//! All numeric values used by the altitude, rate and sensor code live here,
//! each with its unit and source. Grouped by domain:
//! - **Physics**: barometric formula coefficients and unit factors
//! - **Sensors**: operating limits and defaults of BMP280-class barometers
//! - **Time**: time unit conversions and rate-window parameters
//!
//! Use descriptive names that include units, and prefer these constants over
//! magic numbers in the algorithms.

/// Physical constants for barometric altitude computation.
pub mod physics;

/// Barometer specifications, operating limits and polling defaults.
pub mod sensors;

/// Time-related constants for the rate estimator.
pub mod time;

// Re-export commonly used constants for convenience
pub use physics::{
    SEA_LEVEL_PRESSURE_HPA, CELSIUS_TO_KELVIN, TEMPERATURE_LAPSE_RATE_K_PER_M,
    FEET_PER_METER,
};

pub use sensors::{
    PRESSURE_SENSOR_MIN_HPA, PRESSURE_SENSOR_MAX_HPA,
    TEMP_SENSOR_MIN_C, TEMP_SENSOR_MAX_C,
    DEFAULT_MAX_POLL_ATTEMPTS,
};

pub use time::{MS_PER_SECOND, RATE_WINDOW_DIVISOR};
