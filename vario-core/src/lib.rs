//! Barometric altitude and vertical speed estimation
//!
//! Turns noisy pressure/temperature samples from a BMP280-class barometer into
//! altitude and a smoothed climb rate for glider and paraglider variometers.
//! Designed for the control loop of a small instrument.
//!
//! Key constraints:
//! - `no_std`, no heap allocation anywhere
//! - At most one sensor read per control-loop cycle
//! - Bounded retries, a dead sensor never hangs the loop
//!
//! ```rust
//! use vario_core::{poll_fn, AltitudeUnit, FixedTime, Sample, Variometer};
//!
//! // Simulated climb: pressure drops ~1 m worth every cycle
//! let mut pressure = 950.0;
//! let sensor = poll_fn(move || {
//!     pressure -= 0.11;
//!     Ok(Sample::new(15.0, pressure))
//! });
//!
//! let mut vario = Variometer::new(sensor);
//! vario.initialize()?;
//! vario.set_reference(1013.25)?;
//!
//! let mut clock = FixedTime::new(0);
//! for _ in 0..10 {
//!     let reading = vario.tick(&clock, 10)?;
//!     if let Some(rate) = reading.vario {
//!         assert!(rate.raw > 3.0);
//!     }
//!     assert!(reading.altitude(AltitudeUnit::Feet) > 0.0);
//!     clock.advance(200);
//! }
//! # Ok::<(), vario_core::VarioError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

// Logging compiles to nothing unless the `log` feature is enabled. The
// disabled form still type-checks its arguments so they count as used.
#[cfg(feature = "log")]
macro_rules! vario_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! vario_trace {
    ($($arg:tt)*) => {{
        if false {
            let _ = core::format_args!($($arg)*);
        }
    }};
}

#[cfg(feature = "log")]
macro_rules! vario_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! vario_debug {
    ($($arg:tt)*) => {{
        if false {
            let _ = core::format_args!($($arg)*);
        }
    }};
}

#[cfg(feature = "log")]
macro_rules! vario_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! vario_warn {
    ($($arg:tt)*) => {{
        if false {
            let _ = core::format_args!($($arg)*);
        }
    }};
}

pub mod altitude;
pub mod config;
pub mod constants;
pub mod cycle;
pub mod errors;
pub mod kalman;
pub mod rate;
pub mod reference;
pub mod sensor;
pub mod time;
pub mod validators;
pub mod variometer;

// Public API
pub use altitude::{convert, AltitudeUnit};
pub use config::{KalmanConfig, RetryPolicy, SensorConfig, VarioConfig};
pub use errors::{VarioError, VarioResult};
pub use reference::ReferenceKind;
pub use sensor::{poll_fn, Sample, SensorAdapter};
pub use time::{FixedTime, TimeSource, Timestamp};
pub use variometer::{Reading, VarioRate, Variometer};

#[cfg(feature = "std")]
pub use time::MonotonicTime;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
