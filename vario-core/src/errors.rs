//! Error Types for Altitude and Vertical Speed Estimation
//!
//! ## Design Philosophy
//!
//! The variometer core runs inside a control loop on small targets, so its
//! errors follow the same rules as the rest of the crate:
//!
//! 1. **Small Size**: every variant fits in 24 bytes and the enum is `Copy`.
//! 2. **No Heap Allocation**: messages are `&'static str`, never `String`.
//! 3. **Actionable Information**: each variant tells the control loop what it
//!    can do next (retry the cycle, fix the argument, keep the last value).
//!
//! ## Error Categories
//!
//! ### Sensor Availability
//! - `SensorNotReady`: the adapter never produced a sample within the retry budget
//! - `SensorFault`: the adapter reported a hard failure (bus error, bad chip id)
//!
//! ### Bad Data
//! - `OutOfRange`: a sample or reference pressure outside physical limits
//! - `InvalidValue`: NaN, infinity or a non-physical value (pressure <= 0)
//!
//! ### Caller Mistakes
//! - `InvalidArgument`: unknown unit symbol, invalid configuration
//! - `DivisionByZero`: no elapsed time accumulated yet for a rate estimate
//!
//! ## Handling Strategy
//!
//! ```rust
//! use vario_core::VarioError;
//!
//! fn on_rate(result: Result<f32, VarioError>, last_good: f32) -> f32 {
//!     match result {
//!         Ok(rate) => rate,
//!         // Not enough timing history yet, keep showing the previous value
//!         Err(VarioError::DivisionByZero) => last_good,
//!         // Sensor busy this cycle, the next cycle polls again
//!         Err(VarioError::SensorNotReady { .. }) => last_good,
//!         Err(_) => 0.0,
//!     }
//! }
//!
//! assert_eq!(on_rate(Err(VarioError::DivisionByZero), 1.5), 1.5);
//! ```

use thiserror_no_std::Error;

/// Result type for variometer operations
pub type VarioResult<T> = Result<T, VarioError>;

/// Variometer errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum VarioError {
    /// The sensor did not produce a sample within the retry budget
    #[error("Sensor not ready after {attempts} attempts")]
    SensorNotReady {
        /// Number of polls made before giving up
        attempts: u32,
    },

    /// The sensor adapter reported a hard failure
    #[error("Sensor fault: {reason}")]
    SensorFault {
        /// Adapter supplied description
        reason: &'static str,
    },

    /// Argument or configuration value rejected
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument
        reason: &'static str,
    },

    /// Value outside physical limits
    #[error("Value {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// The offending value
        value: f32,
        /// Lowest accepted value
        min: f32,
        /// Highest accepted value
        max: f32,
    },

    /// Value makes no physical sense (NaN, infinity, non-positive pressure)
    #[error("Invalid value: not a valid number")]
    InvalidValue,

    /// Rate requested before any elapsed time was accumulated
    #[error("Division by zero: no elapsed time accumulated")]
    DivisionByZero,
}

impl VarioError {
    /// True for errors that may clear up on the next control-loop cycle
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::SensorNotReady { .. } | Self::DivisionByZero)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for VarioError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::SensorNotReady { attempts } =>
                defmt::write!(fmt, "Sensor not ready after {} attempts", attempts),
            Self::SensorFault { reason } =>
                defmt::write!(fmt, "Sensor fault: {}", reason),
            Self::InvalidArgument { reason } =>
                defmt::write!(fmt, "Invalid argument: {}", reason),
            Self::OutOfRange { value, min, max } =>
                defmt::write!(fmt, "Value {} outside [{}, {}]", value, min, max),
            Self::InvalidValue =>
                defmt::write!(fmt, "Invalid value"),
            Self::DivisionByZero =>
                defmt::write!(fmt, "Division by zero"),
        }
    }
}
