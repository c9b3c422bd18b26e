//! Common validation helpers
//!
//! Pure functions shared by the pressure and temperature validators. No side
//! effects, no allocation, invalid input returns an error instead of
//! panicking.

use crate::errors::{VarioError, VarioResult};

/// Check if a value is within the specified range
pub fn check_range(value: f32, min: f32, max: f32) -> VarioResult<()> {
    if value < min || value > max {
        Err(VarioError::OutOfRange { value, min, max })
    } else {
        Ok(())
    }
}

/// Reject NaN and infinities
pub fn check_finite(value: f32) -> VarioResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(VarioError::InvalidValue)
    }
}
