//! Reference Pressure State
//!
//! Altitude is always relative to a reference pressure:
//!
//! - **Standard**: 1013.25 hPa, the ISA sea level pressure (start-up default)
//! - **QNH**: pressure reduced to sea level, set by the pilot or back-solved
//!   from a known elevation; altitude reads above mean sea level
//! - **QFE**: pressure measured at the take-off site; altitude reads above
//!   ground
//!
//! The value lives for the session only and is never persisted.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        physics::SEA_LEVEL_PRESSURE_HPA,
        sensors::{PRESSURE_SENSOR_MAX_HPA, PRESSURE_SENSOR_MIN_HPA},
    },
    errors::{VarioError, VarioResult},
};

/// How the current reference pressure was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReferenceKind {
    /// ISA standard pressure
    Standard,
    /// Sea level pressure
    Qnh,
    /// Ground level pressure
    Qfe,
}

/// Reject references the sensor could never measure
pub fn check_reference(hpa: f32) -> VarioResult<()> {
    if !hpa.is_finite() {
        return Err(VarioError::InvalidArgument { reason: "reference pressure is not finite" });
    }
    if !(PRESSURE_SENSOR_MIN_HPA..=PRESSURE_SENSOR_MAX_HPA).contains(&hpa) {
        return Err(VarioError::InvalidArgument {
            reason: "reference pressure outside 300-1100 hPa",
        });
    }
    Ok(())
}

/// Current reference pressure and its origin
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferencePressure {
    hpa: f32,
    kind: ReferenceKind,
}

impl Default for ReferencePressure {
    fn default() -> Self {
        Self::standard()
    }
}

impl ReferencePressure {
    /// ISA standard pressure
    pub const fn standard() -> Self {
        Self { hpa: SEA_LEVEL_PRESSURE_HPA, kind: ReferenceKind::Standard }
    }

    /// Checked constructor
    pub fn new(hpa: f32, kind: ReferenceKind) -> VarioResult<Self> {
        check_reference(hpa)?;
        Ok(Self { hpa, kind })
    }

    /// Reference used at start-up: standard pressure unless configured otherwise
    pub fn initial(hpa: f32) -> VarioResult<Self> {
        if hpa == SEA_LEVEL_PRESSURE_HPA {
            Ok(Self::standard())
        } else {
            Self::new(hpa, ReferenceKind::Qnh)
        }
    }

    /// Pressure in hPa
    pub fn hpa(&self) -> f32 {
        self.hpa
    }

    /// Origin of the value
    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    /// Replace the reference, leaving it untouched on error
    pub fn set(&mut self, hpa: f32, kind: ReferenceKind) -> VarioResult<()> {
        *self = Self::new(hpa, kind)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_standard_pressure() {
        let reference = ReferencePressure::default();
        assert_eq!(reference.hpa(), 1013.25);
        assert_eq!(reference.kind(), ReferenceKind::Standard);
        assert_eq!(ReferencePressure::initial(1013.25), Ok(reference));
        assert_eq!(ReferencePressure::initial(1020.0).map(|r| r.kind()), Ok(ReferenceKind::Qnh));
    }

    #[test]
    fn rejected_value_keeps_previous() {
        let mut reference = ReferencePressure::default();
        reference.set(1021.0, ReferenceKind::Qnh).unwrap();

        assert!(matches!(
            reference.set(1500.0, ReferenceKind::Qnh),
            Err(VarioError::InvalidArgument { .. })
        ));
        assert!(reference.set(f32::NAN, ReferenceKind::Qfe).is_err());
        assert_eq!(reference.hpa(), 1021.0);
        assert_eq!(reference.kind(), ReferenceKind::Qnh);
    }

    #[test]
    fn limits_are_inclusive() {
        assert!(check_reference(300.0).is_ok());
        assert!(check_reference(1100.0).is_ok());
        assert!(check_reference(299.9).is_err());
    }
}
