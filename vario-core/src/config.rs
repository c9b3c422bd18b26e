//! Configuration for the Variometer Core
//!
//! ## Overview
//!
//! Everything tunable lives in [`VarioConfig`]:
//!
//! - [`SensorConfig`]: chip-level sampling settings handed to the adapter once
//!   at initialization (oversampling, IIR filter, standby, bus address)
//! - [`KalmanConfig`]: process and measurement variance of the rate smoother
//! - [`RetryPolicy`]: how many times a read polls a not-ready sensor
//! - the initial reference pressure
//!
//! All structs implement `Default` with values suited to a paraglider vario and
//! `with_*` builders. With the `serde` feature they can be loaded from whatever
//! format the host application uses; nothing is persisted by the core.
//!
//! ## Sensor Settings Trade-offs
//!
//! ```text
//! Setting                 Higher value gives             Costs
//! ------------------------------------------------------------------------
//! Pressure oversampling   lower noise (X16: ~1.3 Pa)     conversion time
//! Temperature oversampl.  lower temperature noise        conversion time
//! IIR filter coefficient  smoother pressure              step response lag
//! Standby time            lower power                    output data rate
//! ```
//!
//! The defaults (pressure X16, temperature X2, IIR 16, 62.5 ms standby) give
//! one conversion every 100 ms, a good match for a 10-20 Hz loop.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        physics::SEA_LEVEL_PRESSURE_HPA,
        sensors::{DEFAULT_MAX_POLL_ATTEMPTS, I2C_ADDRESS_ALTERNATE, I2C_ADDRESS_PRIMARY},
    },
    errors::{VarioError, VarioResult},
    reference::check_reference,
};

/// Oversampling multiplier applied on-chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Oversampling {
    /// Measurement disabled
    Skipped,
    /// Single sample
    X1,
    /// 2 samples averaged
    X2,
    /// 4 samples averaged
    X4,
    /// 8 samples averaged
    X8,
    /// 16 samples averaged
    X16,
}

impl Oversampling {
    /// Number of internal samples per reported sample
    pub fn factor(self) -> u8 {
        match self {
            Self::Skipped => 0,
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
            Self::X16 => 16,
        }
    }
}

/// Strength of the on-chip IIR filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IirFilter {
    /// Filter disabled
    Off,
    /// Coefficient 2
    X2,
    /// Coefficient 4
    X4,
    /// Coefficient 8
    X8,
    /// Coefficient 16
    X16,
}

impl IirFilter {
    /// Filter coefficient, 0 when off
    pub fn coefficient(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
            Self::X16 => 16,
        }
    }
}

/// Idle time between conversions in normal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StandbyTime {
    /// 0.5 ms
    Ms0_5,
    /// 62.5 ms
    Ms62_5,
    /// 125 ms
    Ms125,
    /// 250 ms
    Ms250,
    /// 500 ms
    Ms500,
    /// 1 s
    Ms1000,
    /// 2 s
    Ms2000,
    /// 4 s
    Ms4000,
}

impl StandbyTime {
    /// Standby duration in milliseconds
    pub fn as_ms(self) -> f32 {
        match self {
            Self::Ms0_5 => 0.5,
            Self::Ms62_5 => 62.5,
            Self::Ms125 => 125.0,
            Self::Ms250 => 250.0,
            Self::Ms500 => 500.0,
            Self::Ms1000 => 1000.0,
            Self::Ms2000 => 2000.0,
            Self::Ms4000 => 4000.0,
        }
    }
}

/// Chip-level sampling configuration applied once by `SensorAdapter::configure`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// Pressure oversampling
    pub pressure_oversampling: Oversampling,
    /// Temperature oversampling
    pub temperature_oversampling: Oversampling,
    /// On-chip IIR filter strength
    pub iir_filter: IirFilter,
    /// Standby between conversions
    pub standby: StandbyTime,
    /// I2C bus address
    pub address: u8,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            pressure_oversampling: Oversampling::X16,
            temperature_oversampling: Oversampling::X2,
            iir_filter: IirFilter::X16,
            standby: StandbyTime::Ms62_5,
            address: I2C_ADDRESS_ALTERNATE,
        }
    }
}

impl SensorConfig {
    /// Set pressure oversampling
    pub fn with_pressure_oversampling(mut self, oversampling: Oversampling) -> Self {
        self.pressure_oversampling = oversampling;
        self
    }

    /// Set temperature oversampling
    pub fn with_temperature_oversampling(mut self, oversampling: Oversampling) -> Self {
        self.temperature_oversampling = oversampling;
        self
    }

    /// Set IIR filter strength
    pub fn with_iir_filter(mut self, filter: IirFilter) -> Self {
        self.iir_filter = filter;
        self
    }

    /// Set standby time
    pub fn with_standby(mut self, standby: StandbyTime) -> Self {
        self.standby = standby;
        self
    }

    /// Set bus address
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Check the settings can be applied to the chip
    pub fn validate(&self) -> VarioResult<()> {
        if self.pressure_oversampling == Oversampling::Skipped {
            return Err(VarioError::InvalidArgument {
                reason: "pressure measurement cannot be skipped",
            });
        }
        if self.address != I2C_ADDRESS_ALTERNATE && self.address != I2C_ADDRESS_PRIMARY {
            return Err(VarioError::InvalidArgument {
                reason: "sensor address must be 0x76 or 0x77",
            });
        }
        Ok(())
    }

    /// Typical conversion time in milliseconds
    ///
    /// Datasheet formula: `1 + 2·osrs_t + (2·osrs_p + 0.5)`, the pressure term
    /// only applying when pressure is measured.
    pub fn measurement_time_ms(&self) -> f32 {
        let temperature = 2.0 * self.temperature_oversampling.factor() as f32;
        let pressure = match self.pressure_oversampling {
            Oversampling::Skipped => 0.0,
            p => 2.0 * p.factor() as f32 + 0.5,
        };
        1.0 + temperature + pressure
    }

    /// Time between two fresh samples in normal mode
    pub fn output_period_ms(&self) -> f32 {
        self.measurement_time_ms() + self.standby.as_ms()
    }

    /// Fresh samples per second in normal mode
    pub fn output_rate_hz(&self) -> f32 {
        1000.0 / self.output_period_ms()
    }
}

/// Tuning of the scalar Kalman rate smoother
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KalmanConfig {
    /// Process noise magnitude (how fast the true rate may wander)
    pub process_variance: f32,
    /// Sensor noise magnitude (how much a single rate estimate is trusted)
    pub measurement_variance: f32,
}

impl Default for KalmanConfig {
    fn default() -> Self {
        Self {
            process_variance: 4e-5,
            measurement_variance: 1e-4,
        }
    }
}

impl KalmanConfig {
    /// Set process variance (higher = follows changes faster, less smoothing)
    pub fn with_process_variance(mut self, variance: f32) -> Self {
        self.process_variance = variance;
        self
    }

    /// Set measurement variance (higher = smoother, more lag)
    pub fn with_measurement_variance(mut self, variance: f32) -> Self {
        self.measurement_variance = variance;
        self
    }

    /// Check both variances are usable
    pub fn validate(&self) -> VarioResult<()> {
        if !self.process_variance.is_finite() || self.process_variance < 0.0 {
            return Err(VarioError::InvalidArgument {
                reason: "process variance must be finite and non-negative",
            });
        }
        if !self.measurement_variance.is_finite() || self.measurement_variance <= 0.0 {
            return Err(VarioError::InvalidArgument {
                reason: "measurement variance must be finite and positive",
            });
        }
        Ok(())
    }
}

/// How long a read keeps polling a not-ready sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RetryPolicy {
    /// Polls before giving up with `SensorNotReady`
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_MAX_POLL_ATTEMPTS }
    }
}

impl RetryPolicy {
    /// Policy with the given attempt budget
    pub fn attempts(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Check the policy polls at least once
    pub fn validate(&self) -> VarioResult<()> {
        if self.max_attempts == 0 {
            return Err(VarioError::InvalidArgument {
                reason: "retry policy needs at least one attempt",
            });
        }
        Ok(())
    }
}

/// Complete configuration of a variometer instance
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VarioConfig {
    /// Chip-level sampling settings
    pub sensor: SensorConfig,
    /// Rate smoother tuning
    pub kalman: KalmanConfig,
    /// Read retry budget
    pub retry: RetryPolicy,
    /// Reference pressure at start-up (hPa)
    pub reference_hpa: f32,
}

impl Default for VarioConfig {
    fn default() -> Self {
        Self {
            sensor: SensorConfig::default(),
            kalman: KalmanConfig::default(),
            retry: RetryPolicy::default(),
            reference_hpa: SEA_LEVEL_PRESSURE_HPA,
        }
    }
}

impl VarioConfig {
    /// Replace sensor settings
    pub fn with_sensor(mut self, sensor: SensorConfig) -> Self {
        self.sensor = sensor;
        self
    }

    /// Replace Kalman tuning
    pub fn with_kalman(mut self, kalman: KalmanConfig) -> Self {
        self.kalman = kalman;
        self
    }

    /// Replace retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Start from a known QNH instead of standard pressure
    pub fn with_reference(mut self, reference_hpa: f32) -> Self {
        self.reference_hpa = reference_hpa;
        self
    }

    /// Validate every section
    pub fn validate(&self) -> VarioResult<()> {
        self.sensor.validate()?;
        self.kalman.validate()?;
        self.retry.validate()?;
        check_reference(self.reference_hpa)
    }
}
