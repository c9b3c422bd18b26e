//! Scripted sensor for tests and host simulation
//!
//! Replays a fixed-capacity queue of poll results. Once the queue is empty
//! every poll reports `WouldBlock`, which is how tests exercise the retry
//! budget. Counters record how often the core actually touched the sensor.

use heapless::Deque;

use super::{Sample, SensorAdapter};
use crate::{
    config::SensorConfig,
    errors::{VarioError, VarioResult},
};

/// One scripted poll result
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptStep {
    /// Conversion ready
    Ready(Sample),
    /// Conversion still running
    NotReady,
    /// Adapter failure
    Fault(VarioError),
}

/// Sensor adapter replaying up to `N` scripted poll results
#[derive(Debug)]
pub struct ScriptedSensor<const N: usize> {
    script: Deque<ScriptStep, N>,
    config: Option<SensorConfig>,
    configure_calls: u32,
    polls: u32,
    samples_read: u32,
}

impl<const N: usize> Default for ScriptedSensor<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ScriptedSensor<N> {
    /// Sensor with an empty script
    pub fn new() -> Self {
        Self {
            script: Deque::new(),
            config: None,
            configure_calls: 0,
            polls: 0,
            samples_read: 0,
        }
    }

    /// Append a step; fails when the script is full
    pub fn push(&mut self, step: ScriptStep) -> VarioResult<()> {
        self.script.push_back(step).map_err(|_| VarioError::InvalidArgument {
            reason: "sensor script is full",
        })
    }

    /// Append a ready sample
    pub fn push_sample(&mut self, temperature_c: f32, pressure_hpa: f32) -> VarioResult<()> {
        self.push(ScriptStep::Ready(Sample::new(temperature_c, pressure_hpa)))
    }

    /// Append `count` not-ready polls
    pub fn push_not_ready(&mut self, count: usize) -> VarioResult<()> {
        for _ in 0..count {
            self.push(ScriptStep::NotReady)?;
        }
        Ok(())
    }

    /// Builder form of [`push_sample`](Self::push_sample)
    pub fn with_sample(mut self, temperature_c: f32, pressure_hpa: f32) -> VarioResult<Self> {
        self.push_sample(temperature_c, pressure_hpa)?;
        Ok(self)
    }

    /// Steps not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Total `try_read_sample` calls
    pub fn polls(&self) -> u32 {
        self.polls
    }

    /// Polls that returned a sample
    pub fn samples_read(&self) -> u32 {
        self.samples_read
    }

    /// Number of `configure` calls
    pub fn configure_calls(&self) -> u32 {
        self.configure_calls
    }

    /// Settings from the last `configure` call
    pub fn applied_config(&self) -> Option<&SensorConfig> {
        self.config.as_ref()
    }
}

impl<const N: usize> SensorAdapter for ScriptedSensor<N> {
    fn configure(&mut self, config: &SensorConfig) -> VarioResult<()> {
        self.configure_calls += 1;
        self.config = Some(*config);
        Ok(())
    }

    fn try_read_sample(&mut self) -> nb::Result<Sample, VarioError> {
        self.polls += 1;
        match self.script.pop_front() {
            Some(ScriptStep::Ready(sample)) => {
                self.samples_read += 1;
                Ok(sample)
            }
            Some(ScriptStep::Fault(e)) => Err(nb::Error::Other(e)),
            Some(ScriptStep::NotReady) | None => Err(nb::Error::WouldBlock),
        }
    }
}
