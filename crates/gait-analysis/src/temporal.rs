//! Temporal components: step, stride, cadence, velocity.

use serde::{Deserialize, Serialize};

use gait_core::{Error, GaitCycle, Result};

/// Temporal gait parameters in pixel and second units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TemporalComponents {
    /// Mean of the per-cycle maximum inter-foot distance (pixels)
    pub step_length: f64,
    /// Two steps (pixels)
    pub stride_length: f64,
    /// Steps per second
    pub cadence: f64,
    /// Pixels per second
    pub velocity: f64,
}

impl TemporalComponents {
    /// Derive stride length and velocity from step length and cadence
    pub fn from_step_and_cadence(step_length: f64, cadence: f64) -> Self {
        let stride_length = 2.0 * step_length;
        Self {
            step_length,
            stride_length,
            cadence,
            velocity: stride_length * 0.5 * cadence,
        }
    }
}

/// Averages step length and cadence over completed cycles
#[derive(Debug, Clone)]
pub struct TemporalAggregator {
    frame_rate: f64,
}

impl TemporalAggregator {
    /// `frame_rate` is the clip's frames per second
    pub fn new(frame_rate: f64) -> Result<Self> {
        if !(frame_rate.is_finite() && frame_rate > 0.0) {
            return Err(Error::InvalidFrameRate(frame_rate));
        }
        Ok(Self { frame_rate })
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Steps per second contributed by one cycle (one step per cycle)
    pub fn cycle_cadence(&self, cycle: &GaitCycle) -> f64 {
        self.frame_rate / cycle.frame_count() as f64
    }

    pub fn aggregate(&self, cycles: &[GaitCycle]) -> Result<TemporalComponents> {
        if cycles.is_empty() {
            return Err(Error::EmptyCycleSet);
        }

        let n = cycles.len() as f64;
        let step_length = cycles.iter().map(GaitCycle::max_stride_distance).sum::<f64>() / n;
        let cadence = cycles.iter().map(|c| self.cycle_cadence(c)).sum::<f64>() / n;

        Ok(TemporalComponents::from_step_and_cadence(step_length, cadence))
    }
}
