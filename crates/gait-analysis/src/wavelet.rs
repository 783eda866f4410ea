//! Wavelet (frequency-domain) components.
//!
//! Each frame's approx, horizontal and vertical Haar bands are reduced to a
//! full-matrix sum; a cycle is summarised by the mean and the
//! Bessel-corrected standard deviation of those sums.

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use gait_core::{Error, GaitCycle, Result, WaveletBand};

/// Mean and sample standard deviation of one band over a cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandStatistics {
    pub mean: f64,
    pub std_dev: f64,
}

/// Band statistics for one cycle, in {approx, horiz, vert} order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleWaveletFeatures {
    pub cycle: usize,
    pub bands: [BandStatistics; 3],
}

impl CycleWaveletFeatures {
    pub fn band(&self, band: WaveletBand) -> &BandStatistics {
        &self.bands[band.index()]
    }
}

/// Per-cycle wavelet summaries for a clip
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WaveletComponents {
    pub cycles: Vec<CycleWaveletFeatures>,
    /// Cycles too short for a standard deviation
    pub excluded_cycles: Vec<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WaveletAggregator;

impl WaveletAggregator {
    pub fn new() -> Self {
        Self
    }

    /// `(frames, 3)` matrix of per-frame band sums
    pub fn band_sums(cycle: &GaitCycle) -> Array2<f64> {
        let mut sums = Array2::zeros((cycle.frame_count(), WaveletBand::ALL.len()));
        for (mut row, energy) in sums.axis_iter_mut(Axis(0)).zip(cycle.wavelet_sequence()) {
            for (slot, value) in row.iter_mut().zip(energy.to_array()) {
                *slot = value;
            }
        }
        sums
    }

    pub fn cycle_features(&self, cycle: &GaitCycle) -> Result<CycleWaveletFeatures> {
        let frames = cycle.frame_count();
        if frames < 2 {
            return Err(Error::InsufficientCycle {
                cycle: cycle.index,
                frames,
            });
        }

        let sums = Self::band_sums(cycle);
        let means = sums.sum_axis(Axis(0)) / frames as f64;
        let std_devs = sums.std_axis(Axis(0), 1.0);

        let mut bands = [BandStatistics {
            mean: 0.0,
            std_dev: 0.0,
        }; 3];
        for (i, stats) in bands.iter_mut().enumerate() {
            stats.mean = means[i];
            stats.std_dev = std_devs[i];
        }

        Ok(CycleWaveletFeatures {
            cycle: cycle.index,
            bands,
        })
    }

    /// Summarise every cycle; single-frame cycles are excluded and listed,
    /// even when that leaves no summaries at all
    pub fn aggregate(&self, cycles: &[GaitCycle]) -> Result<WaveletComponents> {
        if cycles.is_empty() {
            return Err(Error::EmptyCycleSet);
        }

        let mut components = WaveletComponents::default();

        for cycle in cycles {
            match self.cycle_features(cycle) {
                Ok(features) => components.cycles.push(features),
                Err(Error::InsufficientCycle { .. }) => {
                    components.excluded_cycles.push(cycle.index);
                }
                Err(e) => return Err(e),
            }
        }

        if !components.excluded_cycles.is_empty() {
            tracing::warn!(
                excluded = ?components.excluded_cycles,
                "cycles too short for wavelet statistics"
            );
        }

        Ok(components)
    }
}
