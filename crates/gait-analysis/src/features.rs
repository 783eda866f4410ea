//! The per-subject gait feature vector.

use serde::{Deserialize, Serialize};

use gait_core::{Result, WaveletBand};

use crate::spatial::SpatialComponents;
use crate::temporal::TemporalComponents;
use crate::wavelet::CycleWaveletFeatures;

/// Complete feature package for one walking clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Silhouette geometry
    pub spatial: SpatialComponents,
    /// Step, stride, cadence, velocity
    pub temporal: TemporalComponents,
    /// One entry per cycle with enough frames
    pub wavelet: Vec<CycleWaveletFeatures>,
    /// Cycles left out of `wavelet`
    pub excluded_wavelet_cycles: Vec<usize>,
    /// Completed gait cycles (step count)
    pub cycle_count: usize,
    pub frames_read: usize,
    /// Frames of the unfinished trailing cycle
    pub frames_discarded: usize,
}

impl FeatureVector {
    /// Flatten for classifier input: spatial, temporal, then per-cycle
    /// `(mean, std_dev)` for each band
    pub fn to_flat_vector(&self) -> Vec<f64> {
        let mut features = vec![
            self.spatial.height,
            self.spatial.width,
            self.spatial.angle,
            self.spatial.aspect_ratio,
            self.temporal.step_length,
            self.temporal.stride_length,
            self.temporal.cadence,
            self.temporal.velocity,
        ];

        for cycle in &self.wavelet {
            for stats in &cycle.bands {
                features.push(stats.mean);
                features.push(stats.std_dev);
            }
        }

        features
    }

    /// Names matching [`FeatureVector::to_flat_vector`] position by position
    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = [
            "spatial_height",
            "spatial_width",
            "spatial_angle",
            "spatial_aspect_ratio",
            "step_length",
            "stride_length",
            "cadence",
            "velocity",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        for cycle in &self.wavelet {
            for band in WaveletBand::ALL {
                names.push(format!("cycle{}_{}_mean", cycle.cycle, band.name()));
                names.push(format!("cycle{}_{}_std", cycle.cycle, band.name()));
            }
        }

        names
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wavelet::BandStatistics;

    fn sample() -> FeatureVector {
        let stats = |m: f64| BandStatistics {
            mean: m,
            std_dev: m / 10.0,
        };
        FeatureVector {
            spatial: SpatialComponents {
                height: 120.0,
                width: 40.0,
                angle: 1.2,
                aspect_ratio: 3.0,
            },
            temporal: TemporalComponents::from_step_and_cadence(60.0, 1.5),
            wavelet: vec![
                CycleWaveletFeatures {
                    cycle: 0,
                    bands: [stats(1.0), stats(2.0), stats(3.0)],
                },
                CycleWaveletFeatures {
                    cycle: 2,
                    bands: [stats(4.0), stats(5.0), stats(6.0)],
                },
            ],
            excluded_wavelet_cycles: vec![1],
            cycle_count: 3,
            frames_read: 40,
            frames_discarded: 4,
        }
    }

    #[test]
    fn test_names_match_values() {
        let fv = sample();
        let values = fv.to_flat_vector();
        let names = fv.feature_names();

        assert_eq!(values.len(), 8 + 2 * 6);
        assert_eq!(values.len(), names.len());
        assert_eq!(names[8], "cycle0_approx_mean");
        assert_eq!(names[19], "cycle2_vert_std");
        assert_eq!(values[8], 1.0);
        assert!(values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_json_roundtrip() {
        let fv = sample();
        let json = fv.to_json(false).unwrap();
        let back: FeatureVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fv);
    }
}
