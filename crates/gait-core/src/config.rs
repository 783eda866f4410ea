//! Pipeline configuration.
//!
//! The defaults encode the camera set-up the constants were tuned on
//! (320x240 side-view silhouettes); they are not universal gait physics.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Complete pipeline configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GaitConfig {
    /// Cycle boundary detection
    pub segmenter: SegmenterConfig,

    /// Inter-foot distance measurement
    pub stride: StrideConfig,

    /// Foreground blob extraction
    pub silhouette: SilhouetteConfig,

    /// Feature aggregation
    pub aggregation: AggregationConfig,
}

/// Which stride sample is compared against the noise threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdGate {
    /// The previous sample (the local maximum being left behind)
    #[default]
    Peak,
    /// The newly measured sample
    Sample,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Samples buffered in a cycle before a boundary may fire
    pub warmup_samples: usize,

    /// Minimum separation (pixels) for a boundary
    pub noise_threshold_px: f64,

    pub threshold_gate: ThresholdGate,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            warmup_samples: 3,
            noise_threshold_px: 40.0,
            threshold_gate: ThresholdGate::Peak,
        }
    }
}

/// Rectangular region of a frame, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionOfInterest {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RegionOfInterest {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rows 190..240 across a 320-pixel-wide frame
    pub fn foot_band() -> Self {
        Self::new(0, 190, 320, 50)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersect with a `width` x `height` frame
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && py >= self.y
            && (px - self.x) < self.width
            && (py - self.y) < self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrideConfig {
    /// Lower-body band searched for feet
    pub region_of_interest: RegionOfInterest,

    /// Distance reported when two feet cannot be told apart
    pub sentinel_distance: f64,
}

impl Default for StrideConfig {
    fn default() -> Self {
        Self {
            region_of_interest: RegionOfInterest::foot_band(),
            sentinel_distance: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SilhouetteConfig {
    /// Gray level above which a pixel is foreground
    pub foreground_threshold: u8,

    /// Blobs with fewer pixels are dropped
    pub min_area: u32,
}

impl Default for SilhouetteConfig {
    fn default() -> Self {
        Self {
            foreground_threshold: 127,
            min_area: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Scale applied to the summed spatial means (two boxes per frame)
    pub correction_factor: f64,

    /// Overrides the frame source's own frame rate
    pub frame_rate: Option<f64>,

    /// Fail on zero-sized boxes instead of skipping them
    pub strict_spatial: bool,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            correction_factor: 2.0,
            frame_rate: None,
            strict_spatial: false,
        }
    }
}

impl GaitConfig {
    /// Load configuration from file, with `GAIT__*` environment overrides
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("GAIT").separator("__"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("GAIT").separator("__"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.segmenter.warmup_samples == 0 {
            return Err(Error::Config("segmenter.warmup_samples must be at least 1".into()));
        }
        if !self.segmenter.noise_threshold_px.is_finite() || self.segmenter.noise_threshold_px < 0.0
        {
            return Err(Error::Config(format!(
                "segmenter.noise_threshold_px must be a non-negative number, got {}",
                self.segmenter.noise_threshold_px
            )));
        }
        if self.stride.region_of_interest.is_empty() {
            return Err(Error::Config("stride.region_of_interest is empty".into()));
        }
        if !self.stride.sentinel_distance.is_finite() {
            return Err(Error::Config("stride.sentinel_distance must be finite".into()));
        }
        if !(self.aggregation.correction_factor.is_finite()
            && self.aggregation.correction_factor > 0.0)
        {
            return Err(Error::Config(format!(
                "aggregation.correction_factor must be positive, got {}",
                self.aggregation.correction_factor
            )));
        }
        if let Some(fps) = self.aggregation.frame_rate {
            if !(fps.is_finite() && fps > 0.0) {
                return Err(Error::InvalidFrameRate(fps));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GaitConfig::default();
        assert_eq!(config.segmenter.warmup_samples, 3);
        assert_eq!(config.segmenter.noise_threshold_px, 40.0);
        assert_eq!(config.segmenter.threshold_gate, ThresholdGate::Peak);
        assert_eq!(config.stride.region_of_interest, RegionOfInterest::new(0, 190, 320, 50));
        assert_eq!(config.aggregation.correction_factor, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_warmup() {
        let mut config = GaitConfig::default();
        config.segmenter.warmup_samples = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_frame_rate() {
        let mut config = GaitConfig::default();
        config.aggregation.frame_rate = Some(0.0);
        assert!(matches!(config.validate(), Err(Error::InvalidFrameRate(_))));
    }

    #[test]
    fn test_roi_clamped_to_small_frame() {
        let roi = RegionOfInterest::foot_band().clamp_to(160, 200);
        assert_eq!(roi, RegionOfInterest::new(0, 190, 160, 10));

        let outside = RegionOfInterest::foot_band().clamp_to(100, 100);
        assert!(outside.is_empty());
    }

    #[test]
    fn test_roi_contains() {
        let roi = RegionOfInterest::new(10, 10, 5, 5);
        assert!(roi.contains(10, 10));
        assert!(roi.contains(14, 14));
        assert!(!roi.contains(15, 10));
        assert!(!roi.contains(9, 12));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gait.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{ "segmenter": {{ "noise_threshold_px": 25.0, "threshold_gate": "sample" }} }}"#
        )
        .unwrap();

        let config = GaitConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.segmenter.noise_threshold_px, 25.0);
        assert_eq!(config.segmenter.threshold_gate, ThresholdGate::Sample);
        assert_eq!(config.segmenter.warmup_samples, 3);
        assert_eq!(config.aggregation.correction_factor, 2.0);
    }
}
