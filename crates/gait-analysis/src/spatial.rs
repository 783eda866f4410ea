//! Spatial (silhouette geometry) components.

use serde::{Deserialize, Serialize};

use gait_core::{AggregationConfig, BoundingBox, Error, GaitCycle, Result};

/// Mean silhouette bounding-box geometry
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpatialComponents {
    /// Box height (pixels)
    pub height: f64,
    /// Box width (pixels)
    pub width: f64,
    /// Diagonal angle against the horizontal (radians)
    pub angle: f64,
    /// Height / width
    pub aspect_ratio: f64,
}

impl SpatialComponents {
    fn accumulate(&mut self, other: &SpatialComponents) {
        self.height += other.height;
        self.width += other.width;
        self.angle += other.angle;
        self.aspect_ratio += other.aspect_ratio;
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            height: self.height * factor,
            width: self.width * factor,
            angle: self.angle * factor,
            aspect_ratio: self.aspect_ratio * factor,
        }
    }
}

/// Averages box geometry per cycle, then across cycles
#[derive(Debug, Clone)]
pub struct SpatialAggregator {
    correction_factor: f64,
    strict: bool,
}

impl SpatialAggregator {
    pub fn new(config: &AggregationConfig) -> Self {
        Self {
            correction_factor: config.correction_factor,
            strict: config.strict_spatial,
        }
    }

    /// Fail on zero-sized boxes instead of skipping them
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn with_correction_factor(mut self, factor: f64) -> Self {
        self.correction_factor = factor;
        self
    }

    /// Box sums over every frame of the cycle, divided by its frame count
    pub fn cycle_means(&self, cycle: &GaitCycle) -> Result<SpatialComponents> {
        let mut sums = SpatialComponents::default();
        let mut skipped = 0usize;

        for bbox in cycle.bounding_box_sequence().flatten() {
            match box_terms(bbox) {
                Ok(terms) => sums.accumulate(&terms),
                Err(e) if self.strict => return Err(e),
                Err(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(cycle = cycle.index, skipped, "degenerate boxes skipped");
        }

        Ok(sums.scaled(1.0 / cycle.frame_count() as f64))
    }

    /// Sum of per-cycle means, scaled by `correction_factor / step_count`
    pub fn aggregate(&self, cycles: &[GaitCycle]) -> Result<SpatialComponents> {
        if cycles.is_empty() {
            return Err(Error::EmptyCycleSet);
        }

        let mut total = SpatialComponents::default();
        for cycle in cycles {
            total.accumulate(&self.cycle_means(cycle)?);
        }

        Ok(total.scaled(self.correction_factor / cycles.len() as f64))
    }
}

impl Default for SpatialAggregator {
    fn default() -> Self {
        Self::new(&AggregationConfig::default())
    }
}

fn box_terms(bbox: &BoundingBox) -> Result<SpatialComponents> {
    Ok(SpatialComponents {
        height: bbox.height as f64,
        width: bbox.width as f64,
        angle: bbox.diagonal_angle()?,
        aspect_ratio: bbox.aspect_ratio()?,
    })
}
