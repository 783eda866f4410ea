//! Inter-foot (stride) distance estimation.

use image::{imageops, GrayImage};

use gait_core::{FootSeparation, RegionOfInterest, StrideConfig};

use crate::silhouette::SilhouetteMeasurer;

/// Zero every pixel outside `roi`, keeping the frame size
pub fn apply_region_mask(image: &GrayImage, roi: &RegionOfInterest) -> GrayImage {
    let (width, height) = image.dimensions();
    let roi = roi.clamp_to(width, height);

    let band = imageops::crop_imm(image, roi.x, roi.y, roi.width, roi.height).to_image();
    let mut masked = GrayImage::new(width, height);
    imageops::replace(&mut masked, &band, i64::from(roi.x), i64::from(roi.y));
    masked
}

/// Measures foot separation inside a fixed lower-body band
pub struct StrideDistanceEstimator<M> {
    measurer: M,
    region: RegionOfInterest,
    sentinel: f64,
}

impl<M: SilhouetteMeasurer> StrideDistanceEstimator<M> {
    pub fn new(measurer: M, config: &StrideConfig) -> Self {
        Self {
            measurer,
            region: config.region_of_interest,
            sentinel: config.sentinel_distance,
        }
    }

    pub fn region(&self) -> &RegionOfInterest {
        &self.region
    }

    pub fn sentinel(&self) -> f64 {
        self.sentinel
    }

    /// Classify the blobs found in the foot band of a grayscale frame
    pub fn separation(&self, image: &GrayImage) -> FootSeparation {
        let masked = apply_region_mask(image, &self.region);
        let boxes = self.measurer.bounding_boxes(&masked);
        let separation = FootSeparation::from_boxes(&boxes);

        if let FootSeparation::Ambiguous(count) = separation {
            tracing::trace!(count, "ambiguous foot detection");
        }
        separation
    }

    /// Inter-foot distance, or the sentinel when feet are not separable
    pub fn stride_distance(&self, image: &GrayImage) -> f64 {
        self.separation(image).distance(self.sentinel)
    }
}
