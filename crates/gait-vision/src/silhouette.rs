//! Silhouette bounding boxes.
//!
//! Frames are expected to be binary (or near-binary) silhouettes. Blobs
//! are 8-connected foreground components after a global threshold;
//! morphological clean-up is left to whoever produces the silhouettes.

use image::{GrayImage, Luma};
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::region_labelling::{connected_components, Connectivity};

use gait_core::{BoundingBox, SilhouetteConfig};

/// Trait for foreground blob detectors
pub trait SilhouetteMeasurer {
    /// Bounding boxes of the foreground blobs, in detection order
    fn bounding_boxes(&self, image: &GrayImage) -> Vec<BoundingBox>;
}

/// Threshold + connected-component labelling
#[derive(Debug, Clone)]
pub struct ComponentMeasurer {
    foreground_threshold: u8,
    min_area: u32,
}

impl ComponentMeasurer {
    pub fn new(config: &SilhouetteConfig) -> Self {
        Self {
            foreground_threshold: config.foreground_threshold,
            min_area: config.min_area,
        }
    }
}

impl Default for ComponentMeasurer {
    fn default() -> Self {
        Self::new(&SilhouetteConfig::default())
    }
}

/// Running pixel extent of one labelled component
#[derive(Debug, Clone, Copy)]
struct Extent {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    pixels: u32,
}

impl Extent {
    fn new(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
            pixels: 0,
        }
    }

    fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.pixels += 1;
    }

    fn to_box(self) -> BoundingBox {
        BoundingBox::new(
            self.max_x - self.min_x + 1,
            self.max_y - self.min_y + 1,
            self.min_x,
            self.min_y,
        )
    }
}

impl SilhouetteMeasurer for ComponentMeasurer {
    fn bounding_boxes(&self, image: &GrayImage) -> Vec<BoundingBox> {
        let binary = threshold(image, self.foreground_threshold, ThresholdType::Binary);
        let labels = connected_components(&binary, Connectivity::Eight, Luma([0u8]));

        // Label 0 is background; the rest are numbered in raster order
        let mut extents: Vec<Option<Extent>> = Vec::new();
        for (x, y, pixel) in labels.enumerate_pixels() {
            let label = pixel[0] as usize;
            if label == 0 {
                continue;
            }
            if extents.len() < label {
                extents.resize(label, None);
            }
            extents[label - 1]
                .get_or_insert_with(|| Extent::new(x, y))
                .include(x, y);
        }

        extents
            .into_iter()
            .flatten()
            .filter(|extent| extent.pixels >= self.min_area)
            .map(Extent::to_box)
            .collect()
    }
}
