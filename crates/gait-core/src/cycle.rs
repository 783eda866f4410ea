//! Gait cycle records produced by the segmenter.

use serde::{Deserialize, Serialize};

use crate::types::{BoundingBox, FrameMeasurement, WaveletEnergy};

/// One completed gait cycle.
///
/// Frames are stored as whole [`FrameMeasurement`] records, so the box,
/// distance and wavelet sequences always advance in lockstep and share a
/// single length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaitCycle {
    /// Zero-based position among the completed cycles
    pub index: usize,
    /// Source index of the first frame in the cycle
    pub start_frame: usize,
    frames: Vec<FrameMeasurement>,
}

impl GaitCycle {
    /// Seal a run of consecutive frames into a cycle.
    ///
    /// Returns `None` for an empty run.
    pub fn new(index: usize, frames: Vec<FrameMeasurement>) -> Option<Self> {
        let start_frame = frames.first()?.index;
        Some(Self {
            index,
            start_frame,
            frames,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Source index one past the last frame
    pub fn end_frame(&self) -> usize {
        self.start_frame + self.frames.len()
    }

    pub fn frames(&self) -> &[FrameMeasurement] {
        &self.frames
    }

    pub fn stride_distances(&self) -> impl Iterator<Item = f64> + '_ {
        self.frames.iter().map(|f| f.stride_distance)
    }

    /// Per-frame box lists, one entry per frame
    pub fn bounding_box_sequence(&self) -> impl Iterator<Item = &[BoundingBox]> + '_ {
        self.frames.iter().map(|f| f.bounding_boxes.as_slice())
    }

    /// Per-frame band energies
    pub fn wavelet_sequence(&self) -> impl Iterator<Item = &WaveletEnergy> + '_ {
        self.frames.iter().map(|f| &f.wavelet)
    }

    /// Largest inter-foot distance seen during the cycle
    pub fn max_stride_distance(&self) -> f64 {
        self.stride_distances().fold(f64::NEG_INFINITY, f64::max)
    }
}
