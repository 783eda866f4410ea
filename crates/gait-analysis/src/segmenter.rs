//! Online gait cycle segmentation.
//!
//! The in-progress cycle is a single growable run of whole
//! [`FrameMeasurement`]s, so boxes, distances and wavelet bands can never
//! drift out of step. The frame that triggers a boundary opens the next
//! cycle; the sealed cycle holds only the frames before it.

use serde::{Deserialize, Serialize};

use gait_core::{Error, FrameMeasurement, GaitCycle, Result, SegmenterConfig, ThresholdGate};

/// Result of segmenting a whole clip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segmentation {
    pub cycles: Vec<GaitCycle>,
    /// Frames consumed from the source
    pub frames_read: usize,
    /// Trailing frames of the unfinished last cycle
    pub frames_discarded: usize,
}

impl Segmentation {
    pub fn step_count(&self) -> usize {
        self.cycles.len()
    }

    /// Fails with `NoCyclesDetected` when no boundary was ever found
    pub fn require_cycles(&self) -> Result<&[GaitCycle]> {
        if self.cycles.is_empty() {
            return Err(Error::NoCyclesDetected {
                frames_read: self.frames_read,
            });
        }
        Ok(&self.cycles)
    }
}

/// Frame-by-frame gait cycle state machine
#[derive(Debug, Clone)]
pub struct GaitCycleSegmenter {
    config: SegmenterConfig,
    current: Vec<FrameMeasurement>,
    cycles: Vec<GaitCycle>,
    frames_read: usize,
}

impl GaitCycleSegmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self {
            config,
            current: Vec::new(),
            cycles: Vec::new(),
            frames_read: 0,
        }
    }

    /// Consume one frame; returns the cycle it sealed, if any
    pub fn push(&mut self, frame: FrameMeasurement) -> Option<&GaitCycle> {
        self.frames_read += 1;

        let sealed = if self.is_boundary(&frame) {
            let frames = std::mem::take(&mut self.current);
            GaitCycle::new(self.cycles.len(), frames).map(|cycle| {
                tracing::debug!(
                    cycle = cycle.index,
                    start_frame = cycle.start_frame,
                    frames = cycle.frame_count(),
                    max_stride = cycle.max_stride_distance(),
                    "gait cycle sealed"
                );
                self.cycles.push(cycle);
            })
        } else {
            None
        };

        self.current.push(frame);
        sealed.and_then(|_| self.cycles.last())
    }

    /// Boundary test for an incoming frame against the current run
    fn is_boundary(&self, frame: &FrameMeasurement) -> bool {
        if self.current.len() < self.config.warmup_samples {
            return false;
        }
        let Some(previous) = self.current.last() else {
            return false;
        };

        // Sentinel distances never close a cycle
        if !frame.separation.is_measured() {
            return false;
        }

        let decreasing = frame.stride_distance < previous.stride_distance;
        let gated = match self.config.threshold_gate {
            ThresholdGate::Peak => previous.stride_distance > self.config.noise_threshold_px,
            ThresholdGate::Sample => frame.stride_distance > self.config.noise_threshold_px,
        };

        decreasing && gated
    }

    /// Number of completed cycles so far
    pub fn step_count(&self) -> usize {
        self.cycles.len()
    }

    pub fn cycles(&self) -> &[GaitCycle] {
        &self.cycles
    }

    pub fn frames_read(&self) -> usize {
        self.frames_read
    }

    /// Frames buffered in the unfinished cycle
    pub fn pending_frames(&self) -> usize {
        self.current.len()
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Stop consuming; the unfinished trailing cycle is discarded
    pub fn finish(self) -> Segmentation {
        let frames_discarded = self.current.len();
        if frames_discarded > 0 {
            tracing::debug!(frames_discarded, "discarding trailing partial cycle");
        }

        Segmentation {
            cycles: self.cycles,
            frames_read: self.frames_read,
            frames_discarded,
        }
    }

    /// Reset to the initial state
    pub fn reset(&mut self) {
        self.current.clear();
        self.cycles.clear();
        self.frames_read = 0;
    }
}

impl Default for GaitCycleSegmenter {
    fn default() -> Self {
        Self::new(SegmenterConfig::default())
    }
}
