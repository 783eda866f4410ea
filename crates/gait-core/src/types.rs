//! Fundamental per-frame types for gait measurement.

use nalgebra::Point2;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Axis-aligned silhouette bounding box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub width: u32,
    pub height: u32,
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
}

impl BoundingBox {
    pub fn new(width: u32, height: u32, x: u32, y: u32) -> Self {
        Self {
            width,
            height,
            x,
            y,
        }
    }

    /// Centre point: top-left plus half of width/height
    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// A box with a zero side has no defined angle or aspect ratio
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Angle of the diagonal against the horizontal, `atan(height / width)`
    pub fn diagonal_angle(&self) -> Result<f64> {
        Ok(self.aspect_ratio()?.atan())
    }

    /// `height / width`
    pub fn aspect_ratio(&self) -> Result<f64> {
        if self.is_degenerate() {
            return Err(Error::DegenerateMeasurement {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.height as f64 / self.width as f64)
    }

    /// Euclidean distance between the centres of two boxes
    pub fn center_distance(&self, other: &BoundingBox) -> f64 {
        nalgebra::distance(&self.center(), &other.center())
    }
}

/// Outcome of looking for feet inside the lower-body region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FootSeparation {
    /// Nothing detected in the region
    NoFeet,
    /// Feet merged into a single blob (stance)
    OneFoot(BoundingBox),
    /// Two separated feet
    TwoFeet(BoundingBox, BoundingBox),
    /// More than two blobs; the number detected
    Ambiguous(usize),
}

impl FootSeparation {
    /// Classify the boxes found in the foot region
    pub fn from_boxes(boxes: &[BoundingBox]) -> Self {
        match boxes {
            [] => FootSeparation::NoFeet,
            [single] => FootSeparation::OneFoot(*single),
            [first, second] => FootSeparation::TwoFeet(*first, *second),
            more => FootSeparation::Ambiguous(more.len()),
        }
    }

    /// Inter-foot distance, or `sentinel` when no reliable separation exists
    pub fn distance(&self, sentinel: f64) -> f64 {
        match self {
            FootSeparation::TwoFeet(a, b) => a.center_distance(b),
            FootSeparation::NoFeet | FootSeparation::OneFoot(_) | FootSeparation::Ambiguous(_) => {
                sentinel
            }
        }
    }

    /// Only a two-foot detection yields a genuine stride measurement
    pub fn is_measured(&self) -> bool {
        matches!(self, FootSeparation::TwoFeet(..))
    }
}

/// Wavelet band used by the frequency-domain features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaveletBand {
    Approximation,
    Horizontal,
    Vertical,
}

impl WaveletBand {
    /// Bands in the fixed output order
    pub const ALL: [WaveletBand; 3] = [
        WaveletBand::Approximation,
        WaveletBand::Horizontal,
        WaveletBand::Vertical,
    ];

    /// Position in [`WaveletBand::ALL`]
    pub fn index(&self) -> usize {
        match self {
            WaveletBand::Approximation => 0,
            WaveletBand::Horizontal => 1,
            WaveletBand::Vertical => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WaveletBand::Approximation => "approx",
            WaveletBand::Horizontal => "horiz",
            WaveletBand::Vertical => "vert",
        }
    }
}

/// Single-level 2-D Haar decomposition of one grayscale frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveletCoefficients {
    pub approx: Array2<f64>,
    pub horizontal: Array2<f64>,
    pub vertical: Array2<f64>,
    /// Computed for completeness; unused by the features
    pub diagonal: Array2<f64>,
}

impl WaveletCoefficients {
    pub fn new(
        approx: Array2<f64>,
        horizontal: Array2<f64>,
        vertical: Array2<f64>,
        diagonal: Array2<f64>,
    ) -> Self {
        Self {
            approx,
            horizontal,
            vertical,
            diagonal,
        }
    }

    /// All-zero coefficients of the given band shape
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::new(
            Array2::zeros((rows, cols)),
            Array2::zeros((rows, cols)),
            Array2::zeros((rows, cols)),
            Array2::zeros((rows, cols)),
        )
    }

    pub fn band(&self, band: WaveletBand) -> &Array2<f64> {
        match band {
            WaveletBand::Approximation => &self.approx,
            WaveletBand::Horizontal => &self.horizontal,
            WaveletBand::Vertical => &self.vertical,
        }
    }

    /// Full-matrix sums of the approx, horizontal and vertical bands
    pub fn band_sums(&self) -> [f64; 3] {
        WaveletBand::ALL.map(|band| self.band(band).sum())
    }

    pub fn energy(&self) -> WaveletEnergy {
        let [approx, horizontal, vertical] = self.band_sums();
        WaveletEnergy::new(approx, horizontal, vertical)
    }
}

/// Per-band coefficient sums of one frame.
///
/// This is all the features need from a decomposition, so frames keep it
/// in place of the band matrices.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WaveletEnergy {
    pub approx: f64,
    pub horizontal: f64,
    pub vertical: f64,
}

impl WaveletEnergy {
    pub fn new(approx: f64, horizontal: f64, vertical: f64) -> Self {
        Self {
            approx,
            horizontal,
            vertical,
        }
    }

    pub fn band(&self, band: WaveletBand) -> f64 {
        match band {
            WaveletBand::Approximation => self.approx,
            WaveletBand::Horizontal => self.horizontal,
            WaveletBand::Vertical => self.vertical,
        }
    }

    /// Sums in {approx, horiz, vert} order
    pub fn to_array(&self) -> [f64; 3] {
        [self.approx, self.horizontal, self.vertical]
    }
}

impl From<&WaveletCoefficients> for WaveletEnergy {
    fn from(coeffs: &WaveletCoefficients) -> Self {
        coeffs.energy()
    }
}

impl From<WaveletCoefficients> for WaveletEnergy {
    fn from(coeffs: WaveletCoefficients) -> Self {
        coeffs.energy()
    }
}

/// Everything measured on one input frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameMeasurement {
    /// Zero-based position in the frame source
    pub index: usize,
    pub separation: FootSeparation,
    /// `separation` resolved to a scalar, sentinel included
    pub stride_distance: f64,
    /// Full-frame silhouette boxes (0, 1, 2 or more)
    pub bounding_boxes: Vec<BoundingBox>,
    pub wavelet: WaveletEnergy,
}

impl FrameMeasurement {
    pub fn new(
        index: usize,
        separation: FootSeparation,
        sentinel: f64,
        bounding_boxes: Vec<BoundingBox>,
        wavelet: impl Into<WaveletEnergy>,
    ) -> Self {
        Self {
            index,
            separation,
            stride_distance: separation.distance(sentinel),
            bounding_boxes,
            wavelet: wavelet.into(),
        }
    }
}
