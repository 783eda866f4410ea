//! # Gait-Analysis
//!
//! Gait cycle segmentation and feature aggregation.
//!
//! ## Segmentation
//!
//! Inter-foot distance rises to a maximum near mid-swing and falls as the
//! feet converge at stance. The segmenter closes a cycle on the first
//! decreasing sample after a peak above the noise threshold, using only
//! the previous sample (no lookahead).
//!
//! ## Features
//!
//! - **Spatial**: mean silhouette box height, width, diagonal angle and
//!   aspect ratio
//! - **Temporal**: step length, stride length, cadence and velocity
//! - **Wavelet**: per-cycle mean and standard deviation of the Haar
//!   approx/horizontal/vertical band energies

pub mod analyzer;
pub mod features;
pub mod segmenter;
pub mod spatial;
pub mod temporal;
pub mod wavelet;

pub use analyzer::*;
pub use features::*;
pub use segmenter::*;
pub use spatial::*;
pub use temporal::*;
pub use wavelet::*;

#[cfg(test)]
mod test_support;
