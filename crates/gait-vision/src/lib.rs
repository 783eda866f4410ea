//! # Gait-Vision
//!
//! Image-side collaborators of the gait pipeline.
//!
//! ## Stages
//!
//! 1. **Source**: Supply frames in order, together with the clip frame rate
//! 2. **Silhouette**: Bounding boxes of foreground blobs in a frame
//! 3. **Wavelet**: Single-level 2-D Haar decomposition of the grayscale frame
//! 4. **Stride**: Inter-foot distance inside the lower-body region

pub mod silhouette;
pub mod source;
pub mod stride;
pub mod wavelet;

pub use silhouette::*;
pub use source::*;
pub use stride::*;
pub use wavelet::*;
