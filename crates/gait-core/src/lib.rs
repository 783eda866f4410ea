//! # Gait-Core
//!
//! Core types and utilities for the gait feature extraction system.
//!
//! A walking video is reduced to one [`FrameMeasurement`] per frame
//! (inter-foot separation, silhouette bounding boxes, Haar wavelet bands).
//! Measurements are grouped into [`GaitCycle`] records by the segmenter in
//! `gait-analysis`, which then aggregates them into a feature vector.

pub mod config;
pub mod cycle;
pub mod error;
pub mod types;

pub use config::*;
pub use cycle::*;
pub use error::{Error, Result};
pub use types::*;
