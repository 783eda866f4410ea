//! Error types for the gait feature extraction system.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Degenerate bounding box: width {width}, height {height}")]
    DegenerateMeasurement { width: u32, height: u32 },

    #[error("Cycle {cycle} has {frames} frame(s); standard deviation needs at least 2")]
    InsufficientCycle { cycle: usize, frames: usize },

    #[error("No gait cycles detected after {frames_read} frame(s)")]
    NoCyclesDetected { frames_read: usize },

    #[error("No gait cycles to aggregate")]
    EmptyCycleSet,

    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(f64),

    #[error("Frame source error: {0}")]
    FrameSource(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the local-data conditions a caller may retry with a longer
    /// clip or a different region of interest.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            Error::DegenerateMeasurement { .. }
                | Error::InsufficientCycle { .. }
                | Error::NoCyclesDetected { .. }
                | Error::EmptyCycleSet
        )
    }

    /// True when the frame source yielded nothing at all.
    pub fn is_empty_source(&self) -> bool {
        matches!(self, Error::NoCyclesDetected { frames_read: 0 })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}
