//! Frame supply for the gait pipeline.
//!
//! The pipeline only ever reads forward; a source never seeks or rewinds.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use image::RgbImage;

use gait_core::{Error, Result};

/// Trait for ordered frame providers
pub trait FrameSource {
    /// Next frame, or `None` once the source is exhausted (blocking)
    fn next_frame(&mut self) -> Result<Option<RgbImage>>;

    /// Clip frame rate (frames per second) from the source metadata
    fn frame_rate(&self) -> f64;
}

/// In-memory frame source, mainly for tests and pre-decoded clips
pub struct VecFrameSource {
    frames: VecDeque<RgbImage>,
    frame_rate: f64,
}

impl VecFrameSource {
    pub fn new(frames: Vec<RgbImage>, frame_rate: f64) -> Self {
        Self {
            frames: frames.into(),
            frame_rate,
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for VecFrameSource {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        Ok(self.frames.pop_front())
    }

    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }
}

/// Frames decoded one at a time from a directory of image files.
///
/// Files are read in lexicographic file-name order, so zero-padded names
/// (`frame_0001.png`, ...) come back in capture order.
pub struct ImageSequenceSource {
    paths: VecDeque<PathBuf>,
    frame_rate: f64,
}

impl ImageSequenceSource {
    const EXTENSIONS: [&'static str; 4] = ["png", "jpg", "jpeg", "bmp"];

    pub fn open(dir: impl AsRef<Path>, frame_rate: f64) -> Result<Self> {
        let dir = dir.as_ref();
        if !(frame_rate.is_finite() && frame_rate > 0.0) {
            return Err(Error::InvalidFrameRate(frame_rate));
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && Self::is_image(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        tracing::debug!(dir = %dir.display(), frames = paths.len(), "opened image sequence");

        Ok(Self {
            paths: paths.into(),
            frame_rate,
        })
    }

    pub fn remaining(&self) -> usize {
        self.paths.len()
    }

    fn is_image(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                Self::EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        let Some(path) = self.paths.pop_front() else {
            return Ok(None);
        };

        let image = image::open(&path)
            .map_err(|e| Error::FrameSource(format!("{}: {}", path.display(), e)))?;
        Ok(Some(image.to_rgb8()))
    }

    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }
}
