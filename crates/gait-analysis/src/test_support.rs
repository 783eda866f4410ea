//! Synthetic measurements shared by the unit tests.

use gait_core::{BoundingBox, FootSeparation, FrameMeasurement, WaveletEnergy};

/// Two 2x2 feet whose centres lie `distance` pixels apart
pub fn feet_apart(distance: u32) -> FootSeparation {
    FootSeparation::TwoFeet(
        BoundingBox::new(2, 2, 0, 200),
        BoundingBox::new(2, 2, distance, 200),
    )
}

/// Frame with a measured stride distance and one 20x60 silhouette box
pub fn frame(index: usize, distance: u32) -> FrameMeasurement {
    FrameMeasurement::new(
        index,
        feet_apart(distance),
        1.0,
        vec![BoundingBox::new(20, 60, 100, 100)],
        WaveletEnergy::default(),
    )
}

/// Frame whose feet could not be separated
pub fn sentinel_frame(index: usize) -> FrameMeasurement {
    FrameMeasurement::new(
        index,
        FootSeparation::NoFeet,
        1.0,
        vec![BoundingBox::new(20, 60, 100, 100)],
        WaveletEnergy::default(),
    )
}

/// Frame carrying given boxes and band energies `[a, h, v]`
pub fn frame_with(index: usize, boxes: Vec<BoundingBox>, bands: [f64; 3]) -> FrameMeasurement {
    FrameMeasurement::new(
        index,
        FootSeparation::NoFeet,
        1.0,
        boxes,
        WaveletEnergy::new(bands[0], bands[1], bands[2]),
    )
}
