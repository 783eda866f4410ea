//! Single-level 2-D Haar wavelet decomposition.
//!
//! Band conventions follow the common `dwt2` layout: for each 2x2 block
//!
//! ```text
//! | a b |
//! | c d |
//! ```
//!
//! approx = (a+b+c+d)/2, horizontal = (a+b-c-d)/2, vertical = (a-b+c-d)/2,
//! diagonal = (a-b-c+d)/2. Odd trailing rows/columns are paired with
//! themselves (symmetric extension), so every band has shape
//! `(ceil(h/2), ceil(w/2))`.

use image::GrayImage;
use ndarray::Array2;

use gait_core::WaveletCoefficients;

/// Trait for 2-D transforms producing the four wavelet bands
pub trait WaveletTransform {
    fn transform(&self, image: &GrayImage) -> WaveletCoefficients;
}

/// Haar basis, one decomposition level
#[derive(Debug, Clone, Copy, Default)]
pub struct HaarTransform;

impl HaarTransform {
    pub fn new() -> Self {
        Self
    }

    /// Grayscale image as a `(height, width)` matrix of intensities
    pub fn to_matrix(image: &GrayImage) -> Array2<f64> {
        let (width, height) = image.dimensions();
        Array2::from_shape_fn((height as usize, width as usize), |(row, col)| {
            image.get_pixel(col as u32, row as u32)[0] as f64
        })
    }

    /// Decompose an arbitrary matrix
    pub fn decompose(&self, signal: &Array2<f64>) -> WaveletCoefficients {
        let (rows, cols) = signal.dim();
        if rows == 0 || cols == 0 {
            return WaveletCoefficients::zeros(0, 0);
        }

        let out_rows = rows.div_ceil(2);
        let out_cols = cols.div_ceil(2);
        let mut coeffs = WaveletCoefficients::zeros(out_rows, out_cols);

        for i in 0..out_rows {
            let r0 = 2 * i;
            let r1 = (r0 + 1).min(rows - 1);
            for j in 0..out_cols {
                let c0 = 2 * j;
                let c1 = (c0 + 1).min(cols - 1);

                let a = signal[[r0, c0]];
                let b = signal[[r0, c1]];
                let c = signal[[r1, c0]];
                let d = signal[[r1, c1]];

                coeffs.approx[[i, j]] = (a + b + c + d) / 2.0;
                coeffs.horizontal[[i, j]] = (a + b - c - d) / 2.0;
                coeffs.vertical[[i, j]] = (a - b + c - d) / 2.0;
                coeffs.diagonal[[i, j]] = (a - b - c + d) / 2.0;
            }
        }

        coeffs
    }
}

impl WaveletTransform for HaarTransform {
    fn transform(&self, image: &GrayImage) -> WaveletCoefficients {
        self.decompose(&Self::to_matrix(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Luma;
    use ndarray::array;

    #[test]
    fn test_single_block() {
        let signal = array![[1.0, 2.0], [3.0, 4.0]];
        let coeffs = HaarTransform::new().decompose(&signal);

        assert_relative_eq!(coeffs.approx[[0, 0]], 5.0);
        assert_relative_eq!(coeffs.horizontal[[0, 0]], -2.0);
        assert_relative_eq!(coeffs.vertical[[0, 0]], -1.0);
        assert_relative_eq!(coeffs.diagonal[[0, 0]], 0.0);
    }

    #[test]
    fn test_constant_image_has_no_detail() {
        let image = GrayImage::from_pixel(8, 6, Luma([50]));
        let coeffs = HaarTransform::new().transform(&image);

        assert_eq!(coeffs.approx.dim(), (3, 4));
        assert!(coeffs.approx.iter().all(|&v| (v - 100.0).abs() < 1e-12));
        assert!(coeffs.horizontal.iter().all(|&v| v == 0.0));
        assert!(coeffs.vertical.iter().all(|&v| v == 0.0));
        assert!(coeffs.diagonal.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_odd_dimensions_use_symmetric_extension() {
        let signal = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let coeffs = HaarTransform::new().decompose(&signal);

        assert_eq!(coeffs.approx.dim(), (2, 2));
        // Corner block replicates 9 into a 2x2
        assert_relative_eq!(coeffs.approx[[1, 1]], 18.0);
        assert_relative_eq!(coeffs.horizontal[[1, 1]], 0.0);
        // Right column pairs (3, 3) over (6, 6)
        assert_relative_eq!(coeffs.approx[[0, 1]], 9.0);
        assert_relative_eq!(coeffs.horizontal[[0, 1]], -3.0);
        assert_relative_eq!(coeffs.vertical[[0, 1]], 0.0);
    }

    #[test]
    fn test_energy_preserved_for_even_shape() {
        let signal = array![[3.0, 1.0, 4.0, 1.0], [5.0, 9.0, 2.0, 6.0]];
        let coeffs = HaarTransform::new().decompose(&signal);

        let input: f64 = signal.iter().map(|v| v * v).sum();
        let output: f64 = [
            &coeffs.approx,
            &coeffs.horizontal,
            &coeffs.vertical,
            &coeffs.diagonal,
        ]
        .iter()
        .flat_map(|band| band.iter())
        .map(|v| v * v)
        .sum();
        assert_relative_eq!(input, output, epsilon = 1e-9);
    }

    #[test]
    fn test_matrix_orientation() {
        let mut image = GrayImage::new(3, 2);
        image.put_pixel(2, 1, Luma([7]));
        let m = HaarTransform::to_matrix(&image);
        assert_eq!(m.dim(), (2, 3));
        assert_eq!(m[[1, 2]], 7.0);
    }
}
