//! Complete gait analyzer orchestrating measurement, segmentation and
//! feature aggregation.

use image::{imageops, RgbImage};
use serde::{Deserialize, Serialize};

use gait_core::{FrameMeasurement, GaitConfig, Result};
use gait_vision::{
    ComponentMeasurer, FrameSource, HaarTransform, SilhouetteMeasurer, StrideDistanceEstimator,
    WaveletTransform,
};

use crate::features::FeatureVector;
use crate::segmenter::{GaitCycleSegmenter, Segmentation};
use crate::spatial::SpatialAggregator;
use crate::temporal::TemporalAggregator;
use crate::wavelet::WaveletAggregator;

/// Segmentation plus the features derived from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaitReport {
    pub segmentation: Segmentation,
    pub features: FeatureVector,
}

/// Frame-to-feature-vector pipeline
pub struct GaitAnalyzer<M = ComponentMeasurer, W = HaarTransform> {
    config: GaitConfig,
    measurer: M,
    stride: StrideDistanceEstimator<M>,
    transform: W,
}

impl GaitAnalyzer {
    /// Analyzer with the connected-component measurer and Haar transform
    pub fn new(config: GaitConfig) -> Result<Self> {
        let measurer = ComponentMeasurer::new(&config.silhouette);
        Self::with_components(config, measurer, HaarTransform::new())
    }
}

impl<M, W> GaitAnalyzer<M, W>
where
    M: SilhouetteMeasurer + Clone,
    W: WaveletTransform,
{
    pub fn with_components(config: GaitConfig, measurer: M, transform: W) -> Result<Self> {
        config.validate()?;
        let stride = StrideDistanceEstimator::new(measurer.clone(), &config.stride);

        Ok(Self {
            config,
            measurer,
            stride,
            transform,
        })
    }

    pub fn config(&self) -> &GaitConfig {
        &self.config
    }

    /// Wavelet bands, foot separation and silhouette boxes of one frame
    pub fn measure_frame(&self, index: usize, frame: &RgbImage) -> FrameMeasurement {
        let gray = imageops::grayscale(frame);

        let wavelet = self.transform.transform(&gray);
        let separation = self.stride.separation(&gray);
        let bounding_boxes = self.measurer.bounding_boxes(&gray);

        FrameMeasurement::new(
            index,
            separation,
            self.stride.sentinel(),
            bounding_boxes,
            wavelet,
        )
    }

    /// Read the source to exhaustion, one frame at a time
    pub fn segment<S: FrameSource>(&self, source: &mut S) -> Result<Segmentation> {
        let mut segmenter = GaitCycleSegmenter::new(self.config.segmenter.clone());

        while let Some(frame) = source.next_frame()? {
            let measurement = self.measure_frame(segmenter.frames_read(), &frame);
            segmenter.push(measurement);
        }

        Ok(segmenter.finish())
    }

    /// Run the three aggregators over a finished segmentation
    pub fn extract_features(
        &self,
        segmentation: &Segmentation,
        frame_rate: f64,
    ) -> Result<FeatureVector> {
        let temporal_aggregator = TemporalAggregator::new(frame_rate)?;
        let cycles = segmentation.require_cycles()?;

        let spatial = SpatialAggregator::new(&self.config.aggregation).aggregate(cycles)?;
        let temporal = temporal_aggregator.aggregate(cycles)?;
        let wavelet = WaveletAggregator::new().aggregate(cycles)?;

        Ok(FeatureVector {
            spatial,
            temporal,
            wavelet: wavelet.cycles,
            excluded_wavelet_cycles: wavelet.excluded_cycles,
            cycle_count: segmentation.step_count(),
            frames_read: segmentation.frames_read,
            frames_discarded: segmentation.frames_discarded,
        })
    }

    /// Configured frame rate, falling back to the source metadata
    pub fn frame_rate_for<S: FrameSource>(&self, source: &S) -> f64 {
        self.config
            .aggregation
            .frame_rate
            .unwrap_or_else(|| source.frame_rate())
    }

    /// Full pipeline: measure, segment, aggregate
    pub fn run<S: FrameSource>(&self, source: &mut S) -> Result<GaitReport> {
        let frame_rate = self.frame_rate_for(source);
        // Reject a bad frame rate before decoding the clip
        TemporalAggregator::new(frame_rate)?;

        let segmentation = self.segment(source)?;
        let features = self.extract_features(&segmentation, frame_rate)?;

        tracing::info!(
            frames = segmentation.frames_read,
            cycles = segmentation.step_count(),
            discarded = segmentation.frames_discarded,
            "gait analysis complete"
        );

        Ok(GaitReport {
            segmentation,
            features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gait_core::{Error, FootSeparation};
    use gait_vision::VecFrameSource;
    use image::Rgb;

    fn walker_frame(stride: u32) -> RgbImage {
        let mut frame = RgbImage::new(320, 240);
        let white = Rgb([255, 255, 255]);
        // Body
        for y in 60..180 {
            for x in 150..170 {
                frame.put_pixel(x, y, white);
            }
        }
        // Feet, symmetric about x = 160
        let left = 160 - stride / 2 - 5;
        let right = 160 + stride / 2 - 5;
        for y in 205..225 {
            for x in 0..10 {
                frame.put_pixel(left + x, y, white);
                frame.put_pixel(right + x, y, white);
            }
        }
        frame
    }

    #[test]
    fn test_measure_frame() {
        let analyzer = GaitAnalyzer::new(GaitConfig::default()).unwrap();
        let m = analyzer.measure_frame(3, &walker_frame(60));

        assert_eq!(m.index, 3);
        assert!(matches!(m.separation, FootSeparation::TwoFeet(..)));
        assert!((m.stride_distance - 60.0).abs() < 1e-9);
        // Body and two feet
        assert_eq!(m.bounding_boxes.len(), 3);
        // 2800 white pixels; the orthonormal approx band sums to half the mass
        assert!((m.wavelet.approx - 2800.0 * 255.0 / 2.0).abs() < 1e-6);
        assert!(m.wavelet.horizontal.abs() < 1e-6);
        assert!(m.wavelet.vertical.abs() < 1e-6);
    }

    #[test]
    fn test_run_on_synthetic_walk() {
        let strides = [20, 40, 60, 80, 60, 40, 20, 40, 60, 80, 70, 40];
        let frames = strides.iter().map(|&s| walker_frame(s)).collect();
        let mut source = VecFrameSource::new(frames, 25.0);

        let analyzer = GaitAnalyzer::new(GaitConfig::default()).unwrap();
        let report = analyzer.run(&mut source).unwrap();

        assert_eq!(report.segmentation.step_count(), 2);
        assert_eq!(report.features.cycle_count, 2);
        assert_eq!(report.features.frames_read, strides.len());
        assert!((report.features.temporal.step_length - 80.0).abs() < 1e-9);
        assert_eq!(report.features.wavelet.len(), 2);
        assert!(report.features.to_flat_vector().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_single_frame_cycles_keep_geometry_features() {
        let mut config = GaitConfig::default();
        config.segmenter.warmup_samples = 1;
        let analyzer = GaitAnalyzer::new(config).unwrap();

        let strides = [120, 100, 80, 60, 50];
        let frames = strides.iter().map(|&s| walker_frame(s)).collect();
        let mut source = VecFrameSource::new(frames, 30.0);
        let report = analyzer.run(&mut source).unwrap();

        let features = &report.features;
        assert_eq!(features.cycle_count, 4);
        assert!(features.wavelet.is_empty());
        assert_eq!(features.excluded_wavelet_cycles, vec![0, 1, 2, 3]);
        assert!((features.temporal.step_length - 90.0).abs() < 1e-9);
        assert!((features.temporal.cadence - 30.0).abs() < 1e-9);
        assert!(features.spatial.height > 0.0);
        assert_eq!(features.to_flat_vector().len(), 8);
    }

    #[test]
    fn test_repeated_frame_does_not_crash() {
        let frames = vec![walker_frame(50); 8];
        let mut source = VecFrameSource::new(frames, 30.0);

        let analyzer = GaitAnalyzer::new(GaitConfig::default()).unwrap();
        let err = analyzer.run(&mut source).unwrap_err();
        assert!(matches!(err, Error::NoCyclesDetected { frames_read: 8 }));
    }

    #[test]
    fn test_empty_source() {
        let mut source = VecFrameSource::new(Vec::new(), 30.0);
        let analyzer = GaitAnalyzer::new(GaitConfig::default()).unwrap();
        let err = analyzer.run(&mut source).unwrap_err();
        assert!(err.is_empty_source());
    }

    #[test]
    fn test_frame_rate_override() {
        let mut config = GaitConfig::default();
        config.aggregation.frame_rate = Some(50.0);
        let analyzer = GaitAnalyzer::new(config).unwrap();

        let source = VecFrameSource::new(Vec::new(), 25.0);
        assert_eq!(analyzer.frame_rate_for(&source), 50.0);
    }

    #[test]
    fn test_invalid_source_frame_rate() {
        let mut source = VecFrameSource::new(vec![walker_frame(40)], 0.0);
        let analyzer = GaitAnalyzer::new(GaitConfig::default()).unwrap();
        assert!(matches!(
            analyzer.run(&mut source),
            Err(Error::InvalidFrameRate(_))
        ));
    }
}
