//! Pipeline driver running the five detector stages end-to-end.
//!
//! ```no_run
//! use canny3d::{CannyParams, Volume, VolumeCannyDetector};
//!
//! # fn example(volume: Volume<u8>) -> canny3d::Result<()> {
//! let detector = VolumeCannyDetector::new(CannyParams::default().with_thresholds(10, 50));
//! let report = detector.detect_with_diagnostics(&volume)?;
//! println!("{} edge voxels", report.summary.edge_voxels);
//! # Ok(())
//! # }
//! ```
use super::params::CannyParams;
use crate::blur::blur_volume;
use crate::diagnostics::{
    visualize_directions, DetectionReport, DetectionSummary, StageArtifacts, TimingBreakdown,
};
use crate::edges::{double_threshold, suppress_non_maxima, track_edges};
use crate::error::{CannyError, Result};
use crate::gradient::GradientField;
use crate::volume::Volume;
use log::debug;
use std::time::Instant;

/// Spacing of the sampled voxels in the direction sketch artifact.
const DIRECTION_SKETCH_STEP: usize = 10;

/// Volumetric Canny detector: blur, gradient, suppression, double threshold
/// and hysteresis tracking.
#[derive(Clone, Debug, Default)]
pub struct VolumeCannyDetector {
    params: CannyParams,
}

impl VolumeCannyDetector {
    pub fn new(params: CannyParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CannyParams {
        &self.params
    }

    pub fn set_params(&mut self, params: CannyParams) {
        self.params = params;
    }

    /// Edge map of `volume`, values in `{0, 255}`, boundary slices all 0.
    pub fn detect<T>(&self, volume: &Volume<T>) -> Result<Volume<u8>>
    where
        T: Copy + Into<f64>,
    {
        self.run(volume, false).map(|report| report.edges)
    }

    /// Like [`detect`](Self::detect) but also keeps every intermediate
    /// volume and a timing trace.
    pub fn detect_with_diagnostics<T>(&self, volume: &Volume<T>) -> Result<DetectionReport>
    where
        T: Copy + Into<f64>,
    {
        self.run(volume, true)
    }

    fn check_input<T: Copy>(&self, volume: &Volume<T>) -> Result<()> {
        let (depth, h, w) = volume.dims();
        if depth == 0 || h == 0 || w == 0 {
            return Err(CannyError::EmptyInput);
        }
        if depth < 3 {
            return Err(CannyError::invalid(format!(
                "at least 3 slices are required, got {depth}"
            )));
        }
        self.params.validate()
    }

    fn run<T>(&self, volume: &Volume<T>, keep_artifacts: bool) -> Result<DetectionReport>
    where
        T: Copy + Into<f64>,
    {
        self.check_input(volume)?;
        let params = &self.params;
        let (depth, h, w) = volume.dims();
        debug!(
            "VolumeCannyDetector::run start d={} h={} w={} ksize={} low={} high={}",
            depth, h, w, params.blur_kernel_size, params.low_threshold, params.high_threshold
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let stage_start = Instant::now();
        let blurred = blur_volume(volume, params.blur_kernel_size)?;
        let blur_ms = stage_start.elapsed().as_secs_f64() * 1000.0;
        timings.push("blur", blur_ms);
        debug!("VolumeCannyDetector::run blur {:.3} ms", blur_ms);
        let blurred_artifact = keep_artifacts.then(|| blurred.clone());

        let stage_start = Instant::now();
        let mut field = GradientField::new(blurred, params.interpolation_coef)?;
        field.compute();
        let gradient_ms = stage_start.elapsed().as_secs_f64() * 1000.0;
        timings.push("gradient", gradient_ms);
        let gradient = keep_artifacts.then(|| field.magnitude().clone());
        let directions =
            keep_artifacts.then(|| visualize_directions(&mut field, DIRECTION_SKETCH_STEP));

        let stage_start = Instant::now();
        let suppressed = suppress_non_maxima(&mut field);
        let nms_ms = stage_start.elapsed().as_secs_f64() * 1000.0;
        timings.push("nms", nms_ms);
        debug!(
            "VolumeCannyDetector::run gradient {:.3} ms nms {:.3} ms",
            gradient_ms, nms_ms
        );
        drop(field);
        let suppressed_artifact = keep_artifacts.then(|| suppressed.clone());

        let stage_start = Instant::now();
        let mut edges = suppressed;
        double_threshold(&mut edges, params.low_threshold, params.high_threshold);
        let threshold_ms = stage_start.elapsed().as_secs_f64() * 1000.0;
        timings.push("threshold", threshold_ms);
        let thresholded_artifact = keep_artifacts.then(|| edges.clone());

        let stage_start = Instant::now();
        track_edges(&mut edges);
        let hysteresis_ms = stage_start.elapsed().as_secs_f64() * 1000.0;
        timings.push("hysteresis", hysteresis_ms);

        timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        let summary = DetectionSummary::from_edges(&edges, params, timings);
        debug!(
            "VolumeCannyDetector::run done edges={} threshold {:.3} ms hysteresis {:.3} ms total {:.3} ms",
            summary.edge_voxels, threshold_ms, hysteresis_ms, summary.timings.total_ms
        );

        let artifacts = match (
            blurred_artifact,
            gradient,
            directions,
            suppressed_artifact,
            thresholded_artifact,
        ) {
            (
                Some(blurred),
                Some(gradient),
                Some(directions),
                Some(suppressed),
                Some(thresholded),
            ) => Some(StageArtifacts {
                blurred,
                gradient,
                directions,
                suppressed,
                thresholded,
            }),
            _ => None,
        };

        Ok(DetectionReport {
            edges,
            artifacts,
            summary,
        })
    }
}

/// Run the detector once with `params`.
pub fn detect_edges<T>(volume: &Volume<T>, params: CannyParams) -> Result<Volume<u8>>
where
    T: Copy + Into<f64>,
{
    VolumeCannyDetector::new(params).detect(volume)
}
