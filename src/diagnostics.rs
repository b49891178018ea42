//! Stage timings, intermediate artifacts and the serializable run summary.
use crate::detector::CannyParams;
use crate::edges::EdgeLabel;
use crate::gradient::GradientField;
use crate::image::ImageView;
use crate::volume::{Volume, VoxelCoordinate};
use serde::{Deserialize, Serialize};

/// Timing entry describing a single stage of the pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one detector run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

/// Volumes captured between stages, for inspection and dumping to disk.
#[derive(Clone, Debug)]
pub struct StageArtifacts {
    pub blurred: Volume<i32>,
    pub gradient: Volume<i32>,
    /// Sparse direction sketch, see [`visualize_directions`].
    pub directions: Volume<u8>,
    pub suppressed: Volume<u8>,
    pub thresholded: Volume<u8>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSummary {
    pub depth: usize,
    pub height: usize,
    pub width: usize,
    pub params: CannyParams,
    /// Strong voxels per slice in the final map (boundary slices are 0).
    pub edges_per_slice: Vec<usize>,
    pub edge_voxels: usize,
    pub timings: TimingBreakdown,
}

impl DetectionSummary {
    pub fn from_edges(edges: &Volume<u8>, params: &CannyParams, timings: TimingBreakdown) -> Self {
        let strong = EdgeLabel::Strong.as_u8();
        let edges_per_slice: Vec<usize> = edges
            .slices()
            .iter()
            .map(|s| s.data.iter().filter(|&&v| v == strong).count())
            .collect();
        let (depth, height, width) = edges.dims();
        Self {
            depth,
            height,
            width,
            params: params.clone(),
            edge_voxels: edges_per_slice.iter().sum(),
            edges_per_slice,
            timings,
        }
    }
}

/// Result of [`VolumeCannyDetector::detect_with_diagnostics`](crate::VolumeCannyDetector).
#[derive(Clone, Debug)]
pub struct DetectionReport {
    /// Final edge map, values in `{0, 255}`.
    pub edges: Volume<u8>,
    pub artifacts: Option<StageArtifacts>,
    pub summary: DetectionSummary,
}

/// Sketch of the quantized directions on an empty background.
///
/// Every `step`-th interior voxel (rows and columns counted from 1) is marked
/// together with its in-plane direction neighbour `(row + dy, col + dx)`.
pub fn visualize_directions(field: &mut GradientField, step: usize) -> Volume<u8> {
    let step = step.max(1);
    let buffers = field.buffers();
    let mut out: Volume<u8> = Volume::zeros_like(&buffers.magnitude);
    let (_, h, w) = out.dims();
    for slice in out.interior_slices() {
        let dir_x = buffers.dir_x.slice(slice);
        let dir_y = buffers.dir_y.slice(slice);
        for row in (1..h.saturating_sub(1)).step_by(step) {
            for col in (1..w.saturating_sub(1)).step_by(step) {
                let r = (row as isize + dir_y.pixel(row, col) as isize) as usize;
                let c = (col as isize + dir_x.pixel(row, col) as isize) as usize;
                out.set(VoxelCoordinate::new(slice, r, c), 255);
                out.set(VoxelCoordinate::new(slice, row, col), 255);
            }
        }
    }
    out
}
