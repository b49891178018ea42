#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod volume;

// Stage modules, public for tools and tests that drive stages one by one.
pub mod blur;
pub mod edges;
pub mod gradient;

// Tool-side helpers.
pub mod config;
pub mod evaluation;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + parameters.
pub use crate::detector::{detect_edges, CannyParams, VolumeCannyDetector};
pub use crate::error::{CannyError, Result};
pub use crate::volume::{Volume, VoxelCoordinate};

// Diagnostics returned by the detector.
pub use crate::diagnostics::{DetectionReport, DetectionSummary};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use canny3d::prelude::*;
///
/// # fn main() -> canny3d::Result<()> {
/// let (w, h) = (64usize, 48usize);
/// let gray = vec![0u8; w * h];
/// let frames: Vec<FrameU8> = (0..5).map(|_| FrameU8::new(w, h, &gray)).collect();
/// let volume = Volume::from_frames(&frames)?;
///
/// let edges = VolumeCannyDetector::new(CannyParams::default()).detect(&volume)?;
/// println!("edges={}", edges.count(|v| v == 255));
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{FrameU8, Slice};
    pub use crate::{CannyError, CannyParams, Volume, VolumeCannyDetector, VoxelCoordinate};
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    // Stage runners in pipeline order.
    pub use crate::blur::{blur_volume, GaussianKernel3};
    pub use crate::edges::{double_threshold, suppress_non_maxima, track_edges, EdgeLabel};
    pub use crate::gradient::{GradientBuffers, GradientField};

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        visualize_directions, StageArtifacts, StageTiming, TimingBreakdown,
    };
}
