//! Edge decisions on top of the gradient field.
//!
//! - [`nms`]: non-maximum suppression along the quantized 3D direction with
//!   per-slice min-max normalisation to `[0, 255]`.
//! - [`threshold`]: double thresholding into strong / candidate / background.
//! - [`hysteresis`]: 26-connected region growing from strong voxels.
//!
//! All three only touch interior slices; slice `0` and `N-1` pass through.

pub mod hysteresis;
pub mod label;
pub mod nms;
pub mod threshold;

pub use hysteresis::track_edges;
pub use label::EdgeLabel;
pub use nms::{normalize_min_max, suppress_non_maxima};
pub use threshold::double_threshold;
