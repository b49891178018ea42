//! 3D Sobel-Feldman gradients with slice interpolation.
//!
//! - [`kernels`]: the constant 3×3×3 kernel bank, one 3×3 plane per axis and
//!   slice offset.
//! - [`direction`]: quantization of a gradient to the nearest of the 26
//!   neighbour directions.
//! - [`interpolate`]: synthetic neighbour slices extrapolated along the stack
//!   with the interpolation coefficient.
//! - [`field`]: the memoized [`GradientField`] consumed by non-maximum
//!   suppression.
//!
//! Gradients are only evaluated on interior slices and on voxels at least one
//! pixel away from the in-plane border; everything else stays zero.

pub mod direction;
pub mod field;
pub mod interpolate;
pub mod kernels;

pub use direction::{quantize_direction, DirectionVector};
pub use field::{GradientBuffers, GradientField};
pub use interpolate::{extrapolate_neighbors, NeighborSlices};
pub use kernels::{gradient_at, gradient_magnitude, Axis, SliceOffset, SOBEL_FELDMAN};
