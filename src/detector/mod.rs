//! Volumetric Canny detector.
//!
//! Stages, each producing a new volume shaped like its input:
//! 1. 3D Gaussian blur ([`crate::blur`]).
//! 2. Sobel-Feldman gradient with slice extrapolation ([`crate::gradient`]).
//! 3. Non-maximum suppression along the quantized direction, normalised per
//!    slice to `[0, 255]`.
//! 4. Double threshold into background / candidate / strong.
//! 5. 26-connected hysteresis tracking; the result holds only 0 and 255.
//!
//! Modules
//! - [`params`] – [`CannyParams`] used by the detector and the CLI.
//! - `pipeline` – the [`VolumeCannyDetector`] driver.

pub mod params;
mod pipeline;

pub use params::CannyParams;
pub use pipeline::{detect_edges, VolumeCannyDetector};
