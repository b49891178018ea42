//! Parameters of the volumetric Canny pipeline.
//!
//! All fields have defaults, so a config file may specify any subset.
use crate::error::{check_kernel_size, CannyError, Result};
use serde::{Deserialize, Serialize};

/// Thresholds, interpolation strength and blur size for one detector run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    /// Suppressed values below this become background.
    pub low_threshold: i32,
    /// Suppressed values above this become strong edges.
    pub high_threshold: i32,
    /// Slice extrapolation coefficient used by the gradient stage (>= 0).
    pub interpolation_coef: f64,
    /// Edge length of the cubic Gaussian kernel (odd, >= 1).
    pub blur_kernel_size: usize,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low_threshold: 50,
            high_threshold: 150,
            interpolation_coef: 1e-5,
            blur_kernel_size: 5,
        }
    }
}

impl CannyParams {
    pub fn with_thresholds(mut self, low: i32, high: i32) -> Self {
        self.low_threshold = low;
        self.high_threshold = high;
        self
    }

    pub fn with_interpolation_coef(mut self, coef: f64) -> Self {
        self.interpolation_coef = coef;
        self
    }

    pub fn with_blur_kernel_size(mut self, ksize: usize) -> Self {
        self.blur_kernel_size = ksize;
        self
    }

    /// Reject parameters no stage can run with. `low > high` is allowed.
    pub fn validate(&self) -> Result<()> {
        check_kernel_size(self.blur_kernel_size)?;
        if !self.interpolation_coef.is_finite() || self.interpolation_coef < 0.0 {
            return Err(CannyError::invalid(format!(
                "interpolation coefficient must be finite and >= 0, got {}",
                self.interpolation_coef
            )));
        }
        Ok(())
    }
}
