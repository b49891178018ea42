//! Three-dimensional Gaussian smoothing of a voxel volume.
//!
//! The stack is padded along the slice axis with `ksize / 2` all-zero
//! slices on each end, so every input slice has a full neighbourhood in
//! depth. In-plane there is no padding: voxels closer than `ksize / 2` to a
//! row or column edge keep their input value.
//!
//! Output intensities are rounded half to even; the gradient stage works on
//! integer slices.
use crate::error::{check_kernel_size, CannyError, Result};
use crate::image::{ImageView, ImageViewMut, Slice};
use crate::volume::Volume;
use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Isotropic `size³` Gaussian kernel, normalised to unit sum.
///
/// Weights are stored plane by plane (slice offset), each plane row-major.
#[derive(Clone, Debug)]
pub struct GaussianKernel3 {
    size: usize,
    sigma: f64,
    weights: Vec<f64>,
}

impl GaussianKernel3 {
    pub fn new(size: usize) -> Result<Self> {
        check_kernel_size(size)?;
        let sigma = Self::sigma_for_size(size);
        let radius = (size / 2) as f64;
        let denom = 2.0 * sigma * sigma;

        let mut weights = Vec::with_capacity(size * size * size);
        for z in 0..size {
            for y in 0..size {
                for x in 0..size {
                    let (dz, dy, dx) = (z as f64 - radius, y as f64 - radius, x as f64 - radius);
                    weights.push((-(dx * dx + dy * dy + dz * dz) / denom).exp());
                }
            }
        }
        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Ok(Self {
            size,
            sigma,
            weights,
        })
    }

    /// Standard deviation derived from the kernel size, the same heuristic
    /// OpenCV applies when sigma is left unspecified.
    pub fn sigma_for_size(size: usize) -> f64 {
        0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn radius(&self) -> usize {
        self.size / 2
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Row-major `size × size` weights applied to the slice at offset `z`.
    pub fn plane(&self, z: usize) -> &[f64] {
        let n = self.size * self.size;
        &self.weights[z * n..(z + 1) * n]
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// Smooth `volume` with a `ksize³` Gaussian and return integer intensities.
///
/// Fails with [`CannyError::InvalidArgument`] for even or zero `ksize` and
/// with [`CannyError::EmptyInput`] for a volume without voxels.
pub fn blur_volume<T>(volume: &Volume<T>, ksize: usize) -> Result<Volume<i32>>
where
    T: Copy + Into<f64>,
{
    let kernel = GaussianKernel3::new(ksize)?;
    let (depth, h, w) = volume.dims();
    if depth == 0 || h == 0 || w == 0 {
        return Err(CannyError::EmptyInput);
    }
    if ksize > h || ksize > w {
        debug!(
            "blur_volume kernel {}x{}x{} exceeds slice {}x{}, no voxel is smoothed",
            ksize, ksize, ksize, h, w
        );
    }

    let converted: Vec<Slice<f64>> = volume
        .slices()
        .iter()
        .map(|s| s.map(|v| v.into()))
        .collect();
    let zero = Slice::<f64>::new(w, h);
    let radius = kernel.radius();
    let mut padded: Vec<&Slice<f64>> = Vec::with_capacity(depth + 2 * radius);
    padded.extend(std::iter::repeat(&zero).take(radius));
    padded.extend(converted.iter());
    padded.extend(std::iter::repeat(&zero).take(radius));

    #[cfg(feature = "parallel")]
    let slices: Vec<Slice<i32>> = (0..depth)
        .into_par_iter()
        .map(|index| blur_slice(&padded, index, &kernel))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let slices: Vec<Slice<i32>> = (0..depth)
        .map(|index| blur_slice(&padded, index, &kernel))
        .collect();

    Volume::from_slices(slices)
}

/// Smooth output slice `index`; `padded[index + radius]` is its source.
fn blur_slice(padded: &[&Slice<f64>], index: usize, kernel: &GaussianKernel3) -> Slice<i32> {
    let size = kernel.size();
    let radius = kernel.radius();
    let src = padded[index + radius];
    let (h, w) = src.dims();
    let mut out = src.map(|v| v.round_ties_even() as i32);
    if h < size || w < size {
        return out;
    }

    let window = &padded[index..index + size];
    for y in radius..h - radius {
        let dst_row = out.row_mut(y);
        for x in radius..w - radius {
            let mut acc = 0.0f64;
            for (kz, plane_src) in window.iter().enumerate() {
                let plane = kernel.plane(kz);
                for ky in 0..size {
                    let src_row = &plane_src.row(y + ky - radius)[x - radius..x - radius + size];
                    let taps = &plane[ky * size..(ky + 1) * size];
                    acc += src_row
                        .iter()
                        .zip(taps.iter())
                        .map(|(&v, &t)| v * t)
                        .sum::<f64>();
                }
            }
            dst_row[x] = acc.round_ties_even() as i32;
        }
    }
    out
}
