//! Memoized gradient field over a blurred volume.
//!
//! The field starts uncomputed. The first accessor call evaluates every
//! interior slice once; later calls return the cached buffers.
//!
//! Per interior voxel three magnitudes are computed:
//! - the gradient on `[prev, this, next]`, with its quantized direction;
//! - the "previous neighbour" magnitude on `[prev_prev, prev, this]`;
//! - the "next neighbour" magnitude on `[this, next, next_next]`.
//!
//! The neighbour magnitudes approximate the response half a step along the
//! stack and are what non-maximum suppression compares against.
use super::direction::{quantize_direction, DirectionVector};
use super::interpolate::extrapolate_neighbors;
use super::kernels::{gradient_at, gradient_magnitude};
use crate::error::{CannyError, Result};
use crate::image::{ImageView, Slice};
use crate::volume::{Volume, VoxelCoordinate};
use log::debug;
use nalgebra::Vector3;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Cached outputs of the gradient stage, all shaped like the input volume.
#[derive(Clone, Debug)]
pub struct GradientBuffers {
    /// `floor(|G|)` per voxel.
    pub magnitude: Volume<i32>,
    /// Direction component along columns.
    pub dir_x: Volume<i8>,
    /// Direction component along rows.
    pub dir_y: Volume<i8>,
    /// Direction component along the stack.
    pub dir_z: Volume<i8>,
    /// Magnitude on the `[prev_prev, prev, this]` triple.
    pub prev_neighbor: Volume<i32>,
    /// Magnitude on the `[this, next, next_next]` triple.
    pub next_neighbor: Volume<i32>,
}

impl GradientBuffers {
    /// Stored direction at `at`; `None` where the gradient vanished.
    pub fn direction_at(&self, at: VoxelCoordinate) -> Option<DirectionVector> {
        let d = DirectionVector::new(self.dir_x.get(at), self.dir_y.get(at), self.dir_z.get(at));
        (d != DirectionVector::new(0, 0, 0)).then_some(d)
    }
}

enum FieldState {
    Uncomputed,
    Computed(GradientBuffers),
}

/// Sobel-Feldman gradient field computed lazily from an owned volume.
pub struct GradientField {
    volume: Volume<i32>,
    coef: f64,
    state: FieldState,
}

impl GradientField {
    /// Take ownership of `volume`; `coef` must be finite and non-negative.
    pub fn new(volume: Volume<i32>, coef: f64) -> Result<Self> {
        if !coef.is_finite() || coef < 0.0 {
            return Err(CannyError::invalid(format!(
                "interpolation coefficient must be finite and >= 0, got {coef}"
            )));
        }
        Ok(Self {
            volume,
            coef,
            state: FieldState::Uncomputed,
        })
    }

    pub fn volume(&self) -> &Volume<i32> {
        &self.volume
    }

    pub fn coefficient(&self) -> f64 {
        self.coef
    }

    pub fn is_computed(&self) -> bool {
        matches!(self.state, FieldState::Computed(_))
    }

    fn ensure_computed(&mut self) -> &GradientBuffers {
        if let FieldState::Uncomputed = self.state {
            let start = Instant::now();
            let buffers = compute_buffers(&self.volume, self.coef);
            let (depth, h, w) = self.volume.dims();
            debug!(
                "GradientField computed {}x{}x{} coef={} in {:.3} ms",
                depth,
                h,
                w,
                self.coef,
                start.elapsed().as_secs_f64() * 1000.0
            );
            self.state = FieldState::Computed(buffers);
        }
        match &self.state {
            FieldState::Computed(buffers) => buffers,
            FieldState::Uncomputed => unreachable!("gradient field populated above"),
        }
    }

    /// Evaluate the field now instead of on first access. No-op once computed.
    pub fn compute(&mut self) {
        self.ensure_computed();
    }

    /// All cached buffers, computing them on first use.
    pub fn buffers(&mut self) -> &GradientBuffers {
        self.ensure_computed()
    }

    pub fn magnitude(&mut self) -> &Volume<i32> {
        &self.ensure_computed().magnitude
    }

    pub fn direction_x(&mut self) -> &Volume<i8> {
        &self.ensure_computed().dir_x
    }

    pub fn direction_y(&mut self) -> &Volume<i8> {
        &self.ensure_computed().dir_y
    }

    pub fn direction_z(&mut self) -> &Volume<i8> {
        &self.ensure_computed().dir_z
    }

    /// `(previous-neighbour, next-neighbour)` magnitudes.
    pub fn neighbor_magnitudes(&mut self) -> (&Volume<i32>, &Volume<i32>) {
        let buffers = self.ensure_computed();
        (&buffers.prev_neighbor, &buffers.next_neighbor)
    }

    /// Consume the field, computing it first if needed.
    pub fn into_buffers(mut self) -> GradientBuffers {
        self.ensure_computed();
        match self.state {
            FieldState::Computed(buffers) => buffers,
            FieldState::Uncomputed => unreachable!("gradient field populated above"),
        }
    }
}

struct SliceGradient {
    index: usize,
    magnitude: Slice<i32>,
    dir_x: Slice<i8>,
    dir_y: Slice<i8>,
    dir_z: Slice<i8>,
    prev_neighbor: Slice<i32>,
    next_neighbor: Slice<i32>,
}

fn compute_buffers(volume: &Volume<i32>, coef: f64) -> GradientBuffers {
    let interior: Vec<usize> = volume.interior_slices().collect();

    #[cfg(feature = "parallel")]
    let slices: Vec<SliceGradient> = interior
        .par_iter()
        .map(|&index| compute_slice(volume, index, coef))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let slices: Vec<SliceGradient> = interior
        .iter()
        .map(|&index| compute_slice(volume, index, coef))
        .collect();

    let mut buffers = GradientBuffers {
        magnitude: Volume::zeros_like(volume),
        dir_x: Volume::zeros_like(volume),
        dir_y: Volume::zeros_like(volume),
        dir_z: Volume::zeros_like(volume),
        prev_neighbor: Volume::zeros_like(volume),
        next_neighbor: Volume::zeros_like(volume),
    };
    for s in slices {
        *buffers.magnitude.slice_mut(s.index) = s.magnitude;
        *buffers.dir_x.slice_mut(s.index) = s.dir_x;
        *buffers.dir_y.slice_mut(s.index) = s.dir_y;
        *buffers.dir_z.slice_mut(s.index) = s.dir_z;
        *buffers.prev_neighbor.slice_mut(s.index) = s.prev_neighbor;
        *buffers.next_neighbor.slice_mut(s.index) = s.next_neighbor;
    }
    buffers
}

fn compute_slice(volume: &Volume<i32>, index: usize, coef: f64) -> SliceGradient {
    let this = volume.slice(index);
    let (h, w) = this.dims();
    let n = extrapolate_neighbors(volume, index, coef);

    let mut out = SliceGradient {
        index,
        magnitude: Slice::new(w, h),
        dir_x: Slice::new(w, h),
        dir_y: Slice::new(w, h),
        dir_z: Slice::new(w, h),
        prev_neighbor: Slice::new(w, h),
        next_neighbor: Slice::new(w, h),
    };

    for row in 1..h.saturating_sub(1) {
        for col in 1..w.saturating_sub(1) {
            let g = gradient_at([&n.prev, this, &n.next], row, col);
            out.magnitude.set(row, col, gradient_magnitude(g));
            let gv = Vector3::new(g[0] as f64, g[1] as f64, g[2] as f64);
            if let Some(d) = quantize_direction(&gv) {
                out.dir_x.set(row, col, d.dx);
                out.dir_y.set(row, col, d.dy);
                out.dir_z.set(row, col, d.dz);
            }

            let g_prev = gradient_at([&n.prev_prev, &n.prev, this], row, col);
            out.prev_neighbor.set(row, col, gradient_magnitude(g_prev));
            let g_next = gradient_at([this, &n.next, &n.next_next], row, col);
            out.next_neighbor.set(row, col, gradient_magnitude(g_next));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Columns step from 0 to 90 between col 1 and col 2 on every slice.
    fn column_step(depth: usize) -> Volume<i32> {
        let mut slice = Slice::new(4, 4);
        for row in 0..4 {
            for col in 2..4 {
                slice.set(row, col, 90);
            }
        }
        Volume::from_slices(vec![slice; depth]).expect("uniform shape")
    }

    #[test]
    fn negative_or_nan_coefficient_is_rejected() {
        for coef in [-0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                GradientField::new(column_step(3), coef),
                Err(CannyError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn computes_once_and_caches() {
        let mut field = GradientField::new(column_step(3), 1e-5).expect("field");
        assert!(!field.is_computed());
        let first = field.magnitude() as *const Volume<i32>;
        assert!(field.is_computed());
        let second = field.magnitude() as *const Volume<i32>;
        assert_eq!(first, second);
        let (prev, _) = field.neighbor_magnitudes();
        assert_eq!(prev.dims(), (3, 4, 4));
    }

    #[test]
    fn explicit_compute_fills_the_cache_once() {
        let mut field = GradientField::new(column_step(3), 1e-5).expect("field");
        field.compute();
        assert!(field.is_computed());
        let first = field.magnitude() as *const Volume<i32>;
        field.compute();
        assert_eq!(first, field.magnitude() as *const Volume<i32>);
    }

    #[test]
    fn saturated_16bit_slices_do_not_overflow() {
        let slices = vec![
            Slice::filled(4, 4, 0),
            Slice::filled(4, 4, 0),
            Slice::filled(4, 4, 65535),
        ];
        let volume = Volume::from_slices(slices).expect("stack");
        let mut field = GradientField::new(volume, 1e4).expect("field");
        let at = VoxelCoordinate::new(1, 1, 1);
        // next is ~6.6e8, so Gz is ~1e10: past i32, and past i64 once squared
        assert_eq!(field.magnitude().get(at), i32::MAX);
        let (prev, next) = field.neighbor_magnitudes();
        assert_eq!(prev.get(at), 0);
        assert_eq!(next.get(at), i32::MAX);
    }

    #[test]
    fn column_step_points_along_x() {
        let mut field = GradientField::new(column_step(3), 1e-5).expect("field");
        let buffers = field.buffers().clone();
        // window over cols 0..=2 at col 1: (0 - 90) * 4 per outer plane, * 8 centre
        let at = VoxelCoordinate::new(1, 1, 1);
        assert_eq!(buffers.magnitude.get(at), 1440);
        assert_eq!(buffers.direction_at(at), Some(DirectionVector::new(-1, 0, 0)));
        assert_eq!(buffers.prev_neighbor.get(at), 1440);
        assert_eq!(buffers.next_neighbor.get(at), 1440);
        assert_eq!(buffers.magnitude.get(VoxelCoordinate::new(1, 2, 2)), 1440);
    }

    #[test]
    fn boundary_slices_and_border_stay_zero() {
        let mut field = GradientField::new(column_step(4), 1.0).expect("field");
        let magnitude = field.magnitude().clone();
        for index in [0usize, 3] {
            assert!(magnitude.slice(index).data.iter().all(|&v| v == 0));
        }
        for index in 1..3 {
            let s = magnitude.slice(index);
            for k in 0..4 {
                assert_eq!(s.get(0, k), 0);
                assert_eq!(s.get(3, k), 0);
                assert_eq!(s.get(k, 0), 0);
                assert_eq!(s.get(k, 3), 0);
            }
        }
        assert!(field.direction_z().slice(0).data.iter().all(|&v| v == 0));
    }

    #[test]
    fn slice_step_sets_z_direction() {
        let slices = vec![
            Slice::filled(3, 3, 0),
            Slice::filled(3, 3, 0),
            Slice::filled(3, 3, 10),
        ];
        let volume = Volume::from_slices(slices).expect("stack");
        let mut field = GradientField::new(volume, 1.0).expect("field");
        let at = VoxelCoordinate::new(1, 1, 1);
        // Gz = 16 * prev - 16 * next = -160
        assert_eq!(field.magnitude().get(at), 160);
        assert_eq!(field.direction_z().get(at), -1);
        assert_eq!(field.direction_x().get(at), 0);
        assert_eq!(field.direction_y().get(at), 0);
        // [this, next, next_next] = [0, 10, 20]
        assert_eq!(field.neighbor_magnitudes().1.get(at), 320);
        // [prev_prev, prev, this] = [0, 0, 0]
        assert_eq!(field.neighbor_magnitudes().0.get(at), 0);
    }
}
