//! Non-maximum suppression along the quantized 3D gradient direction.
//!
//! For an interior voxel with direction `(dx, dy, dz)` the in-plane offset is
//! negated when `dz == 1`, so the comparison always runs toward increasing
//! slice index. The voxel is zeroed when its magnitude is strictly below
//! either
//! - the previous-neighbour magnitude at `(row + dy, col + dx)`, or
//! - the next-neighbour magnitude at `(row - dy, col - dx)`.
//!
//! Comparisons read the unsuppressed magnitudes. Each interior slice is then
//! min-max normalised on its own into `[0, 255]`. The one-pixel in-plane
//! frame is never suppressed, and slices `0` and `N-1` are copied through.
use crate::gradient::GradientField;
use crate::image::{ImageView, Slice};
use crate::volume::Volume;

/// Suppress non-maxima and rescale each slice to 8-bit range.
pub fn suppress_non_maxima(field: &mut GradientField) -> Volume<u8> {
    let buffers = field.buffers();
    let magnitude = &buffers.magnitude;
    let interior = magnitude.interior_slices();

    let slices: Vec<Slice<u8>> = (0..magnitude.depth())
        .map(|index| {
            let mag = magnitude.slice(index);
            if !interior.contains(&index) {
                return mag.map(saturate_u8);
            }
            let (h, w) = mag.dims();
            let dir_x = buffers.dir_x.slice(index);
            let dir_y = buffers.dir_y.slice(index);
            let dir_z = buffers.dir_z.slice(index);
            let prev = buffers.prev_neighbor.slice(index);
            let next = buffers.next_neighbor.slice(index);

            let mut suppressed = mag.clone();
            for row in 1..h.saturating_sub(1) {
                for col in 1..w.saturating_sub(1) {
                    let mut dx = dir_x.get(row, col) as isize;
                    let mut dy = dir_y.get(row, col) as isize;
                    if dir_z.get(row, col) == 1 {
                        dx = -dx;
                        dy = -dy;
                    }
                    let m = mag.get(row, col);
                    let ahead = prev.get(offset(row, dy), offset(col, dx));
                    let behind = next.get(offset(row, -dy), offset(col, -dx));
                    if m < ahead || m < behind {
                        suppressed.set(row, col, 0);
                    }
                }
            }
            normalize_min_max(&suppressed)
        })
        .collect();

    Volume::from_parts(slices)
}

#[inline]
fn offset(base: usize, delta: isize) -> usize {
    (base as isize + delta) as usize
}

#[inline]
fn saturate_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Linearly map `[min, max]` of the slice onto `[0, 255]`, rounding half to
/// even. A constant slice maps to all zeros.
pub fn normalize_min_max(slice: &Slice<i32>) -> Slice<u8> {
    let min = slice.data.iter().copied().min().unwrap_or(0);
    let max = slice.data.iter().copied().max().unwrap_or(0);
    if max == min {
        return Slice::new(slice.w, slice.h);
    }
    let scale = 255.0 / (f64::from(max) - f64::from(min));
    slice.map(|v| {
        let scaled = (f64::from(v) - f64::from(min)) * scale;
        saturate_u8(scaled.round_ties_even() as i32)
    })
}
