//! Constant Sobel-Feldman kernel bank.
//!
//! `SOBEL_FELDMAN[axis][offset]` is the 3×3 plane applied to the slice at
//! `offset` (previous, current, next) when estimating the derivative along
//! `axis`. Planes are correlated with the 3×3 neighbourhood, not flipped.
use crate::image::{ImageView, Slice};

pub type Kernel3 = [[i32; 3]; 3];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Along columns.
    X = 0,
    /// Along rows.
    Y = 1,
    /// Along the slice stack.
    Z = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliceOffset {
    Previous = 0,
    Current = 1,
    Next = 2,
}

const X_OUTER: Kernel3 = [[1, 0, -1], [2, 0, -2], [1, 0, -1]];
const X_CENTRE: Kernel3 = [[2, 0, -2], [4, 0, -4], [2, 0, -2]];
const Y_OUTER: Kernel3 = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];
const Y_CENTRE: Kernel3 = [[2, 4, 2], [0, 0, 0], [-2, -4, -2]];
const Z_PREV: Kernel3 = [[1, 2, 1], [2, 4, 2], [1, 2, 1]];
const Z_CENTRE: Kernel3 = [[0; 3]; 3];
const Z_NEXT: Kernel3 = [[-1, -2, -1], [-2, -4, -2], [-1, -2, -1]];

pub const SOBEL_FELDMAN: [[Kernel3; 3]; 3] = [
    [X_OUTER, X_CENTRE, X_OUTER],
    [Y_OUTER, Y_CENTRE, Y_OUTER],
    [Z_PREV, Z_CENTRE, Z_NEXT],
];

#[inline]
pub fn kernel(axis: Axis, offset: SliceOffset) -> &'static Kernel3 {
    &SOBEL_FELDMAN[axis as usize][offset as usize]
}

/// `(Gx, Gy, Gz)` at (row, col) for the `[previous, current, next]` slice
/// triple. The caller guarantees `1 <= row < h-1` and `1 <= col < w-1`.
pub fn gradient_at(triple: [&Slice<i32>; 3], row: usize, col: usize) -> [i64; 3] {
    let mut g = [0i64; 3];
    for (offset, slice) in triple.iter().enumerate() {
        for ky in 0..3 {
            let window = &slice.row(row + ky - 1)[col - 1..col + 2];
            for (kx, &v) in window.iter().enumerate() {
                let v = i64::from(v);
                for (axis, acc) in g.iter_mut().enumerate() {
                    *acc += v * i64::from(SOBEL_FELDMAN[axis][offset][ky][kx]);
                }
            }
        }
    }
    g
}

/// `floor(sqrt(Gx² + Gy² + Gz²))`, squared in `f64` and saturated to
/// `i32::MAX`.
#[inline]
pub fn gradient_magnitude(g: [i64; 3]) -> i32 {
    let sq = g
        .iter()
        .map(|&c| {
            let c = c as f64;
            c * c
        })
        .sum::<f64>();
    sq.sqrt().min(f64::from(i32::MAX)) as i32
}
