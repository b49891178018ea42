//! Voxel volumes: an ordered stack of equally sized slices.
//!
//! Slice `0` and slice `N-1` are context-only for every stage after the
//! blur; edge decisions are made for [`Volume::interior_slices`] only.
use crate::error::{CannyError, Result};
use crate::image::{FrameU8, ImageView, Slice};
use serde::Serialize;
use std::ops::Range;

/// Address of one voxel: slice index along the stack, then row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VoxelCoordinate {
    pub slice: usize,
    pub row: usize,
    pub col: usize,
}

impl VoxelCoordinate {
    pub const fn new(slice: usize, row: usize, col: usize) -> Self {
        Self { slice, row, col }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Volume<T> {
    slices: Vec<Slice<T>>,
}

impl<T: Copy> Volume<T> {
    /// Build a volume from owned slices, rejecting empty or ragged stacks.
    pub fn from_slices(slices: Vec<Slice<T>>) -> Result<Self> {
        let first = slices.first().ok_or(CannyError::EmptyInput)?;
        if first.w == 0 || first.h == 0 {
            return Err(CannyError::EmptyInput);
        }
        if let Some((index, bad)) = slices
            .iter()
            .enumerate()
            .find(|(_, s)| !s.same_dims(first) || s.data.len() != s.w * s.h)
        {
            return Err(CannyError::invalid(format!(
                "slice {index} is {}x{} but slice 0 is {}x{}",
                bad.h, bad.w, first.h, first.w
            )));
        }
        Ok(Self { slices })
    }

    /// Stage outputs are shaped like their input by construction.
    pub(crate) fn from_parts(slices: Vec<Slice<T>>) -> Self {
        Self { slices }
    }

    /// Constant-valued volume of `depth` slices of `h × w`.
    pub fn filled(depth: usize, h: usize, w: usize, value: T) -> Self {
        Self {
            slices: (0..depth).map(|_| Slice::filled(w, h, value)).collect(),
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.slices.len()
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.slices.first().map_or(0, |s| s.h)
    }
    #[inline]
    pub fn width(&self) -> usize {
        self.slices.first().map_or(0, |s| s.w)
    }

    /// `(depth, height, width)`.
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.depth(), self.height(), self.width())
    }

    /// Slice indices that receive edge decisions (`1..N-1`).
    pub fn interior_slices(&self) -> Range<usize> {
        1..self.depth().saturating_sub(1).max(1)
    }

    #[inline]
    pub fn get(&self, at: VoxelCoordinate) -> T {
        self.slices[at.slice].get(at.row, at.col)
    }
    #[inline]
    pub fn set(&mut self, at: VoxelCoordinate, value: T) {
        self.slices[at.slice].set(at.row, at.col, value);
    }

    pub fn slice(&self, index: usize) -> &Slice<T> {
        &self.slices[index]
    }
    pub fn slice_mut(&mut self, index: usize) -> &mut Slice<T> {
        &mut self.slices[index]
    }
    pub fn slices(&self) -> &[Slice<T>] {
        &self.slices
    }
    pub fn into_slices(self) -> Vec<Slice<T>> {
        self.slices
    }

    /// Element-wise conversion into a volume of identical shape.
    pub fn map<U: Copy, F>(&self, mut f: F) -> Volume<U>
    where
        F: FnMut(T) -> U,
    {
        Volume {
            slices: self.slices.iter().map(|s| s.map(&mut f)).collect(),
        }
    }

    /// Number of voxels satisfying `pred`.
    pub fn count<F>(&self, mut pred: F) -> usize
    where
        F: FnMut(T) -> bool,
    {
        self.slices
            .iter()
            .map(|s| s.data.iter().filter(|&&v| pred(v)).count())
            .sum()
    }

    /// Same slice count and per-slice dimensions as `other`.
    pub fn same_dims<U: Copy>(&self, other: &Volume<U>) -> bool {
        self.dims() == other.dims()
    }
}

impl<T: Copy + Default> Volume<T> {
    /// Default-initialized volume with the dimensions of `like`.
    pub fn zeros_like<U: Copy>(like: &Volume<U>) -> Self {
        Self::filled(like.depth(), like.height(), like.width(), T::default())
    }
}

impl Volume<u8> {
    /// Copy borrowed 8-bit frames into an owned volume.
    pub fn from_frames(frames: &[FrameU8<'_>]) -> Result<Self> {
        let slices = frames
            .iter()
            .enumerate()
            .map(|(index, frame)| {
                if !frame.is_complete() {
                    return Err(CannyError::invalid(format!(
                        "frame {index} buffer is shorter than stride * height"
                    )));
                }
                let mut data = Vec::with_capacity(frame.w * frame.h);
                for row in frame.rows() {
                    data.extend_from_slice(row);
                }
                Ok(Slice {
                    w: frame.w,
                    h: frame.h,
                    stride: frame.w,
                    data,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_slices(slices)
    }
}

impl<T> From<Volume<T>> for Vec<Slice<T>> {
    fn from(volume: Volume<T>) -> Self {
        volume.slices
    }
}
