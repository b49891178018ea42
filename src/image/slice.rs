//! Owned single-channel slice in row-major layout (stride == width).
//!
//! Generic over the voxel type so the same container carries raw input
//! intensities, integer gradients, direction components and edge labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slice<T> {
    /// Slice width in pixels (columns)
    pub w: usize,
    /// Slice height in pixels (rows)
    pub h: usize,
    /// Number of elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<T>,
}

impl<T: Copy + Default> Slice<T> {
    /// Construct a default-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, T::default())
    }
}

impl<T: Copy> Slice<T> {
    /// Construct a buffer of size `w × h` with every pixel set to `value`.
    pub fn filled(w: usize, h: usize, value: T) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![value; w * h],
        }
    }

    /// Wrap an existing row-major buffer. Returns `None` on length mismatch.
    pub fn from_vec(w: usize, h: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == w * h).then_some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    /// Convert (row, col) to a linear index into `data`.
    pub fn idx(&self, row: usize, col: usize) -> usize {
        row * self.stride + col
    }
    #[inline]
    /// Get the value at (row, col).
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.idx(row, col)]
    }
    #[inline]
    /// Set the value at (row, col).
    pub fn set(&mut self, row: usize, col: usize, v: T) {
        let i = self.idx(row, col);
        self.data[i] = v;
    }

    /// Element-wise conversion into a slice of identical shape.
    pub fn map<U, F>(&self, f: F) -> Slice<U>
    where
        F: FnMut(T) -> U,
    {
        Slice {
            w: self.w,
            h: self.h,
            stride: self.w,
            data: self.data.iter().copied().map(f).collect(),
        }
    }
}

impl<T: Copy> crate::image::traits::ImageView for Slice<T> {
    type Pixel = T;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[T] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[T]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl<T: Copy> crate::image::traits::ImageViewMut for Slice<T> {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        if self.stride == self.w {
            Some(&mut self.data[..self.w * self.h])
        } else {
            None
        }
    }
}
