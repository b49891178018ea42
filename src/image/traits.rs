//! Row-oriented access shared by owned slices and borrowed frames.

/// Read access to a single-channel 2D grid addressed as (row, col).
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    /// Value at (row, col) via the row accessor.
    #[inline]
    fn pixel(&self, row: usize, col: usize) -> Self::Pixel {
        self.row(row)[col]
    }

    /// `(height, width)`, the order volumes compare shapes in.
    fn dims(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    fn same_dims<O: ImageView + ?Sized>(&self, other: &O) -> bool {
        self.dims() == other.dims()
    }

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }

    fn is_contiguous(&self) -> bool {
        self.stride() == self.width()
    }

    fn as_slice(&self) -> Option<&[Self::Pixel]> {
        None
    }
}

/// Write access, row by row.
pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];

    fn as_mut_slice(&mut self) -> Option<&mut [Self::Pixel]> {
        None
    }
}

pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }
}
