/// Borrowed 8-bit grayscale frame, e.g. one decoded slice of a stack.
#[derive(Clone, Debug)]
pub struct FrameU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> FrameU8<'a> {
    /// Tightly packed frame (`stride == w`).
    pub fn new(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.stride + col]
    }

    /// True when `data` holds every row addressed by `stride`.
    pub fn is_complete(&self) -> bool {
        self.stride >= self.w
            && (self.h == 0 || self.data.len() >= (self.h - 1) * self.stride + self.w)
    }
}

impl<'a> crate::image::traits::ImageView for FrameU8<'a> {
    type Pixel = u8;

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
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}
