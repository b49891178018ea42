//! 2D slice containers used to assemble volumes.
//!
//! - [`Slice`]: owned row-major grid, the storage unit of every [`Volume`](crate::Volume).
//! - [`FrameU8`]: borrowed 8-bit frame, the usual in-memory input.
//! - [`ImageView`]/[`ImageViewMut`]: row access shared by both.
//! - [`io`]: loading slice stacks from disk and writing edge slices back.
pub mod io;
pub mod slice;
pub mod traits;
pub mod u8;

pub use self::slice::Slice;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::FrameU8;
