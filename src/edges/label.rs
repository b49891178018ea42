use serde::Serialize;

/// Per-voxel classification stored directly as its 8-bit grey value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum EdgeLabel {
    Background = 0,
    Candidate = 127,
    Strong = 255,
}

impl EdgeLabel {
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Exact decoding; any other grey value is not a label.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Background),
            127 => Some(Self::Candidate),
            255 => Some(Self::Strong),
            _ => None,
        }
    }
}

impl From<EdgeLabel> for u8 {
    fn from(label: EdgeLabel) -> Self {
        label.as_u8()
    }
}
