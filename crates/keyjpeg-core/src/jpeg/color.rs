//! RGB to level-shifted YCbCr (JFIF / BT.601 full range).

use crate::pixels::PixelBuffer;

/// One of the three components of a JFIF frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Y,
    Cb,
    Cr,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Y, Channel::Cb, Channel::Cr];

    /// Component identifier in SOF0 and SOS (1, 2, 3).
    pub fn component_id(self) -> u8 {
        match self {
            Channel::Y => 1,
            Channel::Cb => 2,
            Channel::Cr => 3,
        }
    }

    pub fn is_luma(self) -> bool {
        self == Channel::Y
    }

    /// Convert one pixel into this channel, already shifted by -128.
    ///
    /// Cb and Cr are centered on zero, so only Y needs an explicit shift.
    #[inline]
    pub fn convert(self, [r, g, b]: [u8; 3]) -> f32 {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        match self {
            Channel::Y => 0.299 * r + 0.587 * g + 0.114 * b - 128.0,
            Channel::Cb => -0.168_736 * r - 0.331_264 * g + 0.5 * b,
            Channel::Cr => 0.5 * r - 0.418_688 * g - 0.081_312 * b,
        }
    }
}

/// Sample the 8x8 tile at pixel origin `(x0, y0)` for one channel.
///
/// Positions past the right or bottom edge repeat the last column or row.
pub fn sample_block(pixels: &PixelBuffer, x0: u32, y0: u32, channel: Channel) -> [f32; 64] {
    let mut block = [0.0f32; 64];
    for (i, value) in block.iter_mut().enumerate() {
        let x = x0 + (i % 8) as u32;
        let y = y0 + (i / 8) as u32;
        *value = channel.convert(pixels.rgb_clamped(x, y));
    }
    block
}
