use crate::error::{EncodeError, Result};

/// Bytes per RGB888 pixel
pub const CHANNELS: usize = 3;

/// Borrowed RGB888 raster, row-major and top-to-bottom.
///
/// Construction validates that the buffer holds exactly `width * height * 3` bytes,
/// so every accessor can index without further checks.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EncodeError::InvalidDimensions { width, height });
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .ok_or(EncodeError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(EncodeError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The pixel at `(x, y)` with coordinates clamped into the raster,
    /// so positions past the right or bottom edge replicate the last column or row.
    #[inline]
    pub fn rgb_clamped(&self, x: u32, y: u32) -> [u8; 3] {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let idx = (y * self.width as usize + x) * CHANNELS;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// One row of raw RGB bytes.
    #[inline]
    pub fn row(&self, y: u32) -> &'a [u8] {
        let stride = self.width as usize * CHANNELS;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }
}
