//! Quality scaled quantization tables.
//!
//! Both tables start from the JPEG Annex K example tables and are scaled with the
//! IJG quality curve: below 50 the scale factor is `5000 / quality`, from 50 on it is
//! `200 - 2 * quality`.

use super::zigzag::ZIGZAG_TO_NATURAL;

/// Annex K.1 luminance table, natural order.
#[rustfmt::skip]
pub const BASE_LUMINANCE: [u8; 64] = [
    16,  11,  10,  16,  24,  40,  51,  61,
    12,  12,  14,  19,  26,  58,  60,  55,
    14,  13,  16,  24,  40,  57,  69,  56,
    14,  17,  22,  29,  51,  87,  80,  62,
    18,  22,  37,  56,  68, 109, 103,  77,
    24,  35,  55,  64,  81, 104, 113,  92,
    49,  64,  78,  87, 103, 121, 120, 101,
    72,  92,  95,  98, 112, 100, 103,  99,
];

/// Annex K.2 chrominance table, natural order.
#[rustfmt::skip]
pub const BASE_CHROMINANCE: [u8; 64] = [
    17,  18,  24,  47,  99,  99,  99,  99,
    18,  21,  26,  66,  99,  99,  99,  99,
    24,  26,  56,  99,  99,  99,  99,  99,
    47,  66,  99,  99,  99,  99,  99,  99,
    99,  99,  99,  99,  99,  99,  99,  99,
    99,  99,  99,  99,  99,  99,  99,  99,
    99,  99,  99,  99,  99,  99,  99,  99,
    99,  99,  99,  99,  99,  99,  99,  99,
];

/// A JPEG quantization table with 8-bit precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizationTable {
    /// Table ID (0-3) as referenced by the frame header.
    pub id: u8,
    /// Table values in natural (row-major) order, each in 1-255.
    pub values: [u8; 64],
}

impl QuantizationTable {
    /// Table 0, used by the Y component.
    pub fn luminance(quality: u8) -> Self {
        Self::scaled(0, &BASE_LUMINANCE, quality)
    }

    /// Table 1, shared by the Cb and Cr components.
    pub fn chrominance(quality: u8) -> Self {
        Self::scaled(1, &BASE_CHROMINANCE, quality)
    }

    /// Scale `base` for the given quality.
    ///
    /// `quality` must already be validated to 1-100.
    pub fn scaled(id: u8, base: &[u8; 64], quality: u8) -> Self {
        debug_assert!((1..=100).contains(&quality));
        let scale = scale_factor(quality);

        let mut values = [0u8; 64];
        for (value, &b) in values.iter_mut().zip(base.iter()) {
            let scaled = (b as u32 * scale + 50) / 100;
            *value = scaled.clamp(1, 255) as u8;
        }

        Self { id, values }
    }

    /// Get value at natural (row, col) position.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.values[row * 8 + col]
    }

    /// Table values in zigzag order, as stored in a DQT segment.
    pub fn zigzag(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        for (k, value) in out.iter_mut().enumerate() {
            *value = self.values[ZIGZAG_TO_NATURAL[k]];
        }
        out
    }

    /// Rebuild a table from DQT payload values in zigzag order.
    pub fn from_zigzag(id: u8, zigzag: &[u8; 64]) -> Self {
        let mut values = [0u8; 64];
        for (k, &value) in zigzag.iter().enumerate() {
            values[ZIGZAG_TO_NATURAL[k]] = value;
        }
        Self { id, values }
    }

    /// Format table as ASCII art for display.
    ///
    /// Values are displayed in natural (row-major) order.
    pub fn to_ascii_table(&self) -> String {
        let mut out = String::new();

        out.push_str("|    |");
        for x in 0..8 {
            out.push_str(&format!("   x{} |", x));
        }
        out.push('\n');

        out.push_str("|----|");
        for _ in 0..8 {
            out.push_str("------|");
        }
        out.push('\n');

        for y in 0..8 {
            out.push_str(&format!("| y{} ", y));
            for x in 0..8 {
                out.push_str(&format!("| {:4} ", self.get(y, x)));
            }
            out.push_str("|\n");
        }

        out
    }
}

fn scale_factor(quality: u8) -> u32 {
    let quality = quality as u32;
    if quality < 50 {
        5000 / quality
    } else {
        200 - 2 * quality
    }
}
