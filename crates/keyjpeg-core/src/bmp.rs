//! Uncompressed 24-bit BMP output.
//!
//! The fallback for consumers that cannot take JPEG data: a BITMAPFILEHEADER,
//! a BITMAPINFOHEADER and bottom-up BGR rows padded to a multiple of 4 bytes.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{EncodeError, Result};
use crate::pixels::{PixelBuffer, CHANNELS};

/// BITMAPFILEHEADER (14 bytes) + BITMAPINFOHEADER (40 bytes)
pub const HEADER_SIZE: u32 = 54;

const INFO_HEADER_SIZE: u32 = 40;

/// 72 DPI expressed in pixels per meter
const PIXELS_PER_METER: i32 = 2835;

/// Encode an RGB888 buffer to a 24-bit BMP file.
///
/// Takes the same arguments as [`crate::encode`] minus the quality, and
/// validates them the same way.
pub fn encode_bmp(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let pixels = PixelBuffer::new(pixels, width, height)?;
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(EncodeError::DimensionsTooLarge {
            width,
            height,
            limit: i32::MAX as u32,
        });
    }

    let row_stride = row_stride(width);
    let padding = row_stride - width as usize * CHANNELS;
    let pixel_data_size = row_stride * height as usize;
    let file_size = file_size(width, height)?;

    let mut out = Vec::with_capacity(file_size as usize);

    // BITMAPFILEHEADER
    out.extend_from_slice(b"BM");
    out.write_u32::<LittleEndian>(file_size)?;
    out.write_u16::<LittleEndian>(0)?;
    out.write_u16::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(HEADER_SIZE)?;

    // BITMAPINFOHEADER, positive height means bottom-up rows
    out.write_u32::<LittleEndian>(INFO_HEADER_SIZE)?;
    out.write_i32::<LittleEndian>(width as i32)?;
    out.write_i32::<LittleEndian>(height as i32)?;
    out.write_u16::<LittleEndian>(1)?;
    out.write_u16::<LittleEndian>(24)?;
    out.write_u32::<LittleEndian>(0)?; // BI_RGB
    out.write_u32::<LittleEndian>(pixel_data_size as u32)?;
    out.write_i32::<LittleEndian>(PIXELS_PER_METER)?;
    out.write_i32::<LittleEndian>(PIXELS_PER_METER)?;
    out.write_u32::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(0)?;

    for y in (0..height).rev() {
        for rgb in pixels.row(y).chunks_exact(CHANNELS) {
            out.extend_from_slice(&[rgb[2], rgb[1], rgb[0]]);
        }
        out.extend(std::iter::repeat(0u8).take(padding));
    }

    log::debug!(
        "BMP: {}x{}, row_stride={}, file_size={}",
        width,
        height,
        row_stride,
        out.len()
    );

    Ok(out)
}

/// Total file size, which has to fit the 32-bit `bfSize` header field.
fn file_size(width: u32, height: u32) -> Result<u32> {
    let size = HEADER_SIZE as u64 + row_stride(width) as u64 * height as u64;
    u32::try_from(size).map_err(|_| EncodeError::OutputTooLarge {
        size,
        limit: u32::MAX as u64,
    })
}

/// Bytes per pixel row, rounded up to a multiple of 4.
fn row_stride(width: u32) -> usize {
    (width as usize * CHANNELS + 3) / 4 * 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_stride_is_padded_to_four_bytes() {
        assert_eq!(row_stride(1), 4);
        assert_eq!(row_stride(2), 8);
        assert_eq!(row_stride(3), 12);
        assert_eq!(row_stride(4), 12);
        assert_eq!(row_stride(72), 216);
    }

    #[test]
    fn test_file_size_must_fit_the_header_field() {
        assert_eq!(file_size(3, 2).unwrap(), 54 + 24);
        // 40000 * 3 = 120000 bytes per row, 4.8 GB in total
        assert!(matches!(
            file_size(40_000, 40_000),
            Err(EncodeError::OutputTooLarge {
                size: 4_800_000_054,
                limit: 4_294_967_295,
            })
        ));
        // largest square that still fits
        assert!(file_size(37_837, 37_837).is_ok());
    }

    #[test]
    fn test_header_fields() {
        let data = vec![0u8; 3 * 2 * 3];
        let bmp = encode_bmp(&data, 3, 2).unwrap();

        // 3 pixels * 3 bytes = 9, padded to 12, two rows
        assert_eq!(bmp.len(), 54 + 24);
        assert_eq!(&bmp[0..2], b"BM");
        assert_eq!(u32::from_le_bytes(bmp[2..6].try_into().unwrap()), 78);
        assert_eq!(u32::from_le_bytes(bmp[10..14].try_into().unwrap()), 54);
        assert_eq!(u32::from_le_bytes(bmp[14..18].try_into().unwrap()), 40);
        assert_eq!(i32::from_le_bytes(bmp[18..22].try_into().unwrap()), 3);
        assert_eq!(i32::from_le_bytes(bmp[22..26].try_into().unwrap()), 2);
        assert_eq!(u16::from_le_bytes(bmp[28..30].try_into().unwrap()), 24);
        assert_eq!(u32::from_le_bytes(bmp[34..38].try_into().unwrap()), 24);
        assert_eq!(i32::from_le_bytes(bmp[38..42].try_into().unwrap()), 2835);
    }

    #[test]
    fn test_rows_are_bottom_up_bgr_with_padding() {
        // 1x2: top pixel red, bottom pixel blue
        let data = [255, 0, 0, 0, 0, 255];
        let bmp = encode_bmp(&data, 1, 2).unwrap();
        let pixel_data = &bmp[54..];

        // first stored row is the bottom one (blue), then padding
        assert_eq!(pixel_data[0..4], [255, 0, 0, 0]);
        // second stored row is the top one (red)
        assert_eq!(pixel_data[4..8], [0, 0, 255, 0]);
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        assert!(matches!(
            encode_bmp(&[0u8; 5], 1, 2),
            Err(EncodeError::BufferSizeMismatch { .. })
        ));
        assert!(matches!(
            encode_bmp(&[], 0, 0),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }
}
