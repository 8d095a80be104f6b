//! # keyjpeg core
//!
//! Encodes in-memory RGB888 rasters, such as button icons for a stream deck
//! style surface, into self-contained baseline JPEG files. An uncompressed
//! 24-bit BMP writer is available for consumers that cannot take JPEG.
//!
//! # Usage Examples
//!
//! ## Encode an icon
//!
//! ```rust
//! use keyjpeg_core::{DEFAULT_ICON_SIZE, ICON_QUALITY};
//!
//! let size = DEFAULT_ICON_SIZE;
//! let pixels = vec![0x20u8; (size * size * 3) as usize];
//!
//! let jpeg = keyjpeg_core::encode(&pixels, size, size, ICON_QUALITY)
//!     .expect("Failed to encode icon");
//! assert!(jpeg.starts_with(&[0xFF, 0xD8]));
//! assert!(jpeg.ends_with(&[0xFF, 0xD9]));
//! ```
//!
//! ## Pick the container at runtime
//!
//! ```rust
//! use keyjpeg_core::{encode_as, EncoderOptions, OutputFormat};
//!
//! let pixels = [255u8, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
//! let bmp = encode_as(OutputFormat::Bmp, &pixels, 2, 2, &EncoderOptions::default())
//!     .expect("Failed to encode bitmap");
//! assert_eq!(&bmp[..2], b"BM");
//! ```

pub mod bmp;
mod error;
pub mod inspect;
pub mod jpeg;
mod options;
mod pixels;

pub use bmp::encode_bmp;
pub use error::{EncodeError, InspectError, Result};
pub use jpeg::{encode, encode_to_writer, encode_with_options};
pub use options::{
    Density, DensityUnit, EncoderOptions, OutputFormat, DEFAULT_ICON_SIZE, DEFAULT_QUALITY,
    ICON_QUALITY,
};
pub use pixels::PixelBuffer;

/// Encode `pixels` into the container chosen by `format`.
///
/// `options` only affect JPEG output; the bitmap is always lossless. Options are
/// still validated for both formats, so a bad quality fails the same way no
/// matter which container was asked for.
pub fn encode_as(
    format: OutputFormat,
    pixels: &[u8],
    width: u32,
    height: u32,
    options: &EncoderOptions,
) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Jpeg => encode_with_options(pixels, width, height, options),
        OutputFormat::Bmp => {
            options.validate()?;
            encode_bmp(pixels, width, height)
        }
    }
}
