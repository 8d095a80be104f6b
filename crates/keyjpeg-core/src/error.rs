//! Error types for encoding and inspecting images.

use std::fmt;
use thiserror::Error;

/// Result type alias for encoding operations.
pub type Result<T> = std::result::Result<T, EncodeError>;

/// Errors that can occur while encoding a pixel buffer.
///
/// All of them are raised before any output is produced, except [`EncodeError::Io`]
/// which reports a failing caller provided writer.
#[derive(Error)]
pub enum EncodeError {
    /// Width or height is zero.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The dimensions cannot be represented by the target container.
    #[error("image dimensions {width}x{height} exceed the container limit of {limit} pixels per side")]
    DimensionsTooLarge { width: u32, height: u32, limit: u32 },

    /// The encoded file would not fit the container's 32-bit size fields.
    #[error("encoded size of {size} bytes exceeds the container limit of {limit} bytes")]
    OutputTooLarge { size: u64, limit: u64 },

    /// The pixel buffer does not hold exactly `width * height * 3` bytes.
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Quality outside of 1-100.
    #[error("invalid quality value: {0} (must be 1-100)")]
    InvalidQuality(u8),

    /// The output writer failed.
    #[error("failed to write encoded image")]
    Io(#[from] std::io::Error),
}

impl fmt::Debug for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Use Display for Debug so unwrap() shows user-friendly messages
        write!(f, "{self}")
    }
}

/// Errors raised while walking the marker segments of a JPEG file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InspectError {
    /// The data does not start with an SOI marker.
    #[error("not a JPEG file: missing SOI marker")]
    NotAJpeg,

    /// The data ended in the middle of a segment.
    #[error("unexpected end of data at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A segment could not be interpreted.
    #[error("invalid {marker} segment: {reason}")]
    InvalidSegment { marker: String, reason: String },
}
