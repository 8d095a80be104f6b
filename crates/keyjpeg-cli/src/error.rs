use std::fmt;

use keyjpeg_core::EncodeError;
use thiserror::Error;

#[derive(Error)]
pub enum CliError {
    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Cannot read image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid color `{0}`, expected hex like #ff8800")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // main returns this, so show the readable message
        write!(f, "{self}")
    }
}
