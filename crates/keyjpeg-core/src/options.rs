use crate::error::{EncodeError, Result};

/// Default JPEG quality (1-100)
pub const DEFAULT_QUALITY: u8 = 85;

/// Quality used when rendering button icons for a surface
pub const ICON_QUALITY: u8 = 95;

/// Edge length in pixels of a button icon, unless the device reports otherwise
pub const DEFAULT_ICON_SIZE: u32 = 72;

/// Unit of the JFIF pixel density fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DensityUnit {
    /// No unit, the values only describe the pixel aspect ratio.
    #[default]
    AspectRatio,
    /// Dots per inch.
    Dpi,
    /// Dots per centimeter.
    Dpcm,
}

impl DensityUnit {
    pub fn to_u8(self) -> u8 {
        match self {
            DensityUnit::AspectRatio => 0,
            DensityUnit::Dpi => 1,
            DensityUnit::Dpcm => 2,
        }
    }
}

/// Pixel density written into the JFIF APP0 segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Density {
    pub unit: DensityUnit,
    pub x: u16,
    pub y: u16,
}

impl Density {
    pub fn dpi(x: u16, y: u16) -> Self {
        Self {
            unit: DensityUnit::Dpi,
            x,
            y,
        }
    }

    pub fn aspect_ratio(x: u16, y: u16) -> Self {
        Self {
            unit: DensityUnit::AspectRatio,
            x,
            y,
        }
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::aspect_ratio(1, 1)
    }
}

/// Options for the baseline JPEG encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderOptions {
    /// JPEG quality (1-100, default 85)
    pub quality: u8,
    /// JFIF pixel density, defaults to a 1:1 aspect ratio
    pub density: Density,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            density: Density::default(),
        }
    }
}

impl EncoderOptions {
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    /// Options used for button icons, see [`ICON_QUALITY`].
    pub fn icon() -> Self {
        Self::default().with_quality(ICON_QUALITY)
    }

    /// Quality outside of 1-100 is rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.quality) {
            return Err(EncodeError::InvalidQuality(self.quality));
        }
        Ok(())
    }
}

/// The container an RGB buffer is encoded into.
///
/// `Jpeg` is the regular path; `Bmp` is the lossless, uncompressed fallback
/// for consumers that cannot take compressed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Bmp,
}

impl OutputFormat {
    /// Guess the format from a file extension, case insensitive.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "jfif" => Some(OutputFormat::Jpeg),
            "bmp" | "dib" => Some(OutputFormat::Bmp),
            _ => None,
        }
    }
}
