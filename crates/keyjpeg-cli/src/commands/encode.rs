use std::path::PathBuf;

use clap::Args;
use image::imageops::FilterType;
use keyjpeg_core::jpeg::MAX_DIMENSION;
use keyjpeg_core::{EncoderOptions, DEFAULT_ICON_SIZE, DEFAULT_QUALITY, ICON_QUALITY};

use super::{resolve_format, write_encoded};
use crate::cli::Format;
use crate::CliResult;

/// Encodes an image file (PNG, JPEG, BMP, GIF) into a baseline JPEG or a BMP
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Source image, used readonly.
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub input: PathBuf,

    /// Encoded image will be stored as file
    #[arg(short = 'o', long = "out", value_name = "output file", required = true)]
    pub output: PathBuf,

    /// JPEG quality 1-100 [default: 85, or 95 with --icon]
    #[arg(short, long, value_name = "quality")]
    pub quality: Option<u8>,

    /// Output format, guessed from the output file extension if omitted
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Resize to a square button icon before encoding
    #[arg(long)]
    pub icon: bool,

    /// Edge length of the icon in pixels
    #[arg(
        long,
        value_name = "pixels",
        default_value_t = DEFAULT_ICON_SIZE,
        requires = "icon",
        value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION as i64)
    )]
    pub icon_size: u32,
}

impl EncodeArgs {
    pub fn run(self) -> CliResult<()> {
        let format = resolve_format(self.format, &self.output);
        let quality = self
            .quality
            .unwrap_or(if self.icon { ICON_QUALITY } else { DEFAULT_QUALITY });
        let options = EncoderOptions::default().with_quality(quality);
        // fail on a bad quality before touching the input
        options.validate()?;

        let mut img = image::open(&self.input)?;
        log::debug!(
            "Read {} ({}x{})",
            self.input.display(),
            img.width(),
            img.height()
        );
        if self.icon {
            img = img.resize_exact(self.icon_size, self.icon_size, FilterType::Lanczos3);
        }

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        write_encoded(format, rgb.as_raw(), width, height, &options, &self.output)
    }
}
