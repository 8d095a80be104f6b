use std::path::PathBuf;

use clap::Args;
use keyjpeg_core::jpeg::MAX_DIMENSION;
use keyjpeg_core::{EncoderOptions, DEFAULT_ICON_SIZE, ICON_QUALITY};

use super::{resolve_format, write_encoded};
use crate::cli::Format;
use crate::{CliError, CliResult};

/// Renders a solid color button icon
#[derive(Args, Debug)]
pub struct FillArgs {
    /// Fill color as hex, e.g. `#ff8800` or `f80`
    #[arg(short, long, value_name = "color")]
    pub color: String,

    /// Icon will be stored as file
    #[arg(short = 'o', long = "out", value_name = "output file", required = true)]
    pub output: PathBuf,

    /// Edge length of the icon in pixels
    #[arg(
        short,
        long,
        value_name = "pixels",
        default_value_t = DEFAULT_ICON_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION as i64)
    )]
    pub size: u32,

    /// JPEG quality 1-100
    #[arg(short, long, value_name = "quality", default_value_t = ICON_QUALITY)]
    pub quality: u8,

    /// Output format, guessed from the output file extension if omitted
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,
}

impl FillArgs {
    pub fn run(self) -> CliResult<()> {
        let rgb = parse_color(&self.color)?;
        let format = resolve_format(self.format, &self.output);
        let options = EncoderOptions::default().with_quality(self.quality);

        let pixels = rgb.repeat(self.size as usize * self.size as usize);
        write_encoded(format, &pixels, self.size, self.size, &options, &self.output)
    }
}

/// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
pub(crate) fn parse_color(color: &str) -> CliResult<[u8; 3]> {
    let invalid = || CliError::InvalidColor(color.to_string());
    let hex = color.strip_prefix('#').unwrap_or(color);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        6 => Ok([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
        3 => {
            let mut rgb = [0u8; 3];
            for (value, i) in rgb.iter_mut().zip(0..3) {
                // "f" expands to "ff"
                *value = channel(&hex[i..i + 1])? * 17;
            }
            Ok(rgb)
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn should_parse_colors() {
        assert_eq!(parse_color("#ff8800").unwrap(), [255, 136, 0]);
        assert_eq!(parse_color("0a0B0c").unwrap(), [10, 11, 12]);
        assert_eq!(parse_color("#f80").unwrap(), [255, 136, 0]);
        for bad in ["", "#12345", "red", "#gg0000", "+1+2+3"] {
            assert!(
                matches!(parse_color(bad), Err(CliError::InvalidColor(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn should_write_a_solid_icon() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let output = dir.path().join("red.jpg");

        FillArgs {
            color: "#ff0000".to_string(),
            output: output.clone(),
            size: 16,
            quality: ICON_QUALITY,
            format: None,
        }
        .run()
        .unwrap();

        let jpeg = std::fs::read(&output).unwrap();
        let mut decoder = jpeg_decoder::Decoder::new(jpeg.as_slice());
        let pixels = decoder.decode().unwrap();
        assert_eq!(pixels.len(), 16 * 16 * 3);
        for px in pixels.chunks_exact(3) {
            assert!(px[0] > 245 && px[1] < 10 && px[2] < 10, "{px:?}");
        }
    }
}
