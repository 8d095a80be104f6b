use std::path::Path;

use keyjpeg_core::{encode_as, EncoderOptions, OutputFormat};

use crate::cli::Format;
use crate::CliResult;

pub mod encode;
pub mod fill;

/// Explicit `--format` wins, then the output file extension, then JPEG.
pub(crate) fn resolve_format(format: Option<Format>, output: &Path) -> OutputFormat {
    if let Some(format) = format {
        return format.into();
    }

    let extension = output.extension().and_then(|e| e.to_str());
    match extension.and_then(OutputFormat::from_extension) {
        Some(format) => format,
        None => {
            log::warn!(
                "Cannot tell the format from `{}`, writing JPEG",
                output.display()
            );
            OutputFormat::Jpeg
        }
    }
}

/// Encode an RGB888 buffer and store it at `output`.
pub(crate) fn write_encoded(
    format: OutputFormat,
    pixels: &[u8],
    width: u32,
    height: u32,
    options: &EncoderOptions,
    output: &Path,
) -> CliResult<()> {
    let bytes = encode_as(format, pixels, width, height, options)?;
    std::fs::write(output, &bytes)?;
    log::info!(
        "Wrote {}x{} {:?} to {} ({} bytes)",
        width,
        height,
        format,
        output.display(),
        bytes.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_resolution_order() {
        let bmp = PathBuf::from("icon.bmp");
        let unknown = PathBuf::from("icon.png");

        assert_eq!(resolve_format(Some(Format::Jpeg), &bmp), OutputFormat::Jpeg);
        assert_eq!(resolve_format(None, &bmp), OutputFormat::Bmp);
        assert_eq!(resolve_format(None, &unknown), OutputFormat::Jpeg);
        assert_eq!(resolve_format(None, Path::new("icon")), OutputFormat::Jpeg);
    }
}
