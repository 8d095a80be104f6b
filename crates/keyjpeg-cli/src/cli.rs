use clap::{Parser, Subcommand, ValueEnum};
use keyjpeg_core::OutputFormat;

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Encode(encode::EncodeArgs),
    Fill(fill::FillArgs),
}

/// Container format of the written file
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Baseline JFIF
    Jpeg,
    /// Uncompressed 24-bit bitmap
    Bmp,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Jpeg => OutputFormat::Jpeg,
            Format::Bmp => OutputFormat::Bmp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parses_encode_arguments() {
        let args = CliArgs::parse_from([
            "keyjpeg", "encode", "-i", "in.png", "-o", "out.bmp", "--quality", "70", "--format",
            "bmp", "--icon",
        ]);
        let Commands::Encode(encode) = args.command else {
            panic!("expected the encode subcommand");
        };
        assert_eq!(encode.quality, Some(70));
        assert_eq!(encode.format, Some(Format::Bmp));
        assert!(encode.icon);
    }

    #[test]
    fn icon_sizes_are_bounded_before_any_allocation() {
        for size in ["0", "65536", "100000"] {
            let fill = CliArgs::try_parse_from([
                "keyjpeg", "fill", "-c", "#fff", "-o", "red.jpg", "--size", size,
            ]);
            assert!(fill.is_err(), "fill --size {size} was accepted");

            let encode = CliArgs::try_parse_from([
                "keyjpeg", "encode", "-i", "in.png", "-o", "out.jpg", "--icon",
                "--icon-size", size,
            ]);
            assert!(encode.is_err(), "encode --icon-size {size} was accepted");
        }

        let args = CliArgs::parse_from([
            "keyjpeg", "fill", "-c", "#fff", "-o", "red.jpg", "--size", "65535",
        ]);
        let Commands::Fill(fill) = args.command else {
            panic!("expected the fill subcommand");
        };
        assert_eq!(fill.size, 65535);
    }
}
