use argh::FromArgs;
use keyjpeg_core::inspect::{inspect, JpegSummary};
use std::fs;
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(FromArgs)]
/// Inspecting jpeg image files
struct KeyjpegInspectArgs {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
enum Command {
    Segments(SegmentsArgs),
    Quantization(QuantizationArgs),
}

#[derive(FromArgs, PartialEq, Debug)]
/// Lists the marker segments of jpeg files
#[argh(subcommand, name = "segments")]
struct SegmentsArgs {
    /// the jpeg image file to inspect
    #[argh(positional)]
    jpeg_files: Vec<String>,
}

#[derive(FromArgs, PartialEq, Debug)]
/// Shows the quantization tables of jpeg files
#[argh(subcommand, name = "quantization")]
struct QuantizationArgs {
    /// the jpeg image file to inspect
    #[argh(positional)]
    jpeg_files: Vec<String>,
}

#[derive(Tabled)]
struct SegmentRow {
    marker: String,
    offset: String,
    length: usize,
}

fn main() -> Result<(), String> {
    let args: KeyjpegInspectArgs = argh::from_env();

    match &args.command {
        Command::Segments(args) => {
            for file_name in args.jpeg_files.iter() {
                let summary = load(file_name)?;
                println!("# Segments of `{}`", display_name(file_name));
                println!();
                print_segments(&summary);
                println!();
            }
        }
        Command::Quantization(args) => {
            for file_name in args.jpeg_files.iter() {
                let summary = load(file_name)?;
                println!("# Quantization Tables of `{}`", display_name(file_name));
                println!();
                for table in &summary.quant_tables {
                    println!("## Table {} (precision: 8-bit)", table.id);
                    print!("{}", table.to_ascii_table());
                    println!();
                }
            }
        }
    }

    Ok(())
}

fn load(file_name: &str) -> Result<JpegSummary, String> {
    let data = fs::read(file_name).map_err(|e| format!("cannot open {file_name}: {e}"))?;
    inspect(&data).map_err(|e| format!("{file_name}: {e}"))
}

fn display_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

fn print_segments(summary: &JpegSummary) {
    let rows = summary.segments.iter().map(|s| SegmentRow {
        marker: s.marker.to_string(),
        offset: format!("0x{:06x}", s.offset),
        length: s.encoded_len(),
    });
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    println!("{table}");
    println!();

    if let Some(frame) = &summary.frame {
        println!(
            "- frame: {}x{}, {} components, {}",
            frame.width,
            frame.height,
            frame.components.len(),
            if frame.is_baseline() {
                "baseline"
            } else {
                "not baseline"
            }
        );
        for c in &frame.components {
            println!(
                "  - component {}: sampling {}x{}, quant table {}, huffman dc {} ac {}",
                c.id, c.h_sampling, c.v_sampling, c.quant_table_id, c.dc_table_id, c.ac_table_id
            );
        }
    }
    println!("- huffman tables: {}", summary.huffman_tables.len());
    println!("- scan data: {} bytes", summary.scan_data_len);
    println!("- ends with EOI: {}", summary.ends_with_eoi);
}
