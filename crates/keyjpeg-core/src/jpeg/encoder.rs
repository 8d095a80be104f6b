//! Baseline JPEG encoding of a whole raster.
//!
//! Tiles the image into 8x8 blocks in row-major order and codes each tile as
//! Y, Cb, Cr at 1x1 sampling in a single interleaved scan.

use std::io::Write;

use super::block::{encode_block, quantize};
use super::color::{sample_block, Channel};
use super::dct::forward_dct;
use super::huffman::{
    BitWriter, HuffmanEncoder, AC_CHROMINANCE, AC_LUMINANCE, DC_CHROMINANCE, DC_LUMINANCE,
    STANDARD_TABLES,
};
use super::quant::QuantizationTable;
use super::writer::JpegWriter;
use crate::error::{EncodeError, Result};
use crate::options::EncoderOptions;
use crate::pixels::PixelBuffer;

/// Largest width or height a SOF0 header can carry.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

/// Per-call coding tables, one set for luma and one shared by both chroma channels.
struct Tables {
    quality: u8,
    luma_quant: QuantizationTable,
    chroma_quant: QuantizationTable,
    luma_dc: HuffmanEncoder,
    luma_ac: HuffmanEncoder,
    chroma_dc: HuffmanEncoder,
    chroma_ac: HuffmanEncoder,
}

impl Tables {
    fn new(quality: u8) -> Self {
        Self {
            quality,
            luma_quant: QuantizationTable::luminance(quality),
            chroma_quant: QuantizationTable::chrominance(quality),
            luma_dc: HuffmanEncoder::from_table(&DC_LUMINANCE),
            luma_ac: HuffmanEncoder::from_table(&AC_LUMINANCE),
            chroma_dc: HuffmanEncoder::from_table(&DC_CHROMINANCE),
            chroma_ac: HuffmanEncoder::from_table(&AC_CHROMINANCE),
        }
    }

    fn for_channel(&self, channel: Channel) -> (&QuantizationTable, &HuffmanEncoder, &HuffmanEncoder) {
        if channel.is_luma() {
            (&self.luma_quant, &self.luma_dc, &self.luma_ac)
        } else {
            (&self.chroma_quant, &self.chroma_dc, &self.chroma_ac)
        }
    }
}

/// Encode an RGB888 buffer as a baseline JFIF file.
///
/// # Arguments
/// * `pixels` - Row-major RGB bytes, exactly `width * height * 3` of them
/// * `width`, `height` - Image size, 1 to 65535 each
/// * `quality` - JPEG quality, 1 to 100
///
/// # Returns
/// A complete JPEG file, or an error if the input is rejected. Nothing is
/// produced for rejected input.
///
/// # Example
/// ```
/// let pixels = vec![200u8; 16 * 16 * 3];
/// let jpeg = keyjpeg_core::encode(&pixels, 16, 16, 85).unwrap();
/// assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
/// ```
pub fn encode(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>> {
    let options = EncoderOptions::default().with_quality(quality);
    encode_with_options(pixels, width, height, &options)
}

/// Like [`encode`], with quality and JFIF density taken from `options`.
pub fn encode_with_options(
    pixels: &[u8],
    width: u32,
    height: u32,
    options: &EncoderOptions,
) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_to_writer(pixels, width, height, options, &mut out)?;
    Ok(out)
}

/// Encode into an arbitrary writer.
///
/// All input validation and the entropy coding happen before the first byte is
/// written, so a rejected input leaves `writer` untouched. Failures of the
/// writer itself surface as [`EncodeError::Io`].
pub fn encode_to_writer<W: Write>(
    pixels: &[u8],
    width: u32,
    height: u32,
    options: &EncoderOptions,
    writer: W,
) -> Result<()> {
    options.validate()?;
    let pixels = PixelBuffer::new(pixels, width, height)?;
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(EncodeError::DimensionsTooLarge {
            width,
            height,
            limit: MAX_DIMENSION,
        });
    }

    let tables = Tables::new(options.quality);
    let scan = encode_scan(&pixels, &tables);

    let mut jpeg = JpegWriter::new(writer);
    jpeg.write_soi()?;
    jpeg.write_app0(&options.density)?;
    jpeg.write_dqt(&tables.luma_quant)?;
    jpeg.write_dqt(&tables.chroma_quant)?;
    jpeg.write_sof0(width as u16, height as u16)?;
    for table in &STANDARD_TABLES {
        jpeg.write_dht(table)?;
    }
    jpeg.write_sos()?;
    jpeg.write_scan_data(&scan)?;
    jpeg.write_eoi()?;
    jpeg.into_inner().flush()?;

    Ok(())
}

/// Entropy-code every tile of the image into one stuffed, padded scan.
fn encode_scan(pixels: &PixelBuffer, tables: &Tables) -> Vec<u8> {
    let blocks_x = pixels.width().div_ceil(8);
    let blocks_y = pixels.height().div_ceil(8);
    let block_count = blocks_x as usize * blocks_y as usize;

    // one DC predictor per channel, in Channel::ALL order
    let mut predictors = [0i16; 3];
    let mut writer = BitWriter::with_capacity(block_count * 3 * 16);

    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            for (channel, predictor) in Channel::ALL.into_iter().zip(predictors.iter_mut()) {
                let mut block = sample_block(pixels, bx * 8, by * 8, channel);
                forward_dct(&mut block);

                let (quant, dc, ac) = tables.for_channel(channel);
                let coefficients = quantize(&block, quant);
                encode_block(&mut writer, &coefficients, dc, ac, predictor);
            }
        }
    }

    let scan = writer.into_bytes();
    log::debug!(
        "Encoded {}x{} as {}x{} blocks, quality={}, scan={} bytes",
        pixels.width(),
        pixels.height(),
        blocks_x,
        blocks_y,
        tables.quality,
        scan.len()
    );
    scan
}
