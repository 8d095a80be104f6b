//! JFIF container writer.
//!
//! Emits the marker segments of a baseline sequential file around the
//! entropy-coded scan produced by the block coder.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use super::color::Channel;
use super::huffman::HuffmanTable;
use super::marker::Marker;
use super::quant::QuantizationTable;
use crate::error::Result;
use crate::options::Density;

/// JFIF identifier in APP0, including the terminating NUL.
const JFIF_ID: [u8; 5] = *b"JFIF\0";
/// JFIF version 1.01.
const JFIF_VERSION: [u8; 2] = [1, 1];

/// Writes JPEG marker segments to any `Write` sink.
pub struct JpegWriter<W: Write> {
    output: W,
}

impl<W: Write> JpegWriter<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    /// Give back the underlying sink.
    pub fn into_inner(self) -> W {
        self.output
    }

    fn write_marker(&mut self, marker: Marker) -> Result<()> {
        self.output.write_all(&[0xFF, marker.to_u8()])?;
        Ok(())
    }

    /// Segment length field, which counts itself but not the marker.
    fn write_length(&mut self, payload_len: usize) -> Result<()> {
        self.output.write_u16::<BigEndian>(payload_len as u16 + 2)?;
        Ok(())
    }

    pub fn write_soi(&mut self) -> Result<()> {
        self.write_marker(Marker::SOI)
    }

    pub fn write_eoi(&mut self) -> Result<()> {
        self.write_marker(Marker::EOI)
    }

    /// JFIF APP0 with the given pixel density and no thumbnail.
    pub fn write_app0(&mut self, density: &Density) -> Result<()> {
        self.write_marker(Marker::APP(0))?;
        self.write_length(14)?;
        self.output.write_all(&JFIF_ID)?;
        self.output.write_all(&JFIF_VERSION)?;
        self.output.write_u8(density.unit.to_u8())?;
        self.output.write_u16::<BigEndian>(density.x)?;
        self.output.write_u16::<BigEndian>(density.y)?;
        // thumbnail width and height
        self.output.write_all(&[0, 0])?;
        Ok(())
    }

    /// One 8-bit quantization table, values in zigzag order.
    pub fn write_dqt(&mut self, table: &QuantizationTable) -> Result<()> {
        self.write_marker(Marker::DQT)?;
        self.write_length(65)?;
        // Pq = 0 (8-bit) in the high nibble
        self.output.write_u8(table.id & 0x0F)?;
        self.output.write_all(&table.zigzag())?;
        Ok(())
    }

    /// Baseline frame header with three 1x1 components.
    pub fn write_sof0(&mut self, width: u16, height: u16) -> Result<()> {
        self.write_marker(Marker::SOF(0))?;
        self.write_length(6 + 3 * Channel::ALL.len())?;
        self.output.write_u8(8)?;
        self.output.write_u16::<BigEndian>(height)?;
        self.output.write_u16::<BigEndian>(width)?;
        self.output.write_u8(Channel::ALL.len() as u8)?;
        for channel in Channel::ALL {
            let table_id = if channel.is_luma() { 0 } else { 1 };
            self.output
                .write_all(&[channel.component_id(), 0x11, table_id])?;
        }
        Ok(())
    }

    pub fn write_dht(&mut self, table: &HuffmanTable) -> Result<()> {
        self.write_marker(Marker::DHT)?;
        self.write_length(1 + 16 + table.values.len())?;
        self.output.write_u8(table.class_and_id())?;
        self.output.write_all(&table.code_lengths)?;
        self.output.write_all(table.values)?;
        Ok(())
    }

    /// Scan header covering all three components, full spectrum, no approximation.
    pub fn write_sos(&mut self) -> Result<()> {
        self.write_marker(Marker::SOS)?;
        self.write_length(4 + 2 * Channel::ALL.len())?;
        self.output.write_u8(Channel::ALL.len() as u8)?;
        for channel in Channel::ALL {
            // DC table in the high nibble, AC table in the low one
            let tables = if channel.is_luma() { 0x00 } else { 0x11 };
            self.output.write_all(&[channel.component_id(), tables])?;
        }
        // Ss, Se, Ah/Al
        self.output.write_all(&[0, 63, 0])?;
        Ok(())
    }

    /// Raw entropy-coded bytes, already stuffed and padded.
    pub fn write_scan_data(&mut self, data: &[u8]) -> Result<()> {
        self.output.write_all(data)?;
        Ok(())
    }
}
