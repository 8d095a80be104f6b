//! Read-only walk over the marker segments of a JPEG file.
//!
//! Just enough parsing to check what the encoder produced and to feed the
//! `keyjpeg-inspect` tool: segment offsets, the frame header, and the
//! quantization and Huffman tables. Entropy-coded data is measured, not decoded.

use crate::error::InspectError;
use crate::jpeg::{Marker, QuantizationTable};

pub type InspectResult<T> = std::result::Result<T, InspectError>;

/// Raw segment data with its marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The marker type.
    pub marker: Marker,
    /// Byte offset of the marker's 0xFF prefix.
    pub offset: usize,
    /// Raw segment data (excluding marker and length bytes).
    pub data: Vec<u8>,
}

impl Segment {
    /// Size on disk including marker and, if present, the length field.
    pub fn encoded_len(&self) -> usize {
        if self.marker.has_length() {
            self.data.len() + 4
        } else {
            2
        }
    }
}

/// JPEG component information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub id: u8,
    pub h_sampling: u8,
    pub v_sampling: u8,
    pub quant_table_id: u8,
    /// DC Huffman table ID (set from the SOS header).
    pub dc_table_id: u8,
    /// AC Huffman table ID (set from the SOS header).
    pub ac_table_id: u8,
}

/// Frame information from the SOF marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInfo {
    /// SOF type (0 = baseline, 2 = progressive, etc.).
    pub sof_type: u8,
    pub precision: u8,
    pub height: u16,
    pub width: u16,
    pub components: Vec<Component>,
}

impl FrameInfo {
    pub fn is_baseline(&self) -> bool {
        self.sof_type == 0
    }
}

/// A Huffman table as found in a DHT segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanDefinition {
    /// Table class: 0 = DC, 1 = AC.
    pub class: u8,
    pub id: u8,
    pub code_lengths: [u8; 16],
    pub values: Vec<u8>,
}

/// Everything [`inspect`] learned about a file.
#[derive(Debug, Clone)]
pub struct JpegSummary {
    /// Segments from SOI up to and including SOS.
    pub segments: Vec<Segment>,
    pub frame: Option<FrameInfo>,
    /// Quantization tables in definition order.
    pub quant_tables: Vec<QuantizationTable>,
    /// Huffman tables in definition order.
    pub huffman_tables: Vec<HuffmanDefinition>,
    /// Entropy-coded bytes after the SOS header, stuffing included.
    pub scan_data_len: usize,
    /// Whether the scan is terminated by EOI at the very end of the data.
    pub ends_with_eoi: bool,
}

impl JpegSummary {
    pub fn markers(&self) -> Vec<Marker> {
        self.segments.iter().map(|s| s.marker).collect()
    }
}

/// Walk the marker segments from SOI through the SOS header.
pub fn read_segments(data: &[u8]) -> InspectResult<Vec<Segment>> {
    read_header(data).map(|(segments, _)| segments)
}

/// Walk and interpret a whole JPEG file.
pub fn inspect(data: &[u8]) -> InspectResult<JpegSummary> {
    let (segments, scan_start) = read_header(data)?;

    let mut frame = None;
    let mut quant_tables = Vec::new();
    let mut huffman_tables = Vec::new();
    for segment in &segments {
        match segment.marker {
            Marker::SOF(n) => frame = Some(parse_sof(n, &segment.data)?),
            Marker::DQT => quant_tables.extend(parse_dqt(&segment.data)?),
            Marker::DHT => huffman_tables.extend(parse_dht(&segment.data)?),
            Marker::SOS => {
                if let Some(frame) = frame.as_mut() {
                    parse_sos_header(&segment.data, frame)?;
                }
            }
            _ => {}
        }
    }

    let (scan_data_len, ends_with_eoi) = measure_scan(data, scan_start);

    Ok(JpegSummary {
        segments,
        frame,
        quant_tables,
        huffman_tables,
        scan_data_len,
        ends_with_eoi,
    })
}

/// Returns the segments and the offset just past the SOS header.
fn read_header(data: &[u8]) -> InspectResult<(Vec<Segment>, usize)> {
    if data.len() < 2 || data[..2] != [0xFF, 0xD8] {
        return Err(InspectError::NotAJpeg);
    }

    let mut segments = vec![Segment {
        marker: Marker::SOI,
        offset: 0,
        data: Vec::new(),
    }];
    let mut pos = 2;

    loop {
        let (marker, offset) = read_marker(data, &mut pos)?;

        if !marker.has_length() {
            segments.push(Segment {
                marker,
                offset,
                data: Vec::new(),
            });
            if marker == Marker::EOI {
                return Ok((segments, pos));
            }
            continue;
        }

        let length = read_length(data, pos, marker)?;
        let start = pos + 2;
        let end = start + length;
        if end > data.len() {
            return Err(InspectError::UnexpectedEof { offset: data.len() });
        }
        segments.push(Segment {
            marker,
            offset,
            data: data[start..end].to_vec(),
        });
        pos = end;

        if marker == Marker::SOS {
            return Ok((segments, pos));
        }
    }
}

/// Read the next marker, skipping anything before its 0xFF and any fill bytes.
fn read_marker(data: &[u8], pos: &mut usize) -> InspectResult<(Marker, usize)> {
    while *pos < data.len() && data[*pos] != 0xFF {
        *pos += 1;
    }
    while *pos + 1 < data.len() && data[*pos + 1] == 0xFF {
        *pos += 1;
    }
    if *pos + 1 >= data.len() {
        return Err(InspectError::UnexpectedEof { offset: data.len() });
    }

    let offset = *pos;
    let byte = data[*pos + 1];
    *pos += 2;

    let marker = Marker::from_u8(byte).ok_or_else(|| InspectError::InvalidSegment {
        marker: format!("0x{byte:02X}"),
        reason: format!("invalid marker byte at offset {offset}"),
    })?;
    Ok((marker, offset))
}

/// Segment length without the 2 length bytes.
fn read_length(data: &[u8], pos: usize, marker: Marker) -> InspectResult<usize> {
    if pos + 2 > data.len() {
        return Err(InspectError::UnexpectedEof { offset: data.len() });
    }
    let length = u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;
    if length < 2 {
        return Err(invalid(marker, "segment length too small"));
    }
    Ok(length - 2)
}

/// Count entropy-coded bytes up to the next real marker.
fn measure_scan(data: &[u8], start: usize) -> (usize, bool) {
    let mut pos = start;
    while pos < data.len() {
        if data[pos] == 0xFF && pos + 1 < data.len() {
            match data[pos + 1] {
                // stuffed byte or restart marker
                0x00 | 0xD0..=0xD7 => pos += 2,
                // fill byte
                0xFF => pos += 1,
                0xD9 => return (pos - start, pos + 2 == data.len()),
                _ => return (pos - start, false),
            }
        } else {
            pos += 1;
        }
    }
    (data.len().saturating_sub(start), false)
}

fn invalid(marker: Marker, reason: impl Into<String>) -> InspectError {
    InspectError::InvalidSegment {
        marker: marker.to_string(),
        reason: reason.into(),
    }
}

fn parse_dqt(data: &[u8]) -> InspectResult<Vec<QuantizationTable>> {
    let mut tables = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        let pq_tq = data[pos];
        let precision = pq_tq >> 4;
        let id = pq_tq & 0x0F;
        pos += 1;

        if id > 3 {
            return Err(invalid(
                Marker::DQT,
                format!("invalid quantization table ID: {id}"),
            ));
        }
        if precision != 0 {
            return Err(invalid(Marker::DQT, "only 8-bit tables are supported"));
        }

        let values: &[u8; 64] = data
            .get(pos..pos + 64)
            .and_then(|v| v.try_into().ok())
            .ok_or_else(|| invalid(Marker::DQT, "segment too short"))?;
        pos += 64;

        tables.push(QuantizationTable::from_zigzag(id, values));
    }

    Ok(tables)
}

fn parse_dht(data: &[u8]) -> InspectResult<Vec<HuffmanDefinition>> {
    let mut tables = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        let tc_th = data[pos];
        let class = tc_th >> 4;
        let id = tc_th & 0x0F;
        pos += 1;

        if class > 1 || id > 3 {
            return Err(invalid(
                Marker::DHT,
                format!("invalid Huffman table: class={class}, id={id}"),
            ));
        }

        let code_lengths: [u8; 16] = data
            .get(pos..pos + 16)
            .and_then(|v| v.try_into().ok())
            .ok_or_else(|| invalid(Marker::DHT, "segment too short for code lengths"))?;
        pos += 16;

        let total: usize = code_lengths.iter().map(|&n| n as usize).sum();
        let values = data
            .get(pos..pos + total)
            .ok_or_else(|| invalid(Marker::DHT, "segment too short for symbol values"))?
            .to_vec();
        pos += total;

        tables.push(HuffmanDefinition {
            class,
            id,
            code_lengths,
            values,
        });
    }

    Ok(tables)
}

fn parse_sof(sof_type: u8, data: &[u8]) -> InspectResult<FrameInfo> {
    let marker = Marker::SOF(sof_type);
    if data.len() < 6 {
        return Err(invalid(marker, "segment too short"));
    }

    let precision = data[0];
    let height = u16::from_be_bytes([data[1], data[2]]);
    let width = u16::from_be_bytes([data[3], data[4]]);
    let num_components = data[5] as usize;

    if data.len() < 6 + num_components * 3 {
        return Err(invalid(marker, "segment too short for components"));
    }

    let components = data[6..6 + num_components * 3]
        .chunks_exact(3)
        .map(|c| Component {
            id: c[0],
            h_sampling: c[1] >> 4,
            v_sampling: c[1] & 0x0F,
            quant_table_id: c[2],
            dc_table_id: 0,
            ac_table_id: 0,
        })
        .collect();

    Ok(FrameInfo {
        sof_type,
        precision,
        height,
        width,
        components,
    })
}

fn parse_sos_header(data: &[u8], frame: &mut FrameInfo) -> InspectResult<()> {
    let num_components = *data
        .first()
        .ok_or_else(|| invalid(Marker::SOS, "header empty"))? as usize;
    if data.len() < 1 + num_components * 2 + 3 {
        return Err(invalid(Marker::SOS, "header too short"));
    }

    for spec in data[1..1 + num_components * 2].chunks_exact(2) {
        if let Some(component) = frame.components.iter_mut().find(|c| c.id == spec[0]) {
            component.dc_table_id = spec[1] >> 4;
            component.ac_table_id = spec[1] & 0x0F;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jpeg::huffman::STANDARD_TABLES;

    fn encoded(width: u32, height: u32, quality: u8) -> Vec<u8> {
        let pixels: Vec<u8> = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
        crate::encode(&pixels, width, height, quality).unwrap()
    }

    #[test]
    fn test_not_a_jpeg() {
        assert_eq!(read_segments(&[0x89, b'P', b'N', b'G']), Err(InspectError::NotAJpeg));
        assert_eq!(read_segments(&[0xFF]), Err(InspectError::NotAJpeg));
    }

    #[test]
    fn test_minimal_file() {
        let segments = read_segments(&[0xFF, 0xD8, 0xFF, 0xD9]).unwrap();
        let markers: Vec<Marker> = segments.iter().map(|s| s.marker).collect();
        assert_eq!(markers, vec![Marker::SOI, Marker::EOI]);
        assert_eq!(segments[1].offset, 2);
    }

    #[test]
    fn test_truncated_segment() {
        // DQT claiming 67 bytes with only 3 present
        let data = [0xFF, 0xD8, 0xFF, 0xDB, 0x00, 0x43, 0x00];
        assert_eq!(
            read_segments(&data),
            Err(InspectError::UnexpectedEof { offset: 7 })
        );
    }

    #[test]
    fn test_bad_length() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x01];
        assert!(matches!(
            read_segments(&data),
            Err(InspectError::InvalidSegment { marker, .. }) if marker == "APP0"
        ));
    }

    #[test]
    fn test_encoder_segment_order() {
        let summary = inspect(&encoded(16, 8, 85)).unwrap();
        assert_eq!(
            summary.markers(),
            vec![
                Marker::SOI,
                Marker::APP(0),
                Marker::DQT,
                Marker::DQT,
                Marker::SOF(0),
                Marker::DHT,
                Marker::DHT,
                Marker::DHT,
                Marker::DHT,
                Marker::SOS,
            ]
        );
        assert!(summary.ends_with_eoi);
        assert!(summary.scan_data_len > 0);

        // offsets are contiguous
        for pair in summary.segments.windows(2) {
            assert_eq!(pair[0].offset + pair[0].encoded_len(), pair[1].offset);
        }
    }

    #[test]
    fn test_encoder_frame_and_tables() {
        let summary = inspect(&encoded(10, 10, 85)).unwrap();

        let frame = summary.frame.unwrap();
        assert!(frame.is_baseline());
        assert_eq!((frame.width, frame.height, frame.precision), (10, 10, 8));
        let layout: Vec<(u8, u8, u8, u8, u8)> = frame
            .components
            .iter()
            .map(|c| {
                (
                    c.id,
                    (c.h_sampling << 4) | c.v_sampling,
                    c.quant_table_id,
                    c.dc_table_id,
                    c.ac_table_id,
                )
            })
            .collect();
        assert_eq!(
            layout,
            vec![(1, 0x11, 0, 0, 0), (2, 0x11, 1, 1, 1), (3, 0x11, 1, 1, 1)]
        );

        assert_eq!(
            summary.quant_tables,
            vec![
                QuantizationTable::luminance(85),
                QuantizationTable::chrominance(85)
            ]
        );

        let huffman: Vec<(u8, u8, &[u8])> = summary
            .huffman_tables
            .iter()
            .map(|t| (t.class, t.id, t.values.as_slice()))
            .collect();
        let expected: Vec<(u8, u8, &[u8])> = STANDARD_TABLES
            .iter()
            .map(|t| (t.class, t.id, t.values))
            .collect();
        assert_eq!(huffman, expected);
    }

    #[test]
    fn test_app0_is_jfif() {
        let segments = read_segments(&encoded(8, 8, 50)).unwrap();
        let app0 = &segments[1];
        assert_eq!(app0.offset, 2);
        assert_eq!(&app0.data[..7], b"JFIF\0\x01\x01");
    }

    #[test]
    fn test_measure_scan_skips_stuffing_and_restarts() {
        let data = [0x12, 0xFF, 0x00, 0x34, 0xFF, 0xD0, 0x56, 0xFF, 0xD9];
        assert_eq!(measure_scan(&data, 0), (7, true));

        let unterminated = [0x12, 0x34];
        assert_eq!(measure_scan(&unterminated, 0), (2, false));
    }
}
