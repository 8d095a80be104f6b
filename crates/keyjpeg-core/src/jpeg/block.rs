//! Quantization and entropy coding of a single 8x8 block.

use super::huffman::{encode_coefficient, BitWriter, HuffmanEncoder};
use super::quant::QuantizationTable;
use super::zigzag::ZIGZAG_TO_NATURAL;

/// End of block, (run 0, size 0).
const EOB: u8 = 0x00;
/// Sixteen zeros, (run 15, size 0).
const ZRL: u8 = 0xF0;

/// Largest AC magnitude with a code in the standard tables (category 10).
const MAX_AC: i16 = 1023;

/// Quantize DCT output and reorder it into zigzag order.
///
/// Each coefficient is divided by its table entry and rounded half away from zero.
pub fn quantize(coefficients: &[f32; 64], table: &QuantizationTable) -> [i16; 64] {
    let mut out = [0i16; 64];
    for (k, value) in out.iter_mut().enumerate() {
        let natural = ZIGZAG_TO_NATURAL[k];
        let q = (coefficients[natural] / table.values[natural] as f32).round() as i16;
        *value = if k == 0 { q } else { q.clamp(-MAX_AC, MAX_AC) };
    }
    out
}

/// Entropy-code one zigzag-ordered block.
///
/// DC goes out as the difference to `dc_predictor`, which then takes the new
/// value. Every nonzero AC coefficient is preceded by the count of zeros in
/// front of it, split into ZRL symbols when that count reaches 16. Zeros after
/// the last nonzero coefficient are replaced by a single EOB.
pub fn encode_block(
    writer: &mut BitWriter,
    block: &[i16; 64],
    dc_encoder: &HuffmanEncoder,
    ac_encoder: &HuffmanEncoder,
    dc_predictor: &mut i16,
) {
    let bytes_before = writer.len();

    let diff = block[0] - std::mem::replace(dc_predictor, block[0]);
    let (category, extra) = encode_coefficient(diff);
    writer.write_huffman(category, dc_encoder);
    writer.write_bits(extra as u32, category);
    log::trace!("dc {} (diff {}) category {}", block[0], diff, category);

    // index of the last nonzero AC coefficient, 0 if there is none
    let last = block[1..]
        .iter()
        .rposition(|&c| c != 0)
        .map_or(0, |i| i + 1);

    let mut run = 0u8;
    for (k, &coeff) in block.iter().enumerate().take(last + 1).skip(1) {
        if coeff == 0 {
            run += 1;
            continue;
        }

        if run >= 16 {
            log::trace!("{} x symbol {:#04x} before ac[{}]", run / 16, ZRL, k);
            for _ in 0..run / 16 {
                writer.write_huffman(ZRL, ac_encoder);
            }
            run %= 16;
        }

        let (category, extra) = encode_coefficient(coeff);
        let symbol = (run << 4) | category;
        writer.write_huffman(symbol, ac_encoder);
        writer.write_bits(extra as u32, category);
        log::trace!("ac[{}] {} as symbol {:#04x}", k, coeff, symbol);
        run = 0;
    }

    if last < 63 {
        writer.write_huffman(EOB, ac_encoder);
        log::trace!("symbol {:#04x} closes the block after ac[{}]", EOB, last);
    }

    log::trace!("block took {} entropy bytes", writer.len() - bytes_before);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jpeg::huffman::{AC_LUMINANCE, DC_LUMINANCE};

    fn encoders() -> (HuffmanEncoder, HuffmanEncoder) {
        (
            HuffmanEncoder::from_table(&DC_LUMINANCE),
            HuffmanEncoder::from_table(&AC_LUMINANCE),
        )
    }

    /// Expand entropy-coded bytes into a string of '0'/'1', dropping stuffed zeros.
    fn bit_string(bytes: &[u8]) -> String {
        let mut out = String::new();
        let mut prev = 0u8;
        for &b in bytes {
            if !(prev == 0xFF && b == 0x00) {
                out.push_str(&format!("{b:08b}"));
            }
            prev = b;
        }
        out
    }

    #[test]
    fn test_quantize_rounds_and_reorders() {
        let table = QuantizationTable::luminance(50);
        let mut coefficients = [0.0f32; 64];
        coefficients[0] = 16.0 * 3.5; // rounds away from zero to 4
        coefficients[1] = -11.0 * 2.4; // natural (0, 1), zigzag index 1
        coefficients[8] = 12.0 * 1.0; // natural (1, 0), zigzag index 2
        coefficients[63] = 99.0 * 0.4; // rounds to 0

        let zz = quantize(&coefficients, &table);
        assert_eq!(zz[0], 4);
        assert_eq!(zz[1], -2);
        assert_eq!(zz[2], 1);
        assert!(zz[3..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_quantize_bounds_ac_magnitude() {
        let table = QuantizationTable::luminance(100);
        let mut coefficients = [0.0f32; 64];
        coefficients[1] = 5000.0;
        coefficients[8] = -5000.0;

        let zz = quantize(&coefficients, &table);
        assert_eq!(zz[1], MAX_AC);
        assert_eq!(zz[2], -MAX_AC);
    }

    #[test]
    fn test_solid_block_is_dc_then_eob() {
        let (dc, ac) = encoders();
        let mut writer = BitWriter::new();
        let mut predictor = 0i16;

        encode_block(&mut writer, &[0i16; 64], &dc, &ac, &mut predictor);

        // DC category 0 is "00", EOB is "1010", padded with ones
        assert_eq!(writer.into_bytes(), vec![0b0010_1011]);
        assert_eq!(predictor, 0);
    }

    #[test]
    fn test_dc_is_coded_as_difference() {
        let (dc, ac) = encoders();
        let mut predictor = 10i16;
        let mut block = [0i16; 64];
        block[0] = 7;

        let mut writer = BitWriter::new();
        encode_block(&mut writer, &block, &dc, &ac, &mut predictor);

        assert_eq!(predictor, 7);
        // diff -3: category 2 "011", bits "00", then EOB "1010"
        let bits = bit_string(&writer.into_bytes());
        assert!(bits.starts_with("011001010"), "{bits}");
    }

    #[test]
    fn test_long_zero_run_emits_single_zrl() {
        let (dc, ac) = encoders();
        let mut block = [0i16; 64];
        // 17 zeros at indices 1..=17, then a 1
        block[18] = 1;

        let mut writer = BitWriter::new();
        encode_block(&mut writer, &block, &dc, &ac, &mut 0);
        let bits = bit_string(&writer.into_bytes());

        let zrl = "11111111001";
        // symbol 0x11 (run 1, size 1) is "1100"
        let expected = format!("00{zrl}11001");
        assert!(bits.starts_with(&expected), "{bits}");
        assert_eq!(bits.matches(zrl).count(), 1);
    }

    #[test]
    fn test_no_eob_when_last_coefficient_is_nonzero() {
        let (dc, ac) = encoders();
        let mut block = [0i16; 64];
        block[63] = 1;

        let mut writer = BitWriter::new();
        encode_block(&mut writer, &block, &dc, &ac, &mut 0);
        let bits = bit_string(&writer.into_bytes());

        // DC "00", three ZRLs for 48 zeros, then run 14 size 1
        let zrl = "11111111001";
        let prefix = format!("00{zrl}{zrl}{zrl}");
        assert!(bits.starts_with(&prefix));
        let (code, len) = ac.encode(0xE1).unwrap();
        let rest = &bits[prefix.len()..];
        let symbol = format!("{:0width$b}", code, width = len as usize);
        assert!(rest.starts_with(&format!("{symbol}1")));
        // only padding ones follow, no EOB
        assert!(rest[symbol.len() + 1..].chars().all(|c| c == '1'));
    }
}
