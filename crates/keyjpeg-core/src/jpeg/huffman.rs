//! Huffman coding for the baseline entropy coder.
//!
//! Only the encoding direction is needed: the four standard tables from
//! ITU T.81 Annex K.3 are compiled into symbol lookups and a [`BitWriter`]
//! packs codes and magnitude bits into a byte-stuffed stream.

/// A Huffman table in DHT form: code counts per length plus symbols in code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanTable {
    /// Table class (0 = DC, 1 = AC).
    pub class: u8,
    /// Table ID (0-3).
    pub id: u8,
    /// Number of codes of each length (1-16 bits).
    pub code_lengths: [u8; 16],
    /// Symbol values, ordered by code.
    pub values: &'static [u8],
}

impl HuffmanTable {
    /// The `Tc << 4 | Th` byte written in a DHT segment.
    pub fn class_and_id(&self) -> u8 {
        (self.class << 4) | self.id
    }
}

/// Annex K.3.3.1, DC table for the luminance component.
pub const DC_LUMINANCE: HuffmanTable = HuffmanTable {
    class: 0,
    id: 0,
    code_lengths: [0, 1, 5, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
    values: &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
};

/// Annex K.3.3.1, DC table for the chrominance components.
pub const DC_CHROMINANCE: HuffmanTable = HuffmanTable {
    class: 0,
    id: 1,
    code_lengths: [0, 3, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0],
    values: &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
};

/// Annex K.3.3.2, AC table for the luminance component.
#[rustfmt::skip]
pub const AC_LUMINANCE: HuffmanTable = HuffmanTable {
    class: 1,
    id: 0,
    code_lengths: [0, 2, 1, 3, 3, 2, 4, 3, 5, 5, 4, 4, 0, 0, 1, 0x7d],
    values: &[
        0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21, 0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07,
        0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xa1, 0x08, 0x23, 0x42, 0xb1, 0xc1, 0x15, 0x52, 0xd1, 0xf0,
        0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0a, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x25, 0x26, 0x27, 0x28,
        0x29, 0x2a, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3a, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49,
        0x4a, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5a, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69,
        0x6a, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7a, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89,
        0x8a, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9a, 0xa2, 0xa3, 0xa4, 0xa5, 0xa6, 0xa7,
        0xa8, 0xa9, 0xaa, 0xb2, 0xb3, 0xb4, 0xb5, 0xb6, 0xb7, 0xb8, 0xb9, 0xba, 0xc2, 0xc3, 0xc4, 0xc5,
        0xc6, 0xc7, 0xc8, 0xc9, 0xca, 0xd2, 0xd3, 0xd4, 0xd5, 0xd6, 0xd7, 0xd8, 0xd9, 0xda, 0xe1, 0xe2,
        0xe3, 0xe4, 0xe5, 0xe6, 0xe7, 0xe8, 0xe9, 0xea, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8,
        0xf9, 0xfa,
    ],
};

/// Annex K.3.3.2, AC table for the chrominance components.
#[rustfmt::skip]
pub const AC_CHROMINANCE: HuffmanTable = HuffmanTable {
    class: 1,
    id: 1,
    code_lengths: [0, 2, 1, 2, 4, 4, 3, 4, 7, 5, 4, 4, 0, 1, 2, 0x77],
    values: &[
        0x00, 0x01, 0x02, 0x03, 0x11, 0x04, 0x05, 0x21, 0x31, 0x06, 0x12, 0x41, 0x51, 0x07, 0x61, 0x71,
        0x13, 0x22, 0x32, 0x81, 0x08, 0x14, 0x42, 0x91, 0xa1, 0xb1, 0xc1, 0x09, 0x23, 0x33, 0x52, 0xf0,
        0x15, 0x62, 0x72, 0xd1, 0x0a, 0x16, 0x24, 0x34, 0xe1, 0x25, 0xf1, 0x17, 0x18, 0x19, 0x1a, 0x26,
        0x27, 0x28, 0x29, 0x2a, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3a, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48,
        0x49, 0x4a, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5a, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68,
        0x69, 0x6a, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7a, 0x82, 0x83, 0x84, 0x85, 0x86, 0x87,
        0x88, 0x89, 0x8a, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9a, 0xa2, 0xa3, 0xa4, 0xa5,
        0xa6, 0xa7, 0xa8, 0xa9, 0xaa, 0xb2, 0xb3, 0xb4, 0xb5, 0xb6, 0xb7, 0xb8, 0xb9, 0xba, 0xc2, 0xc3,
        0xc4, 0xc5, 0xc6, 0xc7, 0xc8, 0xc9, 0xca, 0xd2, 0xd3, 0xd4, 0xd5, 0xd6, 0xd7, 0xd8, 0xd9, 0xda,
        0xe2, 0xe3, 0xe4, 0xe5, 0xe6, 0xe7, 0xe8, 0xe9, 0xea, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8,
        0xf9, 0xfa,
    ],
};

/// All four tables in the order they are emitted.
pub const STANDARD_TABLES: [HuffmanTable; 4] =
    [DC_LUMINANCE, AC_LUMINANCE, DC_CHROMINANCE, AC_CHROMINANCE];

/// Compiled Huffman table for fast encoding.
///
/// Maps symbols to (code, length) pairs for O(1) encoding lookup.
#[derive(Debug, Clone)]
pub struct HuffmanEncoder {
    /// Encode lookup: symbol → (code, code_length).
    /// None if symbol is not in table.
    encode_map: [Option<(u16, u8)>; 256],
}

impl HuffmanEncoder {
    /// Build the encoder lookup from a table.
    ///
    /// Codes are assigned canonically: starting at 0, each symbol of the current
    /// length takes the running code which is then incremented, and the code is
    /// shifted left once per length.
    pub fn from_table(table: &HuffmanTable) -> Self {
        let mut encode_map = [None; 256];
        let mut symbols = table.values.iter();
        let mut code: u32 = 0;

        for (idx, &count) in table.code_lengths.iter().enumerate() {
            let len = idx as u8 + 1;
            for _ in 0..count {
                if let Some(&symbol) = symbols.next() {
                    debug_assert!(code < (1u32 << len), "Huffman code overflow");
                    encode_map[symbol as usize] = Some((code as u16, len));
                }
                code += 1;
            }
            code <<= 1;
        }

        HuffmanEncoder { encode_map }
    }

    /// Get code and length for a symbol.
    #[inline]
    pub fn encode(&self, symbol: u8) -> Option<(u16, u8)> {
        self.encode_map[symbol as usize]
    }
}

/// Packs variable length codes into entropy-coded scan bytes.
///
/// Bits are taken most significant first. Every emitted 0xFF is followed by a
/// stuffed 0x00, and [`BitWriter::flush`] fills the last partial byte with ones.
pub struct BitWriter {
    out: Vec<u8>,
    /// Right-aligned bits not yet emitted.
    acc: u64,
    /// Number of bits held in `acc`, below 8 between calls.
    pending: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        BitWriter {
            out: Vec::with_capacity(capacity),
            acc: 0,
            pending: 0,
        }
    }

    /// Append the low `count` bits of `value`, e.g. `write_bits(0b101, 3)`
    /// appends 1, 0, 1.
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) {
        debug_assert!(count <= 32);
        if count == 0 {
            return;
        }

        self.acc = (self.acc << count) | (value as u64 & ((1u64 << count) - 1));
        self.pending += count;
        self.emit_full_bytes();
    }

    /// Append the code of `symbol`.
    ///
    /// # Panics
    ///
    /// If `table` has no code for `symbol`. The standard tables hold a code for
    /// every symbol [`encode_coefficient`] can produce.
    #[inline]
    pub fn write_huffman(&mut self, symbol: u8, table: &HuffmanEncoder) {
        let Some((code, len)) = table.encode(symbol) else {
            unreachable!("no Huffman code for symbol {symbol:#04x}");
        };
        self.write_bits(code as u32, len);
    }

    fn emit_full_bytes(&mut self) {
        while self.pending >= 8 {
            self.pending -= 8;
            let byte = (self.acc >> self.pending) as u8;
            self.out.push(byte);
            if byte == 0xFF {
                self.out.push(0x00);
            }
        }
        self.acc &= (1u64 << self.pending) - 1;
    }

    /// Complete the last byte with 1 bits.
    pub fn flush(&mut self) {
        let fill = (8 - self.pending % 8) % 8;
        self.write_bits(u32::MAX, fill);
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.flush();
        self.out
    }

    /// Bytes emitted so far, stuffing included.
    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty() && self.pending == 0
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Magnitude category and extra bits of a DC difference or AC coefficient.
///
/// The category is the bit length of `|value|`. Positive values are sent as
/// is; negative ones as `value - 1` cut to `category` bits.
#[inline]
pub fn encode_coefficient(value: i16) -> (u8, u16) {
    let category = (u16::BITS - value.unsigned_abs().leading_zeros()) as u8;
    let mask = (1u32 << category) - 1;
    let extra = (value as i32 - i32::from(value < 0)) as u32 & mask;
    (category, extra as u16)
}
