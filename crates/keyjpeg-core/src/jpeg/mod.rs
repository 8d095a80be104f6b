//! Baseline sequential JPEG encoding.
//!
//! # Architecture
//!
//! ```text
//! RGB → 8x8 tile → YCbCr → DCT → quantize → zigzag → Huffman → JFIF
//! ```
//!
//! Every table and predictor lives inside a single [`encode`] call, so
//! concurrent encodes share nothing.

pub mod block;
pub mod color;
pub mod dct;
pub mod encoder;
pub mod huffman;
pub mod marker;
pub mod quant;
pub mod writer;
pub mod zigzag;

pub use encoder::{encode, encode_to_writer, encode_with_options, MAX_DIMENSION};
pub use huffman::{encode_coefficient, BitWriter, HuffmanEncoder, HuffmanTable};
pub use marker::Marker;
pub use quant::QuantizationTable;
pub use zigzag::ZIGZAG_TO_NATURAL;
