//! Error correction code encoders.
//!
//! This module provides the encoder half of the SECDED (single error
//! correct, double error detect) codes used to protect memory and bus words:
//! - [`parity`]: even parity of a word, optionally inverted
//! - [`table`]: the supported (n, k) codes and their parity-check tables
//! - [`secded`]: packing data bytes and assembling check values
//!
//! Decoding (syndrome computation and correction) lives with the consumer of
//! the codewords and is not part of this crate.
//!
//! # Examples
//!
//! ```rust
//! use secded::ecc::{CheckBitEncoder, Encoder};
//! use secded::ecc::table::{CodeVariant, Polarity};
//!
//! let encoder = Encoder::new(CodeVariant::Secded22_16, Polarity::Inverted);
//! assert_eq!(encoder.check_bits(&[0xff, 0xff]).unwrap(), 0x2a);
//! assert_eq!(encoder.check_width(), 6);
//! ```

pub use crate::error::Result;

/// Trait for encoders that compute check bits for a data word
pub trait CheckBitEncoder {
    /// Computes the check bits for one data word given as little-endian bytes
    fn check_bits(&self, data: &[u8]) -> Result<u8>;

    /// Number of data bits, k
    fn data_width(&self) -> usize;

    /// Number of check bits, r
    fn check_width(&self) -> usize;
}

pub mod parity;
pub use parity::calc_parity;

pub mod table;
pub use table::{CheckBitSpec, CodeTable, CodeVariant, Polarity};

pub mod secded;
pub use secded::{
    enc_secded_22_16, enc_secded_28_22, enc_secded_39_32, enc_secded_64_57, enc_secded_72_64,
    enc_secded_inv_22_16, enc_secded_inv_28_22, enc_secded_inv_39_32, enc_secded_inv_64_57,
    enc_secded_inv_72_64, encode_word, pack_le, Encoder,
};
