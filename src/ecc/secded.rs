//! SECDED check-bit encoding.
//!
//! A data word of k bits arrives as `ceil(k / 8)` little-endian bytes. For
//! each row of the code's table the encoder takes the parity of the covered
//! data bits and packs the results into an r-bit check value, row `i` at
//! bit `i`.
//!
//! Three ways in:
//! - [`encode_word`] is the generic kernel over a packed word and a table.
//! - `enc_secded_*` functions take fixed-size arrays and cannot fail.
//! - [`Encoder`] picks a table at runtime and checks slice lengths.
//!
//! # Examples
//!
//! ```
//! use secded::ecc::secded::{enc_secded_22_16, enc_secded_inv_22_16, Encoder};
//! use secded::ecc::table::{CodeVariant, Polarity};
//!
//! assert_eq!(enc_secded_22_16(&[0x01, 0x00]), 0x32);
//! assert_eq!(enc_secded_inv_22_16(&[0xff, 0xff]), 0x2a);
//!
//! let encoder = Encoder::new(CodeVariant::Secded39_32, Polarity::Plain);
//! assert_eq!(encoder.encode(&[0x01, 0x00, 0x00, 0x00]).unwrap(), 0x19);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::ecc::parity::calc_parity;
use crate::ecc::table::{
    CodeTable, CodeVariant, Polarity, SECDED_22_16, SECDED_28_22, SECDED_39_32, SECDED_64_57,
    SECDED_72_64, SECDED_INV_22_16, SECDED_INV_28_22, SECDED_INV_39_32, SECDED_INV_64_57,
    SECDED_INV_72_64,
};
use crate::ecc::{CheckBitEncoder, Result};
use crate::error::Error;

/// Rebuilds a data word from little-endian bytes: `bytes[0]` is bits 7..0.
///
/// Only the first eight bytes are read.
#[inline]
pub fn pack_le(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .take(8)
        .enumerate()
        .fold(0u64, |word, (i, &byte)| word | (u64::from(byte) << (8 * i)))
}

/// Computes the check value of `word` under `table`.
///
/// Bit `i` of the result is the parity of `word & table.specs()[i].mask`,
/// inverted when the row says so. Bits at or above r are zero.
#[inline]
pub fn encode_word(word: u64, table: &CodeTable) -> u8 {
    table
        .specs()
        .iter()
        .enumerate()
        .fold(0u8, |check, (i, spec)| {
            check | (calc_parity(word & spec.mask, spec.invert) << i)
        })
}

/// Check bits of the (22,16) code.
pub fn enc_secded_22_16(bytes: &[u8; 2]) -> u8 {
    encode_word(pack_le(bytes), &SECDED_22_16)
}

/// Check bits of the (28,22) code. Bits 7..6 of `bytes[2]` are ignored.
pub fn enc_secded_28_22(bytes: &[u8; 3]) -> u8 {
    encode_word(pack_le(bytes), &SECDED_28_22)
}

/// Check bits of the (39,32) code.
pub fn enc_secded_39_32(bytes: &[u8; 4]) -> u8 {
    encode_word(pack_le(bytes), &SECDED_39_32)
}

/// Check bits of the (64,57) code. Bits 7..1 of `bytes[7]` are ignored.
pub fn enc_secded_64_57(bytes: &[u8; 8]) -> u8 {
    encode_word(pack_le(bytes), &SECDED_64_57)
}

/// Check bits of the (72,64) code.
pub fn enc_secded_72_64(bytes: &[u8; 8]) -> u8 {
    encode_word(pack_le(bytes), &SECDED_72_64)
}

/// Check bits of the inverted (22,16) code.
pub fn enc_secded_inv_22_16(bytes: &[u8; 2]) -> u8 {
    encode_word(pack_le(bytes), &SECDED_INV_22_16)
}

/// Check bits of the inverted (28,22) code.
pub fn enc_secded_inv_28_22(bytes: &[u8; 3]) -> u8 {
    encode_word(pack_le(bytes), &SECDED_INV_28_22)
}

/// Check bits of the inverted (39,32) code.
pub fn enc_secded_inv_39_32(bytes: &[u8; 4]) -> u8 {
    encode_word(pack_le(bytes), &SECDED_INV_39_32)
}

/// Check bits of the inverted (64,57) code.
pub fn enc_secded_inv_64_57(bytes: &[u8; 8]) -> u8 {
    encode_word(pack_le(bytes), &SECDED_INV_64_57)
}

/// Check bits of the inverted (72,64) code.
pub fn enc_secded_inv_72_64(bytes: &[u8; 8]) -> u8 {
    encode_word(pack_le(bytes), &SECDED_INV_72_64)
}

/// Encoder bound to one code and polarity, chosen at runtime.
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    table: &'static CodeTable,
}

impl Encoder {
    /// Creates an encoder for the given code and polarity.
    pub fn new(variant: CodeVariant, polarity: Polarity) -> Self {
        log::debug!("secded encoder for {} ({})", variant, polarity);
        Self {
            table: CodeTable::lookup(variant, polarity),
        }
    }

    /// Creates an encoder from codeword and data lengths, e.g. `(39, 32)`.
    pub fn for_lengths(n: usize, k: usize, polarity: Polarity) -> Result<Self> {
        let variant = CodeVariant::from_lengths(n, k)?;
        Ok(Self::new(variant, polarity))
    }

    pub fn variant(&self) -> CodeVariant {
        self.table.variant()
    }

    pub fn polarity(&self) -> Polarity {
        self.table.polarity()
    }

    pub fn table(&self) -> &'static CodeTable {
        self.table
    }

    /// Check value of an already packed data word.
    #[inline]
    pub fn encode_word(&self, word: u64) -> u8 {
        encode_word(word, self.table)
    }

    /// Check value of one data word given as exactly `ceil(k / 8)` bytes.
    pub fn encode(&self, data: &[u8]) -> Result<u8> {
        self.check_len(data.len())?;
        Ok(self.encode_word(pack_le(data)))
    }

    /// Full n-bit codeword: data bits in `[0, k)`, check bits in `[k, n)`.
    ///
    /// Padding bits above k in the last data byte are dropped.
    pub fn codeword(&self, data: &[u8]) -> Result<u128> {
        let check = self.encode(data)?;
        let variant = self.variant();
        let word = pack_le(data) & variant.data_mask();
        Ok(u128::from(word) | (u128::from(check) << variant.k()))
    }

    /// Encodes a buffer of back-to-back data words, one check value per word.
    pub fn encode_batch(&self, data: &[u8]) -> Result<Vec<u8>> {
        let width = self.variant().byte_len();
        if data.len() % width != 0 {
            log::warn!(
                "rejecting {} byte batch for {}: not a multiple of {}",
                data.len(),
                self.variant(),
                width
            );
            return Err(Error::InvalidInput(format!(
                "batch of {} bytes is not a multiple of the {} byte data word",
                data.len(),
                width
            )));
        }

        log::trace!("encoding {} words with {}", data.len() / width, self.variant());

        #[cfg(feature = "parallel")]
        let checks = data
            .par_chunks_exact(width)
            .map(|chunk| self.encode_word(pack_le(chunk)))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let checks = data
            .chunks_exact(width)
            .map(|chunk| self.encode_word(pack_le(chunk)))
            .collect();

        Ok(checks)
    }

    fn check_len(&self, len: usize) -> Result<()> {
        let expected = self.variant().byte_len();
        if len != expected {
            log::warn!(
                "rejecting {} byte data word for {}, expected {}",
                len,
                self.variant(),
                expected
            );
            return Err(Error::InvalidInput(format!(
                "{} expects {} data bytes, got {}",
                self.variant(),
                expected,
                len
            )));
        }
        Ok(())
    }
}

impl CheckBitEncoder for Encoder {
    fn check_bits(&self, data: &[u8]) -> Result<u8> {
        self.encode(data)
    }

    fn data_width(&self) -> usize {
        self.variant().k()
    }

    fn check_width(&self) -> usize {
        self.variant().r()
    }
}
