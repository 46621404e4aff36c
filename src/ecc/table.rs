//! Parity-check tables for the supported SECDED codes.
//!
//! Each code maps a k-bit data word to r check bits. Check bit `i` is the
//! parity of the data bits selected by `specs[i].mask`, optionally inverted.
//! The masks are the rows of a fixed Hsiao-style parity-check matrix and
//! must stay bit-exact: a decoder built elsewhere uses the same matrix.
//!
//! | code    | k  | r | data bytes |
//! |---------|----|---|------------|
//! | (22,16) | 16 | 6 | 2          |
//! | (28,22) | 22 | 6 | 3          |
//! | (39,32) | 32 | 7 | 4          |
//! | (64,57) | 57 | 7 | 8          |
//! | (72,64) | 64 | 8 | 8          |
//!
//! Every code comes in two polarities. The inverted tables share the masks
//! of the plain ones and set `invert` on the odd check bits, so an all-zero
//! data word never encodes to all-zero check bits.

use std::fmt;

use bitvec::prelude::*;

use crate::ecc::Result;
use crate::error::Error;

/// One of the supported (n, k) codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeVariant {
    Secded22_16,
    Secded28_22,
    Secded39_32,
    Secded64_57,
    Secded72_64,
}

impl CodeVariant {
    /// Every supported code, narrowest first.
    pub const ALL: [CodeVariant; 5] = [
        CodeVariant::Secded22_16,
        CodeVariant::Secded28_22,
        CodeVariant::Secded39_32,
        CodeVariant::Secded64_57,
        CodeVariant::Secded72_64,
    ];

    /// Codeword length (data plus check bits).
    pub const fn n(self) -> usize {
        self.k() + self.r()
    }

    /// Number of data bits.
    pub const fn k(self) -> usize {
        match self {
            CodeVariant::Secded22_16 => 16,
            CodeVariant::Secded28_22 => 22,
            CodeVariant::Secded39_32 => 32,
            CodeVariant::Secded64_57 => 57,
            CodeVariant::Secded72_64 => 64,
        }
    }

    /// Number of check bits.
    pub const fn r(self) -> usize {
        match self {
            CodeVariant::Secded22_16 | CodeVariant::Secded28_22 => 6,
            CodeVariant::Secded39_32 | CodeVariant::Secded64_57 => 7,
            CodeVariant::Secded72_64 => 8,
        }
    }

    /// Bytes needed to carry one data word, `ceil(k / 8)`.
    pub const fn byte_len(self) -> usize {
        self.k().div_ceil(8)
    }

    /// Mask of the bit positions `[0, k)`.
    pub const fn data_mask(self) -> u64 {
        u64::MAX >> (64 - self.k())
    }

    /// Finds the code with the given codeword and data lengths.
    pub fn from_lengths(n: usize, k: usize) -> Result<Self> {
        CodeVariant::ALL
            .into_iter()
            .find(|variant| variant.n() == n && variant.k() == k)
            .ok_or(Error::UnsupportedCode { n, k })
    }
}

impl fmt::Display for CodeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.n(), self.k())
    }
}

/// Whether the odd check bits are stored inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Polarity {
    /// No check bit is inverted.
    #[default]
    Plain,
    /// Check bits 1, 3, 5, ... are inverted.
    Inverted,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Plain => f.write_str("plain"),
            Polarity::Inverted => f.write_str("inv"),
        }
    }
}

/// One row of the parity-check matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckBitSpec {
    /// Data bits covered by this check bit.
    pub mask: u64,
    /// Flip the computed parity.
    pub invert: bool,
}

impl CheckBitSpec {
    pub const fn new(mask: u64, invert: bool) -> Self {
        Self { mask, invert }
    }

    /// Number of data bits this check bit covers.
    pub fn weight(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Positions of the data bits covered by this check bit, ascending.
    pub fn covered_bits(&self) -> impl Iterator<Item = usize> + '_ {
        self.mask.view_bits::<Lsb0>().iter_ones()
    }
}

/// The ordered check-bit rows of one code in one polarity.
///
/// `specs()[i]` produces bit `i` of the check value.
#[derive(Debug, PartialEq, Eq)]
pub struct CodeTable {
    variant: CodeVariant,
    polarity: Polarity,
    specs: &'static [CheckBitSpec],
}

impl CodeTable {
    /// Returns the static table for a code and polarity.
    pub fn lookup(variant: CodeVariant, polarity: Polarity) -> &'static CodeTable {
        match (variant, polarity) {
            (CodeVariant::Secded22_16, Polarity::Plain) => &SECDED_22_16,
            (CodeVariant::Secded28_22, Polarity::Plain) => &SECDED_28_22,
            (CodeVariant::Secded39_32, Polarity::Plain) => &SECDED_39_32,
            (CodeVariant::Secded64_57, Polarity::Plain) => &SECDED_64_57,
            (CodeVariant::Secded72_64, Polarity::Plain) => &SECDED_72_64,
            (CodeVariant::Secded22_16, Polarity::Inverted) => &SECDED_INV_22_16,
            (CodeVariant::Secded28_22, Polarity::Inverted) => &SECDED_INV_28_22,
            (CodeVariant::Secded39_32, Polarity::Inverted) => &SECDED_INV_39_32,
            (CodeVariant::Secded64_57, Polarity::Inverted) => &SECDED_INV_64_57,
            (CodeVariant::Secded72_64, Polarity::Inverted) => &SECDED_INV_72_64,
        }
    }

    pub fn variant(&self) -> CodeVariant {
        self.variant
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn specs(&self) -> &'static [CheckBitSpec] {
        self.specs
    }

    /// Number of check bits, r.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Checks that the table has r rows and that no mask covers bits at or
    /// above k.
    pub fn validate(&self) -> Result<()> {
        if self.specs.len() != self.variant.r() {
            return Err(Error::InvalidInput(format!(
                "{} table has {} rows, expected {}",
                self.variant,
                self.specs.len(),
                self.variant.r()
            )));
        }

        let outside = !self.variant.data_mask();
        for (index, spec) in self.specs.iter().enumerate() {
            if spec.mask & outside != 0 {
                log::warn!(
                    "{} {} mask {} covers bits past k: {:#x}",
                    self.variant,
                    self.polarity,
                    index,
                    spec.mask
                );
                return Err(Error::MaskOutOfRange {
                    variant: self.variant,
                    index,
                    mask: spec.mask,
                });
            }
        }
        Ok(())
    }

    /// Check bits that change when data bit `bit` flips.
    ///
    /// This is column `bit` of the parity-check matrix, packed with check
    /// bit `i` at position `i`.
    pub fn flip_signature(&self, bit: usize) -> Result<u8> {
        if bit >= self.variant.k() {
            return Err(Error::InvalidInput(format!(
                "data bit {} out of range for {}",
                bit, self.variant
            )));
        }

        Ok(self
            .specs
            .iter()
            .enumerate()
            .filter(|(_, spec)| (spec.mask >> bit) & 1 == 1)
            .fold(0u8, |acc, (i, _)| acc | (1 << i)))
    }
}

const fn plain(mask: u64) -> CheckBitSpec {
    CheckBitSpec::new(mask, false)
}

const fn inv(mask: u64) -> CheckBitSpec {
    CheckBitSpec::new(mask, true)
}

pub static SECDED_22_16: CodeTable = CodeTable {
    variant: CodeVariant::Secded22_16,
    polarity: Polarity::Plain,
    specs: &[
        plain(0x496e),
        plain(0xf20b),
        plain(0x8ed8),
        plain(0x7714),
        plain(0xaca5),
        plain(0x11f3),
    ],
};

pub static SECDED_28_22: CodeTable = CodeTable {
    variant: CodeVariant::Secded28_22,
    polarity: Polarity::Plain,
    specs: &[
        plain(0x3003ff),
        plain(0x10fc0f),
        plain(0x271c71),
        plain(0x3b6592),
        plain(0x3daaa4),
        plain(0x3ed348),
    ],
};

pub static SECDED_39_32: CodeTable = CodeTable {
    variant: CodeVariant::Secded39_32,
    polarity: Polarity::Plain,
    specs: &[
        plain(0x2606bd25),
        plain(0xdeba8050),
        plain(0x413d89aa),
        plain(0x31234ed1),
        plain(0xc2c1323b),
        plain(0x2dcc624c),
        plain(0x98505586),
    ],
};

pub static SECDED_64_57: CodeTable = CodeTable {
    variant: CodeVariant::Secded64_57,
    polarity: Polarity::Plain,
    specs: &[
        plain(0x103fff800007fff),
        plain(0x17c1ff801ff801f),
        plain(0x1bde1f87e0781e1),
        plain(0x1deee3b8e388e22),
        plain(0x1ef76cdb2c93244),
        plain(0x1f7bb56d5525488),
        plain(0x1fbdda769a46910),
    ],
};

pub static SECDED_72_64: CodeTable = CodeTable {
    variant: CodeVariant::Secded72_64,
    polarity: Polarity::Plain,
    specs: &[
        plain(0xb9000000001fffff),
        plain(0x5e00000fffe0003f),
        plain(0x67003ff003e007c1),
        plain(0xcd0fc0f03c207842),
        plain(0xb671c711c4438884),
        plain(0xb5b65926488c9108),
        plain(0xcbdaaa4a91152210),
        plain(0x7aed348d221a4420),
    ],
};

pub static SECDED_INV_22_16: CodeTable = CodeTable {
    variant: CodeVariant::Secded22_16,
    polarity: Polarity::Inverted,
    specs: &[
        plain(0x496e),
        inv(0xf20b),
        plain(0x8ed8),
        inv(0x7714),
        plain(0xaca5),
        inv(0x11f3),
    ],
};

pub static SECDED_INV_28_22: CodeTable = CodeTable {
    variant: CodeVariant::Secded28_22,
    polarity: Polarity::Inverted,
    specs: &[
        plain(0x3003ff),
        inv(0x10fc0f),
        plain(0x271c71),
        inv(0x3b6592),
        plain(0x3daaa4),
        inv(0x3ed348),
    ],
};

pub static SECDED_INV_39_32: CodeTable = CodeTable {
    variant: CodeVariant::Secded39_32,
    polarity: Polarity::Inverted,
    specs: &[
        plain(0x2606bd25),
        inv(0xdeba8050),
        plain(0x413d89aa),
        inv(0x31234ed1),
        plain(0xc2c1323b),
        inv(0x2dcc624c),
        plain(0x98505586),
    ],
};

pub static SECDED_INV_64_57: CodeTable = CodeTable {
    variant: CodeVariant::Secded64_57,
    polarity: Polarity::Inverted,
    specs: &[
        plain(0x103fff800007fff),
        inv(0x17c1ff801ff801f),
        plain(0x1bde1f87e0781e1),
        inv(0x1deee3b8e388e22),
        plain(0x1ef76cdb2c93244),
        inv(0x1f7bb56d5525488),
        plain(0x1fbdda769a46910),
    ],
};

pub static SECDED_INV_72_64: CodeTable = CodeTable {
    variant: CodeVariant::Secded72_64,
    polarity: Polarity::Inverted,
    specs: &[
        plain(0xb9000000001fffff),
        inv(0x5e00000fffe0003f),
        plain(0x67003ff003e007c1),
        inv(0xcd0fc0f03c207842),
        plain(0xb671c711c4438884),
        inv(0xb5b65926488c9108),
        plain(0xcbdaaa4a91152210),
        inv(0x7aed348d221a4420),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tables() -> impl Iterator<Item = &'static CodeTable> {
        CodeVariant::ALL.into_iter().flat_map(|variant| {
            [Polarity::Plain, Polarity::Inverted]
                .into_iter()
                .map(move |polarity| CodeTable::lookup(variant, polarity))
        })
    }

    #[test]
    fn test_variant_dimensions() {
        let dims: Vec<_> = CodeVariant::ALL
            .iter()
            .map(|v| (v.n(), v.k(), v.r(), v.byte_len()))
            .collect();
        assert_eq!(
            dims,
            vec![
                (22, 16, 6, 2),
                (28, 22, 6, 3),
                (39, 32, 7, 4),
                (64, 57, 7, 8),
                (72, 64, 8, 8),
            ]
        );
        assert_eq!(CodeVariant::Secded72_64.data_mask(), u64::MAX);
        assert_eq!(CodeVariant::Secded28_22.data_mask(), 0x3f_ffff);
    }

    #[test]
    fn test_from_lengths() {
        assert_eq!(
            CodeVariant::from_lengths(39, 32).unwrap(),
            CodeVariant::Secded39_32
        );
        assert_eq!(
            CodeVariant::from_lengths(38, 32),
            Err(Error::UnsupportedCode { n: 38, k: 32 })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CodeVariant::Secded64_57.to_string(), "(64,57)");
        assert_eq!(Polarity::Inverted.to_string(), "inv");
        assert_eq!(Polarity::default(), Polarity::Plain);
    }

    #[test]
    fn test_lookup_returns_requested_table() {
        for table in all_tables() {
            assert_eq!(table.len(), table.variant().r());
            assert!(!table.is_empty());
        }
        assert_eq!(
            CodeTable::lookup(CodeVariant::Secded39_32, Polarity::Inverted).polarity(),
            Polarity::Inverted
        );
    }

    #[test]
    fn test_masks_confined_to_data_bits() {
        for table in all_tables() {
            assert_eq!(table.validate(), Ok(()), "{}", table.variant());
        }
    }

    #[test]
    fn test_validate_rejects_wide_mask() {
        static BAD: CodeTable = CodeTable {
            variant: CodeVariant::Secded22_16,
            polarity: Polarity::Plain,
            specs: &[
                plain(0x496e),
                plain(0x1f20b),
                plain(0x8ed8),
                plain(0x7714),
                plain(0xaca5),
                plain(0x11f3),
            ],
        };
        assert_eq!(
            BAD.validate(),
            Err(Error::MaskOutOfRange {
                variant: CodeVariant::Secded22_16,
                index: 1,
                mask: 0x1f20b,
            })
        );
    }

    #[test]
    fn test_inverted_tables_share_masks() {
        for variant in CodeVariant::ALL {
            let plain = CodeTable::lookup(variant, Polarity::Plain);
            let inverted = CodeTable::lookup(variant, Polarity::Inverted);
            for (i, (p, q)) in plain.specs().iter().zip(inverted.specs()).enumerate() {
                assert_eq!(p.mask, q.mask);
                assert!(!p.invert);
                assert_eq!(q.invert, i % 2 == 1, "{} bit {}", variant, i);
            }
        }
    }

    #[test]
    fn test_flip_signatures_are_distinct_odd_columns() {
        for variant in CodeVariant::ALL {
            let table = CodeTable::lookup(variant, Polarity::Plain);
            let mut seen = std::collections::HashSet::new();
            for bit in 0..variant.k() {
                let column = table.flip_signature(bit).unwrap();
                assert!(column.count_ones() >= 3, "{} bit {}", variant, bit);
                assert_eq!(column.count_ones() % 2, 1, "{} bit {}", variant, bit);
                assert!(seen.insert(column), "{} bit {} repeats", variant, bit);
            }
        }
    }

    #[test]
    fn test_flip_signature_out_of_range() {
        let table = CodeTable::lookup(CodeVariant::Secded64_57, Polarity::Plain);
        assert!(table.flip_signature(56).is_ok());
        assert!(matches!(
            table.flip_signature(57),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_covered_bits() {
        let spec = SECDED_22_16.specs()[5];
        assert_eq!(
            spec.covered_bits().collect::<Vec<_>>(),
            vec![0, 1, 4, 5, 6, 7, 8, 12]
        );
        assert_eq!(spec.weight(), 8);
    }
}
