//! Even parity over unsigned words.
//!
//! A SECDED check bit is the parity of the data bits selected by one row of
//! the parity-check matrix. Everything in this module is a pure function of
//! its arguments.
//!
//! # Examples
//!
//! ```
//! use secded::ecc::parity::calc_parity;
//!
//! assert_eq!(calc_parity(0b1011u16, false), 1);
//! assert_eq!(calc_parity(0b1011u16, true), 0);
//! assert_eq!(calc_parity(0u64, true), 1);
//! ```

use num_traits::PrimInt;

/// Returns the even parity of `word` (1 when an odd number of bits are set),
/// flipped when `invert` is true.
///
/// Defined for every input: `calc_parity(0, invert) == invert as u8`.
#[inline]
pub fn calc_parity<W: PrimInt>(word: W, invert: bool) -> u8 {
    ((word.count_ones() & 1) as u8) ^ u8::from(invert)
}

/// Parity of a 64-bit word by xor-folding, without a popcount.
///
/// Produces the same bit as `calc_parity(word, false)`.
#[inline]
pub const fn parity_u64(word: u64) -> u8 {
    let mut folded = word;
    folded ^= folded >> 32;
    folded ^= folded >> 16;
    folded ^= folded >> 8;
    folded ^= folded >> 4;
    folded ^= folded >> 2;
    folded ^= folded >> 1;
    (folded & 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitvec::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_parity_of_zero() {
        assert_eq!(calc_parity(0u64, false), 0);
        assert_eq!(calc_parity(0u64, true), 1);
        assert_eq!(calc_parity(0u8, false), 0);
        assert_eq!(calc_parity(0u32, true), 1);
    }

    #[test]
    fn test_parity_small_words() {
        assert_eq!(calc_parity(1u16, false), 1);
        assert_eq!(calc_parity(2u16, false), 1);
        assert_eq!(calc_parity(3u16, false), 0);
        assert_eq!(calc_parity(3u16, true), 1);
        assert_eq!(calc_parity(u64::MAX, false), 0);
        assert_eq!(calc_parity(u64::MAX >> 1, false), 1);
    }

    #[test]
    fn test_parity_matches_bit_count() {
        let mut rng = StdRng::seed_from_u64(0x5ec_ded);
        for _ in 0..1000 {
            let word: u64 = rng.gen();
            let ones = word.view_bits::<Lsb0>().count_ones();
            let expected = (ones % 2) as u8;

            assert_eq!(calc_parity(word, false), expected);
            assert_eq!(calc_parity(word, true), expected ^ 1);
            assert_eq!(parity_u64(word), expected);
        }
    }

    #[test]
    fn test_parity_independent_of_width() {
        let word: u16 = 0xaca5;
        assert_eq!(calc_parity(word, false), calc_parity(word as u64, false));
        assert_eq!(calc_parity(word as u32, true), calc_parity(word as u64, true));
    }
}
