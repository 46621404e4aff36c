//! Error type shared by the fallible parts of the crate.
//!
//! The fixed-array encoders never fail. Errors only come out of the
//! slice-based and lookup APIs, where the input size or the requested code
//! is not known until runtime.

use thiserror::Error;

use crate::ecc::table::CodeVariant;

/// Crate-wide error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input of the wrong shape, e.g. a data slice of the wrong length.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No table exists for the requested (n, k) pair.
    #[error("unsupported SECDED code ({n},{k})")]
    UnsupportedCode { n: usize, k: usize },

    /// A table mask references data bits at or above k.
    #[error("mask {index} of {variant} reaches past the data word: {mask:#x}")]
    MaskOutOfRange {
        variant: CodeVariant,
        index: usize,
        mask: u64,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
