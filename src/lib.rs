pub mod ecc;
pub mod error;

pub use ecc::{CheckBitSpec, CodeTable, CodeVariant, Encoder, Polarity};
pub use error::{Error, Result};
