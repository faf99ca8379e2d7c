//! Utility functions to encode keys for external integrations.
//!
//! Shared functions needed in different part of the library: the text forms
//! consumed from and produced for wallets and transaction builders.
//!

pub mod encoding;

// Re-export
pub use self::encoding::{decode_public_key, decode_wif, encode_public_key, encode_wif};
