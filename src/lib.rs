#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Brain-key phrases and the signing keys derived from them.
///
/// A brain key is a phrase of dictionary words that deterministically yields
/// any number of secp256k1 keys, indexed by sequence number.
pub mod brainkey;

/// Network parameters: the public key prefix and the El Gamal group.
pub mod config;

/// Discrete-log ("El Gamal") keys derived from signing keys.
///
/// Used by the network's content-access protocol. The keys live in a fixed
/// multiplicative group and are exchanged as decimal strings.
pub mod elgamal;

/// The error type returned across the library.
pub mod error;

/// Generic cryptographic key management traits.
///
/// Defines common interfaces for public and secret key operations that
/// are implemented by specific cryptographic schemes.
pub mod keys;

/// Memo encryption, envelopes and multi-key decryption.
pub mod memo;

/// secp256k1 keys, their text forms and ECDH.
pub mod secp256k1;

/// Base58 encodings of private and public keys.
pub mod util;

// Re-export commonly used types for convenience
pub use brainkey::{BrainKey, BrainKeyInfo};
pub use config::NetworkParams;
pub use elgamal::{ElGamalKeyPair, ElGamalPublicKey, ElGamalSecretKey};
pub use error::{Error, Result};
pub use memo::{MemoEnvelope, MemoScan, MemoScanner};
pub use secp256k1::{KeyPair, Secp256k1PublicKey, Secp256k1SecretKey};
