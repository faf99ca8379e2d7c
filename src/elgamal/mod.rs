//! Discrete-log ("El Gamal") keys for the network's content-access proofs.
//!
//! This module derives a second keypair from a signing key. The pair lives in
//! the multiplicative group modulo a fixed prime and is unrelated to the
//! secp256k1 keys used for signing and memo encryption.

/// Fixed group parameters.
pub mod constants;

/// Key types and derivation.
pub mod elgamal;

/// Re-export of the key types for convenience.
pub use self::elgamal::{
    el_gamal_private, el_gamal_private_from_wif, el_gamal_public, el_gamal_public_with,
    ElGamalKeyPair, ElGamalParams, ElGamalPublicKey, ElGamalSecretKey,
};
