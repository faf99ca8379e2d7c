//! secp256k1 signing keys and the ECDH shared secret between two of them.

/// Key sizes and encoding constants.
pub mod constants;

/// Secret, public and shared keys.
pub mod keys;

// Re-export
pub use self::keys::{KeyPair, Secp256k1PublicKey, Secp256k1SecretKey, SharedSecret};
