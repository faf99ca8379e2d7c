use rand::{CryptoRng, RngCore};

use crate::error::Result;

/// Secret half of a keypair.
pub trait SecretKey: Sized {
    /// Length in bytes of the canonical encoding.
    fn key_length() -> usize;

    /// Draws a fresh key from a cryptographic RNG.
    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self;

    /// Parses the canonical big-endian encoding.
    fn from_bytes(slice: &[u8]) -> Result<Self>;
}

/// Public half of a keypair, always recomputed from its secret.
pub trait PublicKey: Sized + PartialEq {
    /// Matching secret key type.
    type K: SecretKey;

    /// Computes the public key belonging to `k`.
    fn from_secret_key(k: &Self::K) -> Self;

    /// Length in bytes of the canonical encoding.
    fn key_length() -> usize;

    /// Canonical encoding.
    fn as_bytes(&self) -> Vec<u8>;

    /// Checks that `privkey` is the secret behind `self`.
    fn verify_keypair(&self, privkey: &Self::K) -> Result<()>;
}
