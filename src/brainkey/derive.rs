use core::fmt;

use serde_derive::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroizing;

use crate::{
    brainkey::phrase::BrainKey,
    config::NetworkParams,
    error::{Error, Result},
    keys::SecretKey,
    secp256k1::{KeyPair, Secp256k1SecretKey},
};

/// Derives the signing key number `sequence` of a brain key.
///
/// The key is `sha256(sha512(phrase + " " + sequence))`. Sequence 0 is the
/// primary key; other sequences give independent keys from the same phrase.
/// The phrase is used exactly as given: [`BrainKey`] guarantees it is
/// already normalized.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] in the negligible case where the digest is
/// not a valid secp256k1 scalar.
pub fn derive_private_key(brain_key: &BrainKey, sequence: u64) -> Result<Secp256k1SecretKey> {
    let seed = Zeroizing::new(format!("{} {}", brain_key.as_str(), sequence));
    let outer = Sha512::digest(seed.as_bytes());
    let digest = Sha256::digest(outer);
    Secp256k1SecretKey::from_bytes(digest.as_slice())
        .map_err(|_| Error::InvalidInput("brain key digest is not a valid scalar".into()))
}

/// Primary keypair (sequence 0) of a brain key.
pub fn generate_keys(brain_key: &BrainKey) -> Result<KeyPair> {
    derive_private_key(brain_key, 0).map(KeyPair::from_secret)
}

/// Parses a derivation sequence number received as text.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] unless the text is a non-negative integer.
pub fn parse_sequence(text: &str) -> Result<u64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidInput(format!(
            "sequence {:?} is not a non-negative integer",
            text
        )));
    }
    text.parse()
        .map_err(|_| Error::InvalidInput(format!("sequence {:?} is out of range", text)))
}

/// Wallet-facing summary of a brain key's primary key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrainKeyInfo {
    /// Normalized phrase.
    pub brain_priv_key: String,
    /// Primary private key, WIF.
    pub wif_priv_key: String,
    /// Primary public key, prefixed.
    pub pub_key: String,
}

impl BrainKeyInfo {
    /// Builds the summary for `brain_key` on the given network.
    pub fn new(brain_key: &BrainKey, params: &NetworkParams) -> Result<Self> {
        let keys = generate_keys(brain_key)?;
        Ok(BrainKeyInfo {
            brain_priv_key: brain_key.as_str().to_string(),
            wif_priv_key: keys.secret().to_wif(),
            pub_key: params.public_key_to_string(keys.public()),
        })
    }
}

impl fmt::Debug for BrainKeyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrainKeyInfo")
            .field("pub_key", &self.pub_key)
            .finish_non_exhaustive()
    }
}
