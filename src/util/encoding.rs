//! Wire encodings for keys.
//!
//! Provides the checksummed base58 text forms used wherever keys cross the
//! library boundary:
//!
//! * private keys use the wallet-import format (WIF):
//!   `base58(0x80 || secret || checksum)`, where the checksum is the first four
//!   bytes of `sha256(sha256(0x80 || secret))`;
//! * public keys use the network prefix followed by
//!   `base58(compressed point || checksum)`, where the checksum is the first
//!   four bytes of `ripemd160(compressed point)`.
//!
//! These layouts are fixed by the deployed network and must not change.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::secp256k1::constants::{
    CHECKSUM_LENGTH, COMPRESSED_PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, WIF_VERSION,
};

/// Length of a decoded WIF payload: version byte, secret, checksum.
const WIF_PAYLOAD_LENGTH: usize = 1 + SECRET_KEY_LENGTH + CHECKSUM_LENGTH;

/// Length of a decoded public key payload: compressed point, checksum.
const PUBLIC_KEY_PAYLOAD_LENGTH: usize = COMPRESSED_PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH;

/// Serialize a 32-byte secret as a WIF string.
pub fn encode_wif(secret: &[u8; SECRET_KEY_LENGTH]) -> String {
    let mut bytes = Zeroizing::new(Vec::with_capacity(WIF_PAYLOAD_LENGTH));
    bytes.push(WIF_VERSION);
    bytes.extend_from_slice(secret);
    let checksum = Sha256::digest(Sha256::digest(bytes.as_slice()));
    bytes.extend_from_slice(&checksum[..CHECKSUM_LENGTH]);
    bs58::encode(bytes.as_slice()).into_string()
}

/// Parse a WIF string back into the 32-byte secret.
///
/// Both the current double-SHA-256 checksum and the legacy single-SHA-256
/// checksum are accepted.
///
/// # Errors
///
/// Returns [`Error::WrongPrivateKey`] if the text is not base58, has the wrong
/// length, carries the wrong version byte or fails the checksum.
pub fn decode_wif(text: &str) -> Result<Zeroizing<[u8; SECRET_KEY_LENGTH]>> {
    let decoded = Zeroizing::new(
        bs58::decode(text.trim())
            .into_vec()
            .map_err(|_| Error::WrongPrivateKey("not base58"))?,
    );
    if decoded.len() != WIF_PAYLOAD_LENGTH {
        return Err(Error::WrongPrivateKey("invalid length"));
    }
    if decoded[0] != WIF_VERSION {
        return Err(Error::WrongPrivateKey("invalid version byte"));
    }

    let (payload, checksum) = decoded.split_at(WIF_PAYLOAD_LENGTH - CHECKSUM_LENGTH);
    let single = Sha256::digest(payload);
    let double = Sha256::digest(single);
    if &double[..CHECKSUM_LENGTH] != checksum && &single[..CHECKSUM_LENGTH] != checksum {
        return Err(Error::WrongPrivateKey("checksum mismatch"));
    }

    let mut secret = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
    secret.copy_from_slice(&payload[1..]);
    Ok(secret)
}

/// Serialize a compressed public key with the given network prefix.
pub fn encode_public_key(point: &[u8; COMPRESSED_PUBLIC_KEY_LENGTH], prefix: &str) -> String {
    let mut bytes = Vec::with_capacity(PUBLIC_KEY_PAYLOAD_LENGTH);
    bytes.extend_from_slice(point);
    let checksum = Ripemd160::digest(point);
    bytes.extend_from_slice(&checksum[..CHECKSUM_LENGTH]);
    format!("{}{}", prefix, bs58::encode(bytes).into_string())
}

/// Parse a prefixed public key string into its compressed point bytes.
///
/// Only the framing is checked here; whether the bytes are a point on the
/// curve is up to the caller.
///
/// # Errors
///
/// Returns [`Error::InvalidPublicKey`] if the prefix does not match, the body
/// is not base58, the length is wrong or the checksum fails.
pub fn decode_public_key(text: &str, prefix: &str) -> Result<[u8; COMPRESSED_PUBLIC_KEY_LENGTH]> {
    let body = text
        .trim()
        .strip_prefix(prefix)
        .ok_or(Error::InvalidPublicKey("unexpected prefix"))?;
    let decoded = bs58::decode(body)
        .into_vec()
        .map_err(|_| Error::InvalidPublicKey("not base58"))?;
    if decoded.len() != PUBLIC_KEY_PAYLOAD_LENGTH {
        return Err(Error::InvalidPublicKey("invalid length"));
    }

    let (point, checksum) = decoded.split_at(COMPRESSED_PUBLIC_KEY_LENGTH);
    if &Ripemd160::digest(point)[..CHECKSUM_LENGTH] != checksum {
        return Err(Error::InvalidPublicKey("checksum mismatch"));
    }

    let mut out = [0u8; COMPRESSED_PUBLIC_KEY_LENGTH];
    out.copy_from_slice(point);
    Ok(out)
}
