//! Memo encryption keyed by an ECDH shared secret.
//!
//! ```text
//! secret   = sha512(x(sender_secret * recipient_public))
//! material = sha512(nonce || hex(secret))
//! key, iv  = material[0..32], material[32..48]
//! payload  = sha256(plaintext)[0..4] || plaintext
//! message  = AES-256-CBC(key, iv, PKCS#7(payload))
//! ```
//!
//! The recipient computes the same secret from its own secret key and the
//! sender's public key. A nonce must never be reused with the same pair of
//! keys.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroizing;

use crate::{
    error::{Error, Result},
    secp256k1::{constants::CHECKSUM_LENGTH, Secp256k1PublicKey, Secp256k1SecretKey, SharedSecret},
};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

const AES_KEY_LENGTH: usize = 32;
const AES_IV_LENGTH: usize = 16;
const AES_BLOCK_SIZE: usize = 16;

/// Encrypts `plaintext` from `sender` to `recipient`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `nonce` is empty.
pub fn encrypt(
    plaintext: &str,
    sender: &Secp256k1SecretKey,
    recipient: &Secp256k1PublicKey,
    nonce: &str,
) -> Result<Vec<u8>> {
    check_nonce(nonce)?;
    let material = cipher_material(&sender.shared_secret(recipient), nonce);

    let mut payload = Zeroizing::new(Vec::with_capacity(CHECKSUM_LENGTH + plaintext.len()));
    payload.extend_from_slice(&checksum(plaintext.as_bytes()));
    payload.extend_from_slice(plaintext.as_bytes());

    let cipher = Aes256CbcEnc::new_from_slices(key_of(&material), iv_of(&material))
        .map_err(|_| Error::EncryptionFailed("cipher init failed"))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(&payload))
}

/// Decrypts a memo produced by [`encrypt`].
///
/// `receiver` is one of the two parties' secret keys and `counterparty` the
/// other party's public key.
///
/// # Errors
///
/// Every failure is reported as [`Error::DecryptionFailed`]: bad ciphertext
/// length or padding, a payload too short to hold the checksum, a checksum
/// mismatch or plaintext that is not UTF-8. Recovered bytes are never
/// returned on failure.
pub fn decrypt(
    ciphertext: &[u8],
    receiver: &Secp256k1SecretKey,
    counterparty: &Secp256k1PublicKey,
    nonce: &str,
) -> Result<String> {
    if nonce.is_empty() || ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_SIZE != 0 {
        return Err(Error::DecryptionFailed);
    }
    let material = cipher_material(&receiver.shared_secret(counterparty), nonce);

    let cipher = Aes256CbcDec::new_from_slices(key_of(&material), iv_of(&material))
        .map_err(|_| Error::DecryptionFailed)?;
    let payload = Zeroizing::new(
        cipher
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| Error::DecryptionFailed)?,
    );
    let text = open_payload(&payload)?;
    String::from_utf8(text.to_vec()).map_err(|_| Error::DecryptionFailed)
}

/// Fresh random nonce, as the decimal text of a 64-bit integer.
pub fn generate_nonce() -> String {
    OsRng.next_u64().to_string()
}

/// First four bytes of `sha256(data)`.
fn checksum(data: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let digest = Sha256::digest(data);
    let mut out = [0u8; CHECKSUM_LENGTH];
    out.copy_from_slice(&digest[..CHECKSUM_LENGTH]);
    out
}

/// Splits `checksum || text` and verifies the checksum.
fn open_payload(payload: &[u8]) -> Result<&[u8]> {
    if payload.len() < CHECKSUM_LENGTH {
        return Err(Error::DecryptionFailed);
    }
    let (stored, text) = payload.split_at(CHECKSUM_LENGTH);
    if stored != checksum(text) {
        return Err(Error::DecryptionFailed);
    }
    Ok(text)
}

fn check_nonce(nonce: &str) -> Result<()> {
    if nonce.is_empty() {
        return Err(Error::InvalidInput("memo nonce is empty".into()));
    }
    Ok(())
}

fn cipher_material(secret: &SharedSecret, nonce: &str) -> Zeroizing<[u8; 64]> {
    let mut hasher = Sha512::new();
    hasher.update(nonce.as_bytes());
    hasher.update(secret.to_hex().as_bytes());
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(hasher.finalize().as_slice());
    out
}

fn key_of(material: &[u8; 64]) -> &[u8] {
    &material[..AES_KEY_LENGTH]
}

fn iv_of(material: &[u8; 64]) -> &[u8] {
    &material[AES_KEY_LENGTH..AES_KEY_LENGTH + AES_IV_LENGTH]
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
