//! Error types shared by every module of the library.
//!
//! Reasons carried by the variants are static strings or caller-supplied
//! descriptions. They never contain key material, brain-key phrases or memo
//! plaintext.

use thiserror::Error;

/// Errors that can occur while deriving, encoding or using keys.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Caller error: malformed phrase, non-numeric sequence, empty nonce, ...
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The text is not a valid wire-form private key, or the key material
    /// handed to the El Gamal derivation is unusable.
    #[error("Wrong private key: {0}")]
    WrongPrivateKey(&'static str),

    /// The text is not a valid wire-form public key.
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(&'static str),

    /// Memo decryption failed.
    ///
    /// Wrong key, corrupted ciphertext and tampering are not told apart.
    #[error("Decryption failed")]
    DecryptionFailed,

    /// Memo encryption could not be set up.
    #[error("Encryption failed: {0}")]
    EncryptionFailed(&'static str),

    /// Network parameters are inconsistent.
    #[error("Invalid network parameters: {0}")]
    InvalidParams(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decryption_failure_has_no_detail() {
        assert_eq!(Error::DecryptionFailed.to_string(), "Decryption failed");
    }

    #[test]
    fn wrong_private_key_is_distinct_from_decryption_failure() {
        let err = Error::WrongPrivateKey("checksum mismatch");
        assert_ne!(err, Error::DecryptionFailed);
        assert_eq!(err.to_string(), "Wrong private key: checksum mismatch");
    }
}
