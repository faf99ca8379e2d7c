//! The memo attached to a transfer.
//!
//! On the wire an envelope is
//!
//! ```json
//! { "from": "DCT…", "to": "DCT…", "nonce": "…", "message": "<hex>" }
//! ```
//!
//! A memo whose `from` key is the null key (33 zero bytes) is not encrypted:
//! its message is four zero bytes followed by the UTF-8 text.

use serde_derive::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    memo::cipher,
    secp256k1::{constants::CHECKSUM_LENGTH, Secp256k1PublicKey, Secp256k1SecretKey},
};

/// Nonce carried by unencrypted memos.
const PLAIN_MEMO_NONCE: &str = "0";

/// Encrypted or plain memo with the keys of both parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoEnvelope {
    /// Sender's memo key; `None` is the null key.
    #[serde(with = "optional_key")]
    pub from: Option<Secp256k1PublicKey>,
    /// Recipient's memo key; `None` is the null key.
    #[serde(with = "optional_key")]
    pub to: Option<Secp256k1PublicKey>,
    /// Per-memo nonce mixed into the cipher key.
    pub nonce: String,
    /// Ciphertext, or checksum-framed text for plain memos.
    #[serde(with = "hex_bytes")]
    pub message: Vec<u8>,
}

impl MemoEnvelope {
    /// Encrypts `plaintext` from `sender` to `recipient`.
    pub fn seal(
        plaintext: &str,
        sender: &Secp256k1SecretKey,
        recipient: &Secp256k1PublicKey,
        nonce: &str,
    ) -> Result<Self> {
        Ok(MemoEnvelope {
            from: Some(sender.public_key()),
            to: Some(*recipient),
            nonce: nonce.to_string(),
            message: cipher::encrypt(plaintext, sender, recipient, nonce)?,
        })
    }

    /// Builds an unencrypted memo.
    pub fn plain(text: &str) -> Self {
        let mut message = Vec::with_capacity(CHECKSUM_LENGTH + text.len());
        message.extend_from_slice(&[0u8; CHECKSUM_LENGTH]);
        message.extend_from_slice(text.as_bytes());
        MemoEnvelope {
            from: None,
            to: None,
            nonce: PLAIN_MEMO_NONCE.to_string(),
            message,
        }
    }

    /// Parses the JSON wire form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidInput(format!("malformed memo: {}", e)))
    }

    /// JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::InvalidInput(format!("memo serialization failed: {}", e)))
    }

    /// Whether the message is ciphertext.
    pub fn is_encrypted(&self) -> bool {
        self.from.is_some()
    }

    /// Whether there is anything to read.
    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }

    /// Public key to combine with the secret behind `own`.
    ///
    /// The recipient pairs with the sender's key; anyone else (normally the
    /// sender) pairs with the recipient's key.
    pub fn counterparty_for(&self, own: &Secp256k1PublicKey) -> Option<&Secp256k1PublicKey> {
        if self.to.as_ref() == Some(own) {
            self.from.as_ref()
        } else {
            self.to.as_ref()
        }
    }

    /// Reads the memo with one of the two parties' secret keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecryptionFailed`] if the key does not open the memo.
    pub fn open(&self, secret: &Secp256k1SecretKey) -> Result<String> {
        if !self.is_encrypted() {
            return self.open_plain();
        }
        let counterparty = self
            .counterparty_for(&secret.public_key())
            .ok_or(Error::DecryptionFailed)?;
        cipher::decrypt(&self.message, secret, counterparty, &self.nonce)
    }

    /// Reads an unencrypted memo.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecryptionFailed`] if the memo is encrypted, the
    /// zero checksum is missing or the text is not UTF-8.
    pub fn open_plain(&self) -> Result<String> {
        if self.is_encrypted() || self.message.len() < CHECKSUM_LENGTH {
            return Err(Error::DecryptionFailed);
        }
        let (checksum, text) = self.message.split_at(CHECKSUM_LENGTH);
        if checksum != [0u8; CHECKSUM_LENGTH] {
            return Err(Error::DecryptionFailed);
        }
        String::from_utf8(text.to_vec()).map_err(|_| Error::DecryptionFailed)
    }
}

/// Keys as prefixed strings, with the all-zero null key standing for `None`.
mod optional_key {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::{
        secp256k1::{
            constants::{COMPRESSED_PUBLIC_KEY_LENGTH, DEFAULT_ADDRESS_PREFIX},
            Secp256k1PublicKey,
        },
        util::encoding,
    };

    const NULL_KEY: [u8; COMPRESSED_PUBLIC_KEY_LENGTH] = [0u8; COMPRESSED_PUBLIC_KEY_LENGTH];

    pub fn serialize<S: Serializer>(
        key: &Option<Secp256k1PublicKey>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match key {
            Some(key) => serializer.serialize_str(&key.to_string()),
            None => serializer
                .serialize_str(&encoding::encode_public_key(&NULL_KEY, DEFAULT_ADDRESS_PREFIX)),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Secp256k1PublicKey>, D::Error> {
        let text = String::deserialize(deserializer)?;
        let point = encoding::decode_public_key(&text, DEFAULT_ADDRESS_PREFIX)
            .map_err(serde::de::Error::custom)?;
        if point == NULL_KEY {
            return Ok(None);
        }
        Secp256k1PublicKey::from_sec1_bytes(&point)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

/// Bytes as lowercase hex.
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        hex::decode(text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::keys::SecretKey;
    use rand::rngs::OsRng;

    #[test]
    fn sender_and_recipient_can_open() {
        let alice: Secp256k1SecretKey = SecretKey::random(&mut OsRng);
        let bob: Secp256k1SecretKey = SecretKey::random(&mut OsRng);
        let memo = MemoEnvelope::seal("lunch money", &alice, &bob.public_key(), "42").unwrap();
        assert!(memo.is_encrypted());
        assert_eq!(memo.open(&bob).unwrap(), "lunch money");
        assert_eq!(memo.open(&alice).unwrap(), "lunch money");
    }

    #[test]
    fn json_wire_form_round_trips() {
        let alice: Secp256k1SecretKey = SecretKey::random(&mut OsRng);
        let bob: Secp256k1SecretKey = SecretKey::random(&mut OsRng);
        let memo = MemoEnvelope::seal("hi", &alice, &bob.public_key(), "9").unwrap();
        let json = memo.to_json().unwrap();
        assert!(json.contains(&alice.public_key().to_string()));
        assert!(json.contains(&hex::encode(&memo.message)));
        assert_eq!(MemoEnvelope::from_json(&json).unwrap(), memo);
    }

    #[test]
    fn plain_memo_uses_null_keys() {
        let memo = MemoEnvelope::plain("hello");
        assert_eq!(hex::encode(&memo.message), "0000000068656c6c6f");
        let json = memo.to_json().unwrap();
        assert!(json.contains("DCT1111111111111111111111111111111114T1Anm"));
        let parsed = MemoEnvelope::from_json(&json).unwrap();
        assert!(!parsed.is_encrypted());
        assert_eq!(parsed.open_plain().unwrap(), "hello");

        let anyone: Secp256k1SecretKey = SecretKey::random(&mut OsRng);
        assert_eq!(parsed.open(&anyone).unwrap(), "hello");
    }

    #[test]
    fn plain_memo_needs_zero_checksum() {
        let mut memo = MemoEnvelope::plain("hello");
        memo.message[0] = 1;
        assert_eq!(memo.open_plain(), Err(Error::DecryptionFailed));
    }

    #[test]
    fn json_has_the_wire_field_names() {
        let json = MemoEnvelope::plain("x").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nonce"], "0");
        assert_eq!(value["message"], "0000000078");
        assert_eq!(value["from"], value["to"]);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let json = r#"{"from":"DCT1","to":"DCT1","nonce":"1","message":"zz"}"#;
        assert!(matches!(MemoEnvelope::from_json(json), Err(Error::InvalidInput(_))));
    }
}
