use core::fmt;
use core::str::FromStr;

use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha512};
use zeroize::Zeroizing;

use crate::{
    error::{Error, Result},
    keys::{PublicKey, SecretKey},
    secp256k1::constants::{
        COMPRESSED_PUBLIC_KEY_LENGTH, DEFAULT_ADDRESS_PREFIX, SECRET_KEY_LENGTH,
        SHARED_SECRET_LENGTH,
    },
    util::encoding,
};

// ------- SecretKey ------- //

/// Signing secret on secp256k1.
///
/// The wrapped scalar is zeroized on drop. There is no
/// `Display`: the only text form is [`Secp256k1SecretKey::to_wif`].
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256k1SecretKey(pub(crate) k256::SecretKey);

impl Secp256k1SecretKey {
    /// Parses a WIF string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongPrivateKey`] if the text is not a validly
    /// checksummed WIF key or the scalar is out of range.
    pub fn from_wif(text: &str) -> Result<Self> {
        let secret = encoding::decode_wif(text)?;
        Self::from_bytes(secret.as_slice())
    }

    /// Serializes the key as a WIF string.
    pub fn to_wif(&self) -> String {
        encoding::encode_wif(&self.to_bytes())
    }

    /// Raw big-endian scalar, wiped when the returned buffer is dropped.
    pub fn to_bytes(&self) -> Zeroizing<[u8; SECRET_KEY_LENGTH]> {
        let mut out = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
        out.copy_from_slice(self.0.to_bytes().as_slice());
        out
    }

    /// Public key belonging to this secret.
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey::from_secret_key(self)
    }

    /// ECDH shared secret with `other`.
    ///
    /// The result is `sha512(x)` where `x` is the x-coordinate of
    /// `self * other`. Both parties arrive at the same value.
    pub fn shared_secret(&self, other: &Secp256k1PublicKey) -> SharedSecret {
        let point = k256::ecdh::diffie_hellman(self.0.to_nonzero_scalar(), other.0.as_affine());
        let digest = Sha512::digest(point.raw_secret_bytes());
        let mut out = Zeroizing::new([0u8; SHARED_SECRET_LENGTH]);
        out.copy_from_slice(digest.as_slice());
        SharedSecret(out)
    }
}

impl SecretKey for Secp256k1SecretKey {
    fn key_length() -> usize {
        SECRET_KEY_LENGTH
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Secp256k1SecretKey(k256::SecretKey::random(rng))
    }

    fn from_bytes(slice: &[u8]) -> Result<Self> {
        if slice.len() != SECRET_KEY_LENGTH {
            return Err(Error::WrongPrivateKey("invalid length"));
        }
        k256::SecretKey::from_slice(slice)
            .map(Secp256k1SecretKey)
            .map_err(|_| Error::WrongPrivateKey("scalar out of range"))
    }
}

impl FromStr for Secp256k1SecretKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_wif(s)
    }
}

impl fmt::Debug for Secp256k1SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secp256k1SecretKey(..)")
    }
}

// ------- PublicKey ------- //

/// Public key on secp256k1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Secp256k1PublicKey(pub(crate) k256::PublicKey);

impl Secp256k1PublicKey {
    /// SEC1 compressed encoding.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_PUBLIC_KEY_LENGTH] {
        let mut out = [0u8; COMPRESSED_PUBLIC_KEY_LENGTH];
        out.copy_from_slice(self.0.to_encoded_point(true).as_bytes());
        out
    }

    /// Parses a SEC1 encoded point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPublicKey`] if the bytes are not a point on the curve.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        k256::PublicKey::from_sec1_bytes(bytes)
            .map(Secp256k1PublicKey)
            .map_err(|_| Error::InvalidPublicKey("not a curve point"))
    }

    /// Text form with an explicit network prefix.
    pub fn to_string_with_prefix(&self, prefix: &str) -> String {
        encoding::encode_public_key(&self.to_compressed(), prefix)
    }

    /// Parses the text form with an explicit network prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPublicKey`] on a framing, checksum or curve error.
    pub fn from_str_with_prefix(text: &str, prefix: &str) -> Result<Self> {
        let point = encoding::decode_public_key(text, prefix)?;
        Self::from_sec1_bytes(&point)
    }
}

impl PublicKey for Secp256k1PublicKey {
    type K = Secp256k1SecretKey;

    fn from_secret_key(k: &Self::K) -> Self {
        Secp256k1PublicKey(k.0.public_key())
    }

    fn key_length() -> usize {
        COMPRESSED_PUBLIC_KEY_LENGTH
    }

    fn as_bytes(&self) -> Vec<u8> {
        self.to_compressed().to_vec()
    }

    fn verify_keypair(&self, privkey: &Self::K) -> Result<()> {
        if *self == Self::from_secret_key(privkey) {
            Ok(())
        } else {
            Err(Error::WrongPrivateKey("key does not match public key"))
        }
    }
}

impl fmt::Display for Secp256k1PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_prefix(DEFAULT_ADDRESS_PREFIX))
    }
}

impl FromStr for Secp256k1PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_prefix(s, DEFAULT_ADDRESS_PREFIX)
    }
}

impl Serialize for Secp256k1PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Secp256k1PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ------- KeyPair ------- //

/// A secret key together with its recomputed public key.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    secret: Secp256k1SecretKey,
    public: Secp256k1PublicKey,
}

impl KeyPair {
    /// Builds the pair from its secret half.
    pub fn from_secret(secret: Secp256k1SecretKey) -> Self {
        let public = secret.public_key();
        KeyPair { secret, public }
    }

    /// Secret half.
    pub fn secret(&self) -> &Secp256k1SecretKey {
        &self.secret
    }

    /// Public half.
    pub fn public(&self) -> &Secp256k1PublicKey {
        &self.public
    }

    /// Splits the pair.
    pub fn into_parts(self) -> (Secp256k1SecretKey, Secp256k1PublicKey) {
        (self.secret, self.public)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public.to_string())
            .finish_non_exhaustive()
    }
}

// ------- SharedSecret ------- //

/// ECDH secret shared between two keypairs, wiped on drop.
pub struct SharedSecret(Zeroizing<[u8; SHARED_SECRET_LENGTH]>);

impl SharedSecret {
    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_LENGTH] {
        &self.0
    }

    /// Lowercase hex form, as mixed into memo keys.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.0.as_slice()))
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice() == other.0.as_slice()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
