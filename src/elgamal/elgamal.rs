use core::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};

use crate::{
    elgamal::constants::DEFAULT_EL_GAMAL_PARAMS,
    error::{Error, Result},
    keys::{PublicKey, SecretKey},
    secp256k1::Secp256k1SecretKey,
};

/// Size of a secret in bytes: one SHA-512 digest.
const EL_GAMAL_KEY_LENGTH: usize = 64;

// ------- Params ------- //

/// Generator and prime modulus of the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElGamalParams {
    generator: BigUint,
    modulus: BigUint,
}

impl ElGamalParams {
    /// Builds a group after sanity checks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] unless the modulus is odd and greater
    /// than 3 and the generator lies strictly between 1 and the modulus.
    /// Primality of the modulus is not checked.
    pub fn new(generator: BigUint, modulus: BigUint) -> Result<Self> {
        if modulus <= BigUint::from(3u32) || !modulus.bit(0) {
            return Err(Error::InvalidParams("modulus must be an odd integer above 3".into()));
        }
        if generator <= BigUint::one() || generator >= modulus {
            return Err(Error::InvalidParams("generator out of range".into()));
        }
        Ok(Self::new_unchecked(generator, modulus))
    }

    pub(crate) fn new_unchecked(generator: BigUint, modulus: BigUint) -> Self {
        ElGamalParams { generator, modulus }
    }

    /// Parses base-10 generator and modulus.
    pub fn from_decimal(generator: &str, modulus: &str) -> Result<Self> {
        let generator = parse_decimal(generator)
            .ok_or_else(|| Error::InvalidParams("generator is not a decimal integer".into()))?;
        let modulus = parse_decimal(modulus)
            .ok_or_else(|| Error::InvalidParams("modulus is not a decimal integer".into()))?;
        Self::new(generator, modulus)
    }

    /// Group generator.
    pub fn generator(&self) -> &BigUint {
        &self.generator
    }

    /// Prime modulus.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }
}

impl Default for ElGamalParams {
    fn default() -> Self {
        DEFAULT_EL_GAMAL_PARAMS.clone()
    }
}

/// Strict base-10 parse: digits only, no sign, no separators.
fn parse_decimal(text: &str) -> Option<BigUint> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(text.as_bytes(), 10)
}

// ------- SecretKey ------- //

/// Secret exponent.
#[derive(Clone, PartialEq, Eq)]
pub struct ElGamalSecretKey(BigUint);

impl ElGamalSecretKey {
    /// Derives the secret tied to a signing key.
    ///
    /// The 32-byte signing scalar is hashed with SHA-512 and the digest is
    /// read as one big-endian (base-16) integer.
    pub fn from_signing_key(key: &Secp256k1SecretKey) -> Self {
        let digest = Sha512::digest(key.to_bytes().as_slice());
        ElGamalSecretKey(BigUint::from_bytes_be(digest.as_slice()))
    }

    /// Parses a base-10 secret.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongPrivateKey`] for anything but a positive decimal integer.
    pub fn from_decimal(text: &str) -> Result<Self> {
        let value =
            parse_decimal(text).ok_or(Error::WrongPrivateKey("not a decimal integer"))?;
        if value.is_zero() {
            return Err(Error::WrongPrivateKey("zero secret"));
        }
        Ok(ElGamalSecretKey(value))
    }

    /// Base-10 text form.
    pub fn to_decimal(&self) -> String {
        self.0.to_str_radix(10)
    }

    /// Public key in the given group.
    pub fn public_key_with(&self, params: &ElGamalParams) -> ElGamalPublicKey {
        ElGamalPublicKey(params.generator.modpow(&self.0, &params.modulus))
    }
}

impl SecretKey for ElGamalSecretKey {
    fn key_length() -> usize {
        EL_GAMAL_KEY_LENGTH
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; EL_GAMAL_KEY_LENGTH];
        loop {
            rng.fill_bytes(&mut bytes);
            let value = BigUint::from_bytes_be(&bytes);
            if !value.is_zero() {
                return ElGamalSecretKey(value);
            }
        }
    }

    fn from_bytes(slice: &[u8]) -> Result<Self> {
        if slice.is_empty() || slice.len() > EL_GAMAL_KEY_LENGTH {
            return Err(Error::WrongPrivateKey("invalid length"));
        }
        let value = BigUint::from_bytes_be(slice);
        if value.is_zero() {
            return Err(Error::WrongPrivateKey("zero secret"));
        }
        Ok(ElGamalSecretKey(value))
    }
}

impl fmt::Debug for ElGamalSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ElGamalSecretKey(..)")
    }
}

// ------- PublicKey ------- //

/// Public element `g^x mod p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElGamalPublicKey(BigUint);

impl ElGamalPublicKey {
    /// Computes `g^x mod p` in the given group.
    pub fn from_secret(secret: &ElGamalSecretKey, params: &ElGamalParams) -> Self {
        secret.public_key_with(params)
    }

    /// Parses a base-10 public element of the network's default group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPublicKey`] unless the text is a decimal
    /// integer in `2..modulus`.
    pub fn from_decimal(text: &str) -> Result<Self> {
        Self::from_decimal_with(text, &DEFAULT_EL_GAMAL_PARAMS)
    }

    /// Parses a base-10 public element of the given group.
    pub fn from_decimal_with(text: &str, params: &ElGamalParams) -> Result<Self> {
        let value = parse_decimal(text).ok_or(Error::InvalidPublicKey("not a decimal integer"))?;
        if value <= BigUint::one() || &value >= params.modulus() {
            return Err(Error::InvalidPublicKey("element out of range"));
        }
        Ok(ElGamalPublicKey(value))
    }

    /// Base-10 text form.
    pub fn to_decimal(&self) -> String {
        self.0.to_str_radix(10)
    }

    /// Underlying group element.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl PublicKey for ElGamalPublicKey {
    type K = ElGamalSecretKey;

    fn from_secret_key(k: &Self::K) -> Self {
        k.public_key_with(&DEFAULT_EL_GAMAL_PARAMS)
    }

    fn key_length() -> usize {
        EL_GAMAL_KEY_LENGTH
    }

    fn as_bytes(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }

    fn verify_keypair(&self, privkey: &Self::K) -> Result<()> {
        if *self == Self::from_secret_key(privkey) {
            Ok(())
        } else {
            Err(Error::WrongPrivateKey("key does not match public key"))
        }
    }
}

// ------- KeyPair ------- //

/// Discrete-log keypair derived from a signing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElGamalKeyPair {
    /// Secret exponent.
    pub secret: ElGamalSecretKey,
    /// Public element.
    pub public: ElGamalPublicKey,
}

impl ElGamalKeyPair {
    /// Derives the pair in the network's default group.
    pub fn from_signing_key(key: &Secp256k1SecretKey) -> Self {
        Self::from_signing_key_with(key, &DEFAULT_EL_GAMAL_PARAMS)
    }

    /// Derives the pair in the given group.
    pub fn from_signing_key_with(key: &Secp256k1SecretKey, params: &ElGamalParams) -> Self {
        let secret = ElGamalSecretKey::from_signing_key(key);
        let public = secret.public_key_with(params);
        ElGamalKeyPair { secret, public }
    }
}

// ------- String API ------- //

/// Base-10 El Gamal secret derived from a signing key.
pub fn el_gamal_private(key: &Secp256k1SecretKey) -> String {
    ElGamalSecretKey::from_signing_key(key).to_decimal()
}

/// Base-10 El Gamal secret derived from a WIF signing key.
///
/// # Errors
///
/// Returns [`Error::WrongPrivateKey`] if the WIF text does not decode.
pub fn el_gamal_private_from_wif(wif: &str) -> Result<String> {
    let key = Secp256k1SecretKey::from_wif(wif)?;
    Ok(el_gamal_private(&key))
}

/// Base-10 public element for a base-10 secret, in the default group.
///
/// # Errors
///
/// Returns [`Error::WrongPrivateKey`] if the secret is not a positive decimal integer.
pub fn el_gamal_public(private: &str) -> Result<String> {
    el_gamal_public_with(private, &DEFAULT_EL_GAMAL_PARAMS)
}

/// Base-10 public element for a base-10 secret, in the given group.
pub fn el_gamal_public_with(private: &str, params: &ElGamalParams) -> Result<String> {
    let secret = ElGamalSecretKey::from_decimal(private)?;
    Ok(secret.public_key_with(params).to_decimal())
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::elgamal::constants::{EL_GAMAL_GENERATOR, EL_GAMAL_MODULUS};
    use rand::rngs::OsRng;

    // Signing key derived from the brain key "TEST PHRASE", sequence 0.
    const SIGNING_WIF: &str = "5KecKFAW7WgbU7XpTtosqLF6769atYmCkmi3oTP4UV1qpT1hBa9";
    const EXPECTED_PRIVATE: &str = "1032809661659926954080640754548334825138972179709937675222563128417170486510646331624037330652766629971303934818427168233216846324173368202841854951388806";
    const EXPECTED_PUBLIC: &str = "471170557365311238814898538073836711855978110966964363818601918681563497865518728089895758070938665205476652929301239840465712546552687273961505511447685";

    #[test]
    fn derivation_matches_reference_vector() {
        let private = el_gamal_private_from_wif(SIGNING_WIF).unwrap();
        assert_eq!(private, EXPECTED_PRIVATE);
        assert_eq!(el_gamal_public(&private).unwrap(), EXPECTED_PUBLIC);
    }

    #[test]
    fn public_is_reduced_power_of_generator() {
        let sk: Secp256k1SecretKey = SecretKey::random(&mut OsRng);
        let pair = ElGamalKeyPair::from_signing_key(&sk);
        let params = ElGamalParams::default();
        assert!(pair.public.as_biguint() < params.modulus());
        assert_eq!(
            pair.public.as_biguint(),
            &BigUint::from(EL_GAMAL_GENERATOR).modpow(&pair.secret.0, params.modulus())
        );
        assert!(pair.public.verify_keypair(&pair.secret).is_ok());
        assert_eq!(ElGamalKeyPair::from_signing_key(&sk), pair);
    }

    #[test]
    fn malformed_secrets_fail_loudly() {
        for bad in ["", "   ", "12ab", "-5", "+5", "1_000", "0", "000"] {
            assert!(
                matches!(el_gamal_public(bad), Err(Error::WrongPrivateKey(_))),
                "accepted {:?}",
                bad
            );
        }
        assert!(matches!(
            el_gamal_private_from_wif("not a key"),
            Err(Error::WrongPrivateKey(_))
        ));
    }

    #[test]
    fn params_are_validated() {
        assert!(ElGamalParams::from_decimal("3", EL_GAMAL_MODULUS).is_ok());
        assert!(ElGamalParams::from_decimal("1", EL_GAMAL_MODULUS).is_err());
        assert!(ElGamalParams::from_decimal("3", "10").is_err());
        assert!(ElGamalParams::from_decimal("5", "3").is_err());
        assert!(ElGamalParams::from_decimal("x", "23").is_err());
        assert_eq!(
            ElGamalParams::from_decimal("3", EL_GAMAL_MODULUS).unwrap(),
            ElGamalParams::default()
        );
    }

    #[test]
    fn public_elements_are_range_checked() {
        let public = ElGamalPublicKey::from_decimal(EXPECTED_PUBLIC).unwrap();
        assert_eq!(public.to_decimal(), EXPECTED_PUBLIC);

        let modulus = ElGamalParams::default().modulus().clone();
        let at_modulus = modulus.to_str_radix(10);
        let above_modulus = (modulus + 1u32).to_str_radix(10);
        for bad in ["0", "1", at_modulus.as_str(), above_modulus.as_str(), "x1"] {
            assert!(
                matches!(ElGamalPublicKey::from_decimal(bad), Err(Error::InvalidPublicKey(_))),
                "accepted {:?}",
                bad
            );
        }

        let small = ElGamalParams::from_decimal("5", "23").unwrap();
        assert!(ElGamalPublicKey::from_decimal_with("22", &small).is_ok());
        assert!(ElGamalPublicKey::from_decimal_with("23", &small).is_err());
    }

    #[test]
    fn even_modulus_error_names_the_check() {
        assert_eq!(
            ElGamalParams::from_decimal("3", "10"),
            Err(Error::InvalidParams("modulus must be an odd integer above 3".into()))
        );
    }

    #[test]
    fn default_group_is_the_512_bit_network_group() {
        let params = ElGamalParams::default();
        assert_eq!(params.modulus().bits(), 512);
        assert_eq!(params.modulus().to_str_radix(10).len(), 155);
        assert_eq!(params.generator(), &BigUint::from(EL_GAMAL_GENERATOR));
    }

    #[test]
    fn custom_group() {
        let params = ElGamalParams::from_decimal("5", "23").unwrap();
        // 5^6 mod 23 = 8
        assert_eq!(el_gamal_public_with("6", &params).unwrap(), "8");
    }

    #[test]
    fn random_secret_round_trips_through_bytes() {
        let sk: ElGamalSecretKey = SecretKey::random(&mut OsRng);
        let bytes = sk.0.to_bytes_be();
        assert_eq!(ElGamalSecretKey::from_bytes(&bytes).unwrap(), sk);
        assert!(ElGamalSecretKey::from_bytes(&[0u8; 65]).is_err());
    }
}
