//! Network parameters.
//!
//! Everything that differs between networks sharing this key scheme: the
//! public key prefix and the discrete-log group. Defaults are the main
//! network's values, so an empty JSON object is a valid configuration.
//!
//! ```json
//! {
//!   "address_prefix": "DCT",
//!   "el_gamal": { "generator": "3", "modulus": "1176...419" }
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_derive::{Deserialize, Serialize};

use crate::{
    elgamal::{constants::EL_GAMAL_GENERATOR, constants::EL_GAMAL_MODULUS, ElGamalParams},
    error::{Error, Result},
    secp256k1::{constants::DEFAULT_ADDRESS_PREFIX, Secp256k1PublicKey},
};

/// Discrete-log group, as base-10 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElGamalConfig {
    /// Group generator.
    pub generator: String,
    /// Prime modulus.
    pub modulus: String,
}

impl Default for ElGamalConfig {
    fn default() -> Self {
        ElGamalConfig {
            generator: EL_GAMAL_GENERATOR.to_string(),
            modulus: EL_GAMAL_MODULUS.to_string(),
        }
    }
}

/// Parameters of one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkParams {
    /// Prefix of every public key string.
    pub address_prefix: String,
    /// Discrete-log group.
    pub el_gamal: ElGamalConfig,
}

impl Default for NetworkParams {
    fn default() -> Self {
        NetworkParams {
            address_prefix: DEFAULT_ADDRESS_PREFIX.to_string(),
            el_gamal: ElGamalConfig::default(),
        }
    }
}

impl NetworkParams {
    /// Main network parameters.
    pub fn mainnet() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let params: NetworkParams = serde_json::from_str(json)
            .map_err(|e| Error::InvalidParams(format!("malformed JSON: {}", e)))?;
        params.validate()?;
        Ok(params)
    }

    /// Loads and validates a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read network parameters from {}", path.display()))?;
        let params = Self::from_json_str(&json)
            .with_context(|| format!("invalid network parameters in {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            prefix = %params.address_prefix,
            "loaded network parameters"
        );
        Ok(params)
    }

    /// Checks the prefix and the group.
    pub fn validate(&self) -> Result<()> {
        if self.address_prefix.is_empty()
            || !self.address_prefix.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(Error::InvalidParams(format!(
                "address prefix {:?} must be non-empty ASCII alphanumeric",
                self.address_prefix
            )));
        }
        self.el_gamal_params().map(|_| ())
    }

    /// Discrete-log group described by this configuration.
    pub fn el_gamal_params(&self) -> Result<ElGamalParams> {
        ElGamalParams::from_decimal(&self.el_gamal.generator, &self.el_gamal.modulus)
    }

    /// Public key text form on this network.
    pub fn public_key_to_string(&self, key: &Secp256k1PublicKey) -> String {
        key.to_string_with_prefix(&self.address_prefix)
    }

    /// Parses a public key string of this network.
    pub fn parse_public_key(&self, text: &str) -> Result<Secp256k1PublicKey> {
        Secp256k1PublicKey::from_str_with_prefix(text, &self.address_prefix)
    }
}
