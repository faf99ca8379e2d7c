//! Group parameters of the network's discrete-log keys.
//!
//! Every node and wallet uses exactly these values; a key derived under any
//! other group is unusable on the network.

use num_bigint::BigUint;
use once_cell::sync::Lazy;

use super::ElGamalParams;

/// Generator of the multiplicative group.
pub const EL_GAMAL_GENERATOR: u32 = 3;

/// 512-bit safe prime modulus, base 10.
///
/// This is the group the deployed network uses (155 digits). Keys derived
/// under a larger modulus would not interoperate, so it must stay as is.
pub const EL_GAMAL_MODULUS: &str = "11760620558671662461946567396662025495126946227619472274601251081547302009186313201119191293557856181195016058359990840577430081932807832465057884143546419";

/// Parameters built from [`EL_GAMAL_GENERATOR`] and [`EL_GAMAL_MODULUS`].
pub static DEFAULT_EL_GAMAL_PARAMS: Lazy<ElGamalParams> = Lazy::new(|| {
    let modulus = BigUint::parse_bytes(EL_GAMAL_MODULUS.as_bytes(), 10)
        .expect("EL_GAMAL_MODULUS is a decimal literal");
    ElGamalParams::new_unchecked(BigUint::from(EL_GAMAL_GENERATOR), modulus)
});
