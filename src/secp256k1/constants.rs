//! Sizes and version bytes fixed by the network's key formats.

/// Length of a raw secret scalar.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Length of a SEC1 compressed public key.
pub const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 33;

/// Length of an ECDH shared secret (a SHA-512 digest).
pub const SHARED_SECRET_LENGTH: usize = 64;

/// Number of checksum bytes appended to encoded keys.
pub const CHECKSUM_LENGTH: usize = 4;

/// Version byte leading every WIF private key.
pub const WIF_VERSION: u8 = 0x80;

/// Public key prefix of the main network.
pub const DEFAULT_ADDRESS_PREFIX: &str = "DCT";
