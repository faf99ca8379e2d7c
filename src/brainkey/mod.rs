//! Brain keys: deterministic signing keys from a memorable phrase.
//!
//! A phrase is first brought into canonical form ([`BrainKey`]), then any
//! number of keys can be derived from it by sequence number. The word list
//! used to suggest new phrases is supplied by the caller.

/// Key derivation from a normalized phrase.
pub mod derive;

/// Phrase normalization and suggestion.
pub mod phrase;

// Re-export
pub use self::{
    derive::{derive_private_key, generate_keys, parse_sequence, BrainKeyInfo},
    phrase::{normalize_brain_key, suggest_brain_key, BrainKey, BRAIN_KEY_WORD_COUNT},
};
