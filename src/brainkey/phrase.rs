use core::fmt;

use rand::{CryptoRng, Rng, RngCore};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Number of dictionary words in a suggested brain key.
pub const BRAIN_KEY_WORD_COUNT: usize = 16;

/// Canonical form of a brain key phrase.
///
/// The ends are trimmed of any Unicode whitespace, letters are upper-cased
/// with the full Unicode mapping (`ß` becomes `SS`) and every inner run of
/// space, tab, CR, LF, VT or FF characters becomes a single space. Other
/// inner characters are kept as is. The result is idempotent.
pub fn normalize_brain_key(phrase: &str) -> String {
    let mut result = String::with_capacity(phrase.len());
    let mut preceded_by_whitespace = false;
    for c in phrase.trim().chars() {
        match c {
            ' ' | '\t' | '\r' | '\n' | '\u{0b}' | '\u{0c}' => {
                preceded_by_whitespace = true;
                continue;
            }
            _ => {}
        }
        if preceded_by_whitespace {
            result.push(' ');
        }
        result.extend(c.to_uppercase());
        preceded_by_whitespace = false;
    }
    result
}

/// A normalized brain key phrase.
///
/// The phrase is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct BrainKey(Zeroizing<String>);

impl BrainKey {
    /// Normalizes `phrase`.
    pub fn normalize(phrase: &str) -> Self {
        BrainKey(Zeroizing::new(normalize_brain_key(phrase)))
    }

    /// Wraps a phrase that is already in canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the phrase is empty or would change
    /// under normalization.
    pub fn from_normalized(phrase: &str) -> Result<Self> {
        if phrase.is_empty() {
            return Err(Error::InvalidInput("brain key is empty".into()));
        }
        let normalized = BrainKey::normalize(phrase);
        if normalized.as_str() != phrase {
            return Err(Error::InvalidInput("brain key is not normalized".into()));
        }
        Ok(normalized)
    }

    /// The canonical phrase.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Number of words in the phrase.
    pub fn word_count(&self) -> usize {
        self.0.split(' ').filter(|w| !w.is_empty()).count()
    }

    /// Suggests a fresh phrase of [`BRAIN_KEY_WORD_COUNT`] words drawn from
    /// `dictionary`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the dictionary is empty or holds a
    /// blank word.
    pub fn suggest<R: RngCore + CryptoRng>(dictionary: &[&str], rng: &mut R) -> Result<Self> {
        if dictionary.is_empty() {
            return Err(Error::InvalidInput("brain key dictionary is empty".into()));
        }
        if dictionary.iter().any(|word| word.trim().is_empty()) {
            return Err(Error::InvalidInput("brain key dictionary holds a blank word".into()));
        }

        let mut phrase = Zeroizing::new(String::new());
        for i in 0..BRAIN_KEY_WORD_COUNT {
            if i > 0 {
                phrase.push(' ');
            }
            phrase.push_str(dictionary[rng.gen_range(0..dictionary.len())]);
        }
        tracing::debug!(
            words = BRAIN_KEY_WORD_COUNT,
            dictionary_size = dictionary.len(),
            "suggested brain key"
        );
        Ok(BrainKey::normalize(&phrase))
    }
}

impl fmt::Debug for BrainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BrainKey(..)")
    }
}

/// Suggests a fresh brain key; see [`BrainKey::suggest`].
pub fn suggest_brain_key<R: RngCore + CryptoRng>(
    dictionary: &[&str],
    rng: &mut R,
) -> Result<BrainKey> {
    BrainKey::suggest(dictionary, rng)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn collapses_whitespace_and_upper_cases() {
        assert_eq!(
            normalize_brain_key("  correct\thorse \r\n battery\x0b\x0cstaple  "),
            "CORRECT HORSE BATTERY STAPLE"
        );
        assert_eq!(normalize_brain_key("TEST PHRASE"), "TEST PHRASE");
        assert_eq!(normalize_brain_key(" \t\n "), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        for phrase in ["a  b", "\tmixed Case\nwords ", "ünïcode  straße", "\u{a0}x \u{a0} y", "x"] {
            let once = normalize_brain_key(phrase);
            assert_eq!(normalize_brain_key(&once), once);
        }
    }

    #[test]
    fn upper_cases_all_letters() {
        assert_eq!(normalize_brain_key("straße ü"), "STRASSE Ü");
        assert_eq!(normalize_brain_key("привет мир"), "ПРИВЕТ МИР");
    }

    #[test]
    fn trims_unicode_whitespace_at_the_ends() {
        assert_eq!(
            normalize_brain_key("\u{a0}test phrase\u{a0}"),
            "TEST PHRASE"
        );
        assert_eq!(normalize_brain_key("\u{2003} a\u{3000}"), "A");
        // Only the listed characters split words inside the phrase.
        assert_eq!(normalize_brain_key("a\u{a0}b"), "A\u{a0}B");
    }

    #[test]
    fn from_normalized_rejects_raw_phrases() {
        assert!(BrainKey::from_normalized("TEST PHRASE").is_ok());
        assert!(matches!(
            BrainKey::from_normalized("test phrase"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            BrainKey::from_normalized("TEST  PHRASE"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(BrainKey::from_normalized(""), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn suggestion_uses_dictionary_words() {
        let dictionary = ["alpha", "bravo", "charlie", "delta"];
        let key = suggest_brain_key(&dictionary, &mut OsRng).unwrap();
        assert_eq!(key.word_count(), BRAIN_KEY_WORD_COUNT);
        for word in key.as_str().split(' ') {
            assert!(dictionary.iter().any(|d| d.to_ascii_uppercase() == word));
        }
        assert_eq!(BrainKey::from_normalized(key.as_str()).unwrap(), key);
    }

    #[test]
    fn suggestion_needs_a_dictionary() {
        assert!(suggest_brain_key(&[], &mut OsRng).is_err());
        assert!(suggest_brain_key(&["ok", " "], &mut OsRng).is_err());
    }

    #[test]
    fn debug_hides_phrase() {
        let key = BrainKey::normalize("secret words");
        assert_eq!(format!("{:?}", key), "BrainKey(..)");
    }
}
