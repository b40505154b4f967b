//! Arabic lemma normalization for cross-resource matching.
//!
//! Rules run in a fixed order:
//! - format marks, diacritics (tashkeel) and tatweel are dropped
//! - alef variants become bare alef
//! - word-final taa marbuta becomes haa
//! - trailing sense-number digits are stripped
//!
//! The output of [`ArabicNormalizer::normalize`] is a fixed point: feeding
//! it back in returns it unchanged.

use crate::config::NormalizerConfig;
use crate::key::MatchKey;

const ALEF: char = '\u{0627}';
const TAA_MARBUTA: char = '\u{0629}';
const HAA: char = '\u{0647}';
const TATWEEL: char = '\u{0640}';
const ALEF_MAQSURA: char = '\u{0649}';
const YAA: char = '\u{064A}';

/// Arabic lemma normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArabicNormalizer {
    config: NormalizerConfig,
}

impl ArabicNormalizer {
    /// Create a normalizer with the default matching convention.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize a surface form.
    pub fn normalize(&self, text: &str) -> String {
        let config = &self.config;
        let mut letters: Vec<char> = Vec::with_capacity(text.len());

        for ch in text.trim().chars() {
            if config.remove_diacritics && is_arabic_diacritic(ch) {
                continue;
            }
            if config.remove_tatweel && ch == TATWEEL {
                continue;
            }
            if config.remove_format_marks && is_format_mark(ch) {
                continue;
            }
            if config.normalize_alef && is_alef_variant(ch) {
                letters.push(ALEF);
                continue;
            }
            if config.normalize_alef_maqsura && ch == ALEF_MAQSURA {
                letters.push(YAA);
                continue;
            }
            letters.push(ch);
        }

        let mut result = String::with_capacity(text.len());
        for (pos, &ch) in letters.iter().enumerate() {
            if config.normalize_taa_marbuta
                && ch == TAA_MARBUTA
                && ends_word(letters.get(pos + 1).copied())
            {
                result.push(HAA);
            } else {
                result.push(ch);
            }
        }

        if config.strip_sense_digits {
            let kept = result
                .trim_end_matches(|c: char| is_sense_digit(c) || c.is_whitespace())
                .len();
            result.truncate(kept);
        }

        let trimmed = result.trim();
        if trimmed.len() != result.len() {
            return trimmed.to_string();
        }
        result
    }

    /// Normalize a surface form into a matching key.
    ///
    /// Returns `None` when nothing is left after normalization; such
    /// degenerate keys must never take part in matching.
    pub fn key(&self, text: &str) -> Option<MatchKey> {
        MatchKey::new(self.normalize(text))
    }
}

/// Check if a character is an Arabic diacritical or Quranic annotation mark.
fn is_arabic_diacritic(ch: char) -> bool {
    matches!(ch,
        '\u{064B}'..='\u{065F}' | // Fathatan to wavy hamza below
        '\u{0670}' |              // Superscript alef
        '\u{06D6}'..='\u{06ED}'   // Quranic annotation marks
    )
}

/// Direction markers and zero-width joiners left over from translation.
fn is_format_mark(ch: char) -> bool {
    matches!(ch, '\u{200B}'..='\u{200F}')
}

/// Check if a character is an alef variant.
fn is_alef_variant(ch: char) -> bool {
    matches!(ch,
        '\u{0622}' | // Alef with madda
        '\u{0623}' | // Alef with hamza above
        '\u{0625}' | // Alef with hamza below
        '\u{0671}'   // Alef wasla
    )
}

fn is_sense_digit(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '\u{0660}'..='\u{0669}' | '\u{06F0}'..='\u{06F9}')
}

fn ends_word(next: Option<char>) -> bool {
    match next {
        None => true,
        Some(ch) => !ch.is_alphabetic(),
    }
}
