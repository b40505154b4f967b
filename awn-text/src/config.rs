//! Normalizer Configuration
//!
//! Switches for the individual rewrite rules applied by the normalizer.

use serde::{Deserialize, Serialize};

/// Configuration for [`ArabicNormalizer`](crate::ArabicNormalizer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Remove diacritical marks (tashkeel and Quranic annotation marks)
    pub remove_diacritics: bool,
    /// Remove tatweel (kashida)
    pub remove_tatweel: bool,
    /// Remove bidi and zero-width format marks
    pub remove_format_marks: bool,
    /// Normalize alef variants to bare alef
    pub normalize_alef: bool,
    /// Rewrite word-final taa marbuta as haa
    pub normalize_taa_marbuta: bool,
    /// Rewrite alef maqsura as yaa
    pub normalize_alef_maqsura: bool,
    /// Strip trailing sense-number digits
    pub strip_sense_digits: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            remove_diacritics: true,
            remove_tatweel: true,
            remove_format_marks: true,
            normalize_alef: true,
            normalize_taa_marbuta: true,
            normalize_alef_maqsura: false,
            strip_sense_digits: true,
        }
    }
}

impl NormalizerConfig {
    /// Only strip marks and sense numbers, keep every letter as written.
    pub fn conservative() -> Self {
        Self {
            normalize_alef: false,
            normalize_taa_marbuta: false,
            normalize_alef_maqsura: false,
            ..Self::default()
        }
    }

    /// Every rewrite enabled, including alef maqsura folding.
    pub fn aggressive() -> Self {
        Self {
            normalize_alef_maqsura: true,
            ..Self::default()
        }
    }
}
