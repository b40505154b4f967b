//! Arabic Text Normalization
//!
//! Canonicalizes Arabic surface forms into matching keys so that lemmas
//! from independently built lexical resources can be joined.

mod arabic;
mod config;
mod key;

pub use arabic::ArabicNormalizer;
pub use config::NormalizerConfig;
pub use key::MatchKey;

/// Normalize with the default convention.
pub fn normalize(text: &str) -> String {
    ArabicNormalizer::new().normalize(text)
}
