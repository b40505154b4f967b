use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A non-empty normalized lemma used to join the two resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchKey(String);

impl MatchKey {
    /// Wrap an already normalized string. Empty strings are rejected.
    pub fn new(normalized: impl Into<String>) -> Option<Self> {
        let normalized = normalized.into();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for MatchKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MatchKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
