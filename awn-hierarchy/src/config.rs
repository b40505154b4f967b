use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use awn_lexicon::ConceptRelationKind;
use awn_text::NormalizerConfig;

use crate::verifier::DEFAULT_MAX_HOPS;
use crate::ComparisonError;

/// Tunables of a comparison run, read from a JSON file. Missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Ontology relation column compared against the wordnet.
    pub relation: ConceptRelationKind,
    pub max_hops: usize,
    /// Exact histogram buckets; defaults to `max_hops`.
    pub histogram_buckets: Option<usize>,
    /// Examples per category in the text report.
    pub sample_per_category: usize,
    pub disagree_dump_limit: usize,
    /// Candidate count above which a DISAGREE side counts as polysemous.
    pub polysemy_threshold: usize,
    pub side_by_side_sample: usize,
    pub sample_seed: u64,
    pub parallel: bool,
    pub normalizer: NormalizerConfig,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            relation: ConceptRelationKind::SubTypeOf,
            max_hops: DEFAULT_MAX_HOPS,
            histogram_buckets: None,
            sample_per_category: 15,
            disagree_dump_limit: 100,
            polysemy_threshold: 10,
            side_by_side_sample: 35,
            sample_seed: 42,
            parallel: false,
            normalizer: NormalizerConfig::default(),
        }
    }
}

impl ComparisonConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ComparisonError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ComparisonError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_path(&self, path: impl AsRef<Path>) -> Result<(), ComparisonError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ComparisonError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ComparisonError> {
        if self.max_hops == 0 {
            return Err(ComparisonError::InvalidConfig(
                "max_hops must be at least 1".to_string(),
            ));
        }
        if self.histogram_buckets == Some(0) {
            return Err(ComparisonError::InvalidConfig(
                "histogram_buckets must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn histogram_buckets(&self) -> usize {
        self.histogram_buckets.unwrap_or(self.max_hops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.json");
        fs::write(&path, r#"{"max_hops": 4, "relation": "part_of"}"#).unwrap();

        let config = ComparisonConfig::from_path(&path).unwrap();
        assert_eq!(config.max_hops, 4);
        assert_eq!(config.relation, ConceptRelationKind::PartOf);
        assert_eq!(config.histogram_buckets(), 4);
        assert_eq!(config.sample_seed, 42);
        assert!(config.normalizer.normalize_alef);
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.json");
        let config = ComparisonConfig {
            parallel: true,
            histogram_buckets: Some(5),
            ..ComparisonConfig::default()
        };
        config.to_path(&path).unwrap();
        assert_eq!(ComparisonConfig::from_path(&path).unwrap(), config);
    }

    #[test]
    fn rejects_zero_hop_bound() {
        let config = ComparisonConfig {
            max_hops: 0,
            ..ComparisonConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ComparisonError::InvalidConfig(_))
        ));
    }
}
