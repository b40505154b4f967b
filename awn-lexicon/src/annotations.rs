//! Manually assigned confidence tags for ontology pairs.
//!
//! The tags are an input to the comparison, never computed by it. The
//! table has the columns `child_id,parent_id,confidence`.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::model::{ConceptId, Confidence};
use crate::ontology::ConceptPair;
use crate::LexiconError;

#[derive(Debug, Deserialize)]
struct AnnotationRow {
    child_id: String,
    parent_id: String,
    confidence: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfidenceAnnotations {
    tags: HashMap<(ConceptId, ConceptId), Confidence>,
    rejected: usize,
}

impl ConfidenceAnnotations {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let annotations = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            tagged = annotations.len(),
            rejected = annotations.rejected(),
            "loaded confidence annotations"
        );
        Ok(annotations)
    }

    pub fn from_reader<R: Read>(source: R) -> Result<Self, LexiconError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        let mut annotations = Self::default();
        for result in reader.deserialize::<AnnotationRow>() {
            let row = match result {
                Ok(row) => row,
                Err(err) if err.is_io_error() => {
                    return Err(LexiconError::Csv {
                        table: "annotations".to_string(),
                        source: err,
                    })
                }
                Err(err) => {
                    debug!(error = %err, "skipping malformed annotation");
                    annotations.rejected += 1;
                    continue;
                }
            };
            match row.confidence.parse::<Confidence>() {
                Ok(confidence) => annotations.insert(
                    ConceptId(row.child_id),
                    ConceptId(row.parent_id),
                    confidence,
                ),
                Err(err) => {
                    debug!(error = %err, "skipping annotation");
                    annotations.rejected += 1;
                }
            }
        }
        Ok(annotations)
    }

    pub fn insert(&mut self, child: ConceptId, parent: ConceptId, confidence: Confidence) {
        self.tags.insert((child, parent), confidence);
    }

    pub fn get(&self, pair: &ConceptPair) -> Option<Confidence> {
        self.tags
            .get(&(pair.child.clone(), pair.parent.clone()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Rows dropped for a missing column or an unknown level.
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_tags_and_rejects_unknown_levels() {
        let table = "child_id,parent_id,confidence\n3,2,HIGH\n2,1, low \n4,1,maybe\n5\n";
        let annotations = ConfidenceAnnotations::from_reader(table.as_bytes()).unwrap();
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations.rejected(), 2);
        let pair = ConceptPair {
            child: ConceptId::new("2"),
            parent: ConceptId::new("1"),
        };
        assert_eq!(annotations.get(&pair), Some(Confidence::Low));
    }
}
