//! Normalized lemma index.

use awn_text::{ArabicNormalizer, MatchKey};
use std::collections::{BTreeSet, HashMap};
use tracing::info;

use crate::model::{ConceptId, SynsetId};
use crate::ontology::Ontology;
use crate::wordnet::Wordnet;

/// Maps a normalized lemma to every record that lists it.
///
/// Built once per resource and read-only afterwards.
#[derive(Debug, Clone)]
pub struct LexicalIndex<Id> {
    normalizer: ArabicNormalizer,
    postings: HashMap<MatchKey, BTreeSet<Id>>,
    lemma_count: usize,
    degenerate: usize,
}

impl<Id: Ord + Clone> LexicalIndex<Id> {
    pub fn new(normalizer: ArabicNormalizer) -> Self {
        Self {
            normalizer,
            postings: HashMap::new(),
            lemma_count: 0,
            degenerate: 0,
        }
    }

    /// Index one surface form. Returns `false` when it normalizes to nothing.
    pub fn insert(&mut self, surface: &str, id: Id) -> bool {
        self.lemma_count += 1;
        match self.normalizer.key(surface) {
            Some(key) => {
                self.postings.entry(key).or_default().insert(id);
                true
            }
            None => {
                self.degenerate += 1;
                false
            }
        }
    }

    pub fn get(&self, key: &MatchKey) -> Option<&BTreeSet<Id>> {
        self.postings.get(key)
    }

    /// Normalize `surface` with the index's own normalizer and look it up.
    pub fn lookup(&self, surface: &str) -> Option<&BTreeSet<Id>> {
        let key = self.normalizer.key(surface)?;
        self.postings.get(&key)
    }

    pub fn normalizer(&self) -> &ArabicNormalizer {
        &self.normalizer
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.postings.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &MatchKey> {
        self.postings.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MatchKey, &BTreeSet<Id>)> {
        self.postings.iter()
    }

    /// Number of distinct normalized keys.
    pub fn key_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of surface forms offered to the index, degenerate ones included.
    pub fn lemma_count(&self) -> usize {
        self.lemma_count
    }

    pub fn degenerate_count(&self) -> usize {
        self.degenerate
    }
}

impl LexicalIndex<SynsetId> {
    /// Index every (entry lemma, sense synset) pair of the wordnet.
    pub fn from_wordnet(wordnet: &Wordnet, normalizer: ArabicNormalizer) -> Self {
        let mut index = Self::new(normalizer);
        for entry in wordnet.entries() {
            for sense in &entry.senses {
                index.insert(&entry.lemma, sense.synset.clone());
            }
        }
        info!(
            keys = index.key_count(),
            lemmas = index.lemma_count(),
            degenerate = index.degenerate_count(),
            "indexed wordnet lemmas"
        );
        index
    }
}

impl LexicalIndex<ConceptId> {
    /// Index every Arabic synonym of every concept.
    pub fn from_ontology(ontology: &Ontology, normalizer: ArabicNormalizer) -> Self {
        let mut index = Self::new(normalizer);
        for concept in ontology.concepts() {
            for lemma in &concept.lemmas {
                index.insert(lemma, concept.id.clone());
            }
        }
        info!(
            keys = index.key_count(),
            lemmas = index.lemma_count(),
            degenerate = index.degenerate_count(),
            "indexed ontology lemmas"
        );
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Concept;

    #[test]
    fn collapses_variants_onto_one_key() {
        let mut index = LexicalIndex::new(ArabicNormalizer::new());
        assert!(index.insert("أَسَد", SynsetId::new("lion-1")));
        assert!(index.insert("اسد2", SynsetId::new("lion-2")));
        assert!(index.insert("أسد", SynsetId::new("lion-1")));

        assert_eq!(index.key_count(), 1);
        assert_eq!(index.lemma_count(), 3);
        let hits = index.lookup("إسد").unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&SynsetId::new("lion-2")));
    }

    #[test]
    fn degenerate_forms_are_never_indexed() {
        let mut index: LexicalIndex<SynsetId> = LexicalIndex::new(ArabicNormalizer::new());
        assert!(!index.insert("ـًـ", SynsetId::new("a")));
        assert!(!index.insert("7", SynsetId::new("b")));
        assert_eq!(index.key_count(), 0);
        assert_eq!(index.degenerate_count(), 2);
        assert!(index.lookup("").is_none());
        assert!(index.lookup("3").is_none());
    }

    #[test]
    fn builds_from_ontology() {
        let ontology = Ontology::from_parts(
            vec![
                Concept {
                    id: ConceptId::new("1"),
                    lemmas: vec!["مَدْرَسَة".into(), "معهد".into()],
                    english: None,
                    gloss: None,
                    example: None,
                    source: None,
                },
                Concept {
                    id: ConceptId::new("2"),
                    lemmas: vec!["مدرسه".into()],
                    english: None,
                    gloss: None,
                    example: None,
                    source: None,
                },
            ],
            Vec::new(),
        );
        let index = LexicalIndex::from_ontology(&ontology, ArabicNormalizer::new());
        assert_eq!(index.key_count(), 2);
        assert_eq!(index.lookup("مدرسة").unwrap().len(), 2);
        assert!(index.contains_key("معهد"));
    }
}
