//! Resolves ontology concepts to candidate wordnet synsets.
//!
//! A concept matches a synset when any one of its synonyms normalizes to a
//! lemma of that synset. No part-of-speech or sense filtering is applied,
//! so homographs pull in unrelated synsets; the review output exists to
//! surface exactly those cases.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::info;

use awn_lexicon::{Concept, ConceptId, ConceptPair, Confidence, LexicalIndex, Ontology, SynsetId};

/// Candidate synsets for one concept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConceptMatch {
    pub concept: ConceptId,
    pub candidates: BTreeSet<SynsetId>,
    /// Synonym as written in the ontology -> synsets it reached.
    pub via: BTreeMap<String, BTreeSet<SynsetId>>,
}

impl ConceptMatch {
    pub fn unmatched(concept: ConceptId) -> Self {
        Self {
            concept,
            ..Self::default()
        }
    }

    pub fn is_matched(&self) -> bool {
        !self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The first synonym that led to `synset`.
    pub fn lemma_for(&self, synset: &SynsetId) -> Option<&str> {
        self.via
            .iter()
            .find(|(_, synsets)| synsets.contains(synset))
            .map(|(lemma, _)| lemma.as_str())
    }
}

/// Both sides of one ontology pair resolved against the wordnet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub pair: ConceptPair,
    pub child: ConceptMatch,
    pub parent: ConceptMatch,
    pub confidence: Option<Confidence>,
}

pub struct ConceptMatcher<'a> {
    index: &'a LexicalIndex<SynsetId>,
}

impl<'a> ConceptMatcher<'a> {
    pub fn new(index: &'a LexicalIndex<SynsetId>) -> Self {
        Self { index }
    }

    pub fn resolve(&self, concept: &Concept) -> ConceptMatch {
        let mut resolved = ConceptMatch::unmatched(concept.id.clone());
        for lemma in &concept.lemmas {
            if let Some(synsets) = self.index.lookup(lemma) {
                resolved.candidates.extend(synsets.iter().cloned());
                resolved
                    .via
                    .entry(lemma.clone())
                    .or_default()
                    .extend(synsets.iter().cloned());
            }
        }
        resolved
    }

    /// Resolve every concept once so pairs sharing a concept share the work.
    pub fn resolve_all(&self, ontology: &Ontology) -> ResolvedConcepts {
        let matches: HashMap<ConceptId, ConceptMatch> = ontology
            .concepts()
            .iter()
            .map(|concept| (concept.id.clone(), self.resolve(concept)))
            .collect();
        let resolved = ResolvedConcepts { matches };
        info!(
            matched = resolved.matched_count(),
            concepts = ontology.concepts().len(),
            "resolved ontology concepts against wordnet"
        );
        resolved
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedConcepts {
    matches: HashMap<ConceptId, ConceptMatch>,
}

impl ResolvedConcepts {
    pub fn get(&self, concept: &ConceptId) -> Option<&ConceptMatch> {
        self.matches.get(concept)
    }

    /// Concepts with at least one candidate synset.
    pub fn matched_count(&self) -> usize {
        self.matches.values().filter(|m| m.is_matched()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConceptMatch> {
        self.matches.values()
    }

    fn side(&self, concept: &ConceptId) -> ConceptMatch {
        self.matches
            .get(concept)
            .cloned()
            .unwrap_or_else(|| ConceptMatch::unmatched(concept.clone()))
    }

    pub fn match_pair(&self, pair: &ConceptPair, confidence: Option<Confidence>) -> MatchResult {
        MatchResult {
            pair: pair.clone(),
            child: self.side(&pair.child),
            parent: self.side(&pair.parent),
            confidence,
        }
    }
}
