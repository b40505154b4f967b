//! Indicators that point a reviewer at suspicious verdicts.
//!
//! None of these change a classification. They flag AGREE paths that
//! cross parts of speech or loop through one lemma, and DISAGREE pairs
//! that are likely noise from adjectives or heavy polysemy.

use serde::Serialize;
use std::collections::BTreeMap;

use awn_lexicon::{ConceptPair, PartOfSpeech, SynsetId, Wordnet};
use awn_text::ArabicNormalizer;

use crate::matcher::ConceptMatch;
use crate::verifier::{ClassifiedPair, Outcome};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QualityIndicators {
    pub agree_total: usize,
    /// AGREE pairs whose endpoint synsets share a part of speech.
    pub pos_consistent: usize,
    /// Cross-POS AGREE endpoints keyed as `child->parent`, e.g. `n->v`.
    pub pos_mismatches: BTreeMap<String, usize>,
    /// AGREE pairs where both endpoints were reached through the same
    /// normalized lemma.
    pub same_lemma: Vec<ConceptPair>,
    pub disagree_total: usize,
    /// DISAGREE pairs with an adjective among either side's candidates.
    pub adjective_disagree: Vec<ConceptPair>,
    pub polysemy_threshold: usize,
    /// DISAGREE pairs with more than `polysemy_threshold` candidates on
    /// either side.
    pub polysemous_disagree: Vec<ConceptPair>,
}

impl QualityIndicators {
    pub fn compute(
        pairs: &[ClassifiedPair],
        wordnet: &Wordnet,
        normalizer: &ArabicNormalizer,
        polysemy_threshold: usize,
    ) -> Self {
        let pos_of = |id: &SynsetId| {
            wordnet
                .synset(id)
                .map(|synset| synset.pos)
                .unwrap_or(PartOfSpeech::Unknown)
        };

        let mut indicators = Self {
            polysemy_threshold,
            ..Self::default()
        };
        for pair in pairs {
            let result = &pair.result;
            match &pair.outcome {
                Outcome::Agree { path } => {
                    indicators.agree_total += 1;
                    let (child_pos, parent_pos) = (pos_of(path.child()), pos_of(path.parent()));
                    if child_pos == parent_pos {
                        indicators.pos_consistent += 1;
                    } else {
                        *indicators
                            .pos_mismatches
                            .entry(format!("{child_pos}->{parent_pos}"))
                            .or_default() += 1;
                    }
                    let child_key = lemma_key(&result.child, path.child(), normalizer);
                    let parent_key = lemma_key(&result.parent, path.parent(), normalizer);
                    if child_key.is_some() && child_key == parent_key {
                        indicators.same_lemma.push(result.pair.clone());
                    }
                }
                Outcome::Disagree { .. } => {
                    indicators.disagree_total += 1;
                    let has_adjective = result
                        .child
                        .candidates
                        .iter()
                        .chain(result.parent.candidates.iter())
                        .any(|id| pos_of(id).is_adjective());
                    if has_adjective {
                        indicators.adjective_disagree.push(result.pair.clone());
                    }
                    if result.child.len() > polysemy_threshold
                        || result.parent.len() > polysemy_threshold
                    {
                        indicators.polysemous_disagree.push(result.pair.clone());
                    }
                }
                Outcome::Partial { .. } | Outcome::Unmatchable => {}
            }
        }
        indicators
    }

    /// Share of AGREE pairs with consistent endpoint POS, in percent.
    pub fn pos_consistency(&self) -> f64 {
        match self.agree_total {
            0 => 0.0,
            n => self.pos_consistent as f64 * 100.0 / n as f64,
        }
    }
}

fn lemma_key(
    side: &ConceptMatch,
    synset: &SynsetId,
    normalizer: &ArabicNormalizer,
) -> Option<String> {
    side.lemma_for(synset)
        .and_then(|lemma| normalizer.key(lemma))
        .map(|key| key.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchResult;
    use crate::verifier::PathMatch;
    use awn_lexicon::{ConceptId, Synset};
    use std::collections::{BTreeMap, BTreeSet};

    fn wordnet() -> Wordnet {
        let mut builder = Wordnet::builder();
        builder
            .synset(Synset::new(SynsetId::new("walk-v"), PartOfSpeech::Verb))
            .synset(Synset::new(SynsetId::new("walk-n"), PartOfSpeech::Noun))
            .synset(Synset::new(SynsetId::new("move-n"), PartOfSpeech::Noun))
            .synset(Synset::new(SynsetId::new("big-a"), PartOfSpeech::Adjective));
        builder.finish()
    }

    fn side(concept: &str, via: &[(&str, &[&str])]) -> ConceptMatch {
        let mut side = ConceptMatch::unmatched(ConceptId::new(concept));
        for (lemma, ids) in via {
            let ids: BTreeSet<SynsetId> = ids.iter().map(|id| SynsetId::new(*id)).collect();
            side.candidates.extend(ids.iter().cloned());
            side.via.insert(lemma.to_string(), ids);
        }
        side
    }

    fn classified(child: ConceptMatch, parent: ConceptMatch, outcome: Outcome) -> ClassifiedPair {
        ClassifiedPair {
            result: MatchResult {
                pair: ConceptPair {
                    child: child.concept.clone(),
                    parent: parent.concept.clone(),
                },
                child,
                parent,
                confidence: None,
            },
            outcome,
        }
    }

    fn agree(from: &str, to: &str) -> Outcome {
        Outcome::Agree {
            path: PathMatch {
                hops: 1,
                path: vec![SynsetId::new(from), SynsetId::new(to)],
            },
        }
    }

    #[test]
    fn tallies_pos_and_same_lemma_paths() {
        let pairs = vec![
            classified(
                side("1", &[("مَشْي", &["walk-n"])]),
                side("2", &[("حركة", &["move-n"])]),
                agree("walk-n", "move-n"),
            ),
            classified(
                side("3", &[("مشى", &["walk-v"])]),
                side("4", &[("مَشَى", &["walk-n"])]),
                agree("walk-v", "walk-n"),
            ),
        ];
        let indicators =
            QualityIndicators::compute(&pairs, &wordnet(), &ArabicNormalizer::new(), 10);
        assert_eq!(indicators.agree_total, 2);
        assert_eq!(indicators.pos_consistent, 1);
        assert_eq!(indicators.pos_mismatches, BTreeMap::from([("v->n".to_string(), 1)]));
        assert_eq!(indicators.same_lemma.len(), 1);
        assert_eq!(indicators.same_lemma[0].child, ConceptId::new("3"));
        assert_eq!(indicators.pos_consistency(), 50.0);
    }

    #[test]
    fn flags_adjective_and_polysemous_disagreements() {
        let many: Vec<String> = (0..12).map(|i| format!("x{i}")).collect();
        let many: Vec<&str> = many.iter().map(String::as_str).collect();
        let pairs = vec![
            classified(
                side("1", &[("كبير", &["big-a"])]),
                side("2", &[("حركة", &["move-n"])]),
                Outcome::Disagree { self_match: false },
            ),
            classified(
                side("3", &[("عين", many.as_slice())]),
                side("4", &[("حركة", &["move-n"])]),
                Outcome::Disagree { self_match: false },
            ),
        ];
        let indicators =
            QualityIndicators::compute(&pairs, &wordnet(), &ArabicNormalizer::new(), 10);
        assert_eq!(indicators.disagree_total, 2);
        assert_eq!(indicators.adjective_disagree.len(), 1);
        assert_eq!(indicators.polysemous_disagree.len(), 1);
        assert_eq!(indicators.polysemous_disagree[0].child, ConceptId::new("3"));
    }
}
