//! Category counts, hop histogram and confidence tallies.
//!
//! Every accumulator here merges commutatively, so a run can be folded
//! sequentially or reduced across rayon workers with the same result.

use serde::Serialize;
use std::collections::BTreeMap;

use awn_lexicon::Confidence;

use crate::verifier::{Category, ClassifiedPair, MatchedSide, Outcome};

/// Hop counts of AGREE pairs. Exact buckets `1..=max`, larger values fall
/// into `overflow`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HopHistogram {
    buckets: Vec<usize>,
    overflow: usize,
    hop_sum: usize,
}

impl HopHistogram {
    pub fn new(max_bucket: usize) -> Self {
        Self {
            buckets: vec![0; max_bucket.max(1)],
            overflow: 0,
            hop_sum: 0,
        }
    }

    pub fn max_bucket(&self) -> usize {
        self.buckets.len()
    }

    pub fn record(&mut self, hops: usize) {
        match hops.checked_sub(1).and_then(|slot| self.buckets.get_mut(slot)) {
            Some(bucket) => *bucket += 1,
            None => self.overflow += 1,
        }
        self.hop_sum += hops;
    }

    /// Pairs recorded with exactly `hops` hops. Zero outside the exact range.
    pub fn count(&self, hops: usize) -> usize {
        hops.checked_sub(1)
            .and_then(|slot| self.buckets.get(slot))
            .copied()
            .unwrap_or(0)
    }

    pub fn overflow(&self) -> usize {
        self.overflow
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().sum::<usize>() + self.overflow
    }

    pub fn average(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            n => Some(self.hop_sum as f64 / n as f64),
        }
    }

    /// `(hops, count)` for the exact buckets.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .map(|(slot, count)| (slot + 1, *count))
    }

    pub fn merge(&mut self, other: &HopHistogram) {
        if other.buckets.len() > self.buckets.len() {
            self.buckets.resize(other.buckets.len(), 0);
        }
        for (slot, count) in other.buckets.iter().enumerate() {
            self.buckets[slot] += count;
        }
        self.overflow += other.overflow;
        self.hop_sum += other.hop_sum;
    }
}

/// Per-category totals over one comparison run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub total: usize,
    pub agree: usize,
    pub disagree: usize,
    pub partial_child_only: usize,
    pub partial_parent_only: usize,
    pub unmatchable: usize,
    /// DISAGREE pairs whose two sides shared a synset.
    pub self_match_artifacts: usize,
    pub hops: HopHistogram,
    /// Categories of annotated pairs, per confidence level.
    pub confidence: BTreeMap<Confidence, BTreeMap<Category, usize>>,
}

impl ComparisonSummary {
    pub fn new(max_bucket: usize) -> Self {
        Self {
            total: 0,
            agree: 0,
            disagree: 0,
            partial_child_only: 0,
            partial_parent_only: 0,
            unmatchable: 0,
            self_match_artifacts: 0,
            hops: HopHistogram::new(max_bucket),
            confidence: BTreeMap::new(),
        }
    }

    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = &'a ClassifiedPair>,
        max_bucket: usize,
    ) -> Self {
        let mut summary = Self::new(max_bucket);
        for pair in pairs {
            summary.record(pair);
        }
        summary
    }

    pub fn record(&mut self, pair: &ClassifiedPair) {
        self.record_outcome(&pair.outcome, pair.result.confidence);
    }

    pub fn record_outcome(&mut self, outcome: &Outcome, confidence: Option<Confidence>) {
        self.total += 1;
        match outcome {
            Outcome::Agree { path } => {
                self.agree += 1;
                self.hops.record(path.hops);
            }
            Outcome::Disagree { self_match } => {
                self.disagree += 1;
                if *self_match {
                    self.self_match_artifacts += 1;
                }
            }
            Outcome::Partial {
                side: MatchedSide::ChildOnly,
            } => self.partial_child_only += 1,
            Outcome::Partial {
                side: MatchedSide::ParentOnly,
            } => self.partial_parent_only += 1,
            Outcome::Unmatchable => self.unmatchable += 1,
        }
        if let Some(level) = confidence {
            *self
                .confidence
                .entry(level)
                .or_default()
                .entry(outcome.category())
                .or_default() += 1;
        }
    }

    pub fn merge(mut self, other: ComparisonSummary) -> Self {
        self.total += other.total;
        self.agree += other.agree;
        self.disagree += other.disagree;
        self.partial_child_only += other.partial_child_only;
        self.partial_parent_only += other.partial_parent_only;
        self.unmatchable += other.unmatchable;
        self.self_match_artifacts += other.self_match_artifacts;
        self.hops.merge(&other.hops);
        for (level, categories) in other.confidence {
            let mine = self.confidence.entry(level).or_default();
            for (category, count) in categories {
                *mine.entry(category).or_default() += count;
            }
        }
        self
    }

    pub fn partial(&self) -> usize {
        self.partial_child_only + self.partial_parent_only
    }

    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Agree => self.agree,
            Category::Disagree => self.disagree,
            Category::Partial => self.partial(),
            Category::Unmatchable => self.unmatchable,
        }
    }

    /// Percentage of all pairs, 0.0 for an empty run.
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }

    pub fn share(&self, category: Category) -> f64 {
        self.percent(self.count(category))
    }

    /// Pairs where both sides reached the wordnet.
    pub fn both_matched(&self) -> usize {
        self.agree + self.disagree
    }

    /// AGREE share among pairs with both sides matched.
    pub fn agreement_rate(&self) -> f64 {
        match self.both_matched() {
            0 => 0.0,
            n => self.agree as f64 * 100.0 / n as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::PathMatch;
    use awn_lexicon::SynsetId;

    fn agree(hops: usize) -> Outcome {
        Outcome::Agree {
            path: PathMatch {
                hops,
                path: (0..=hops).map(|i| SynsetId::new(i.to_string())).collect(),
            },
        }
    }

    fn sample() -> Vec<(Outcome, Option<Confidence>)> {
        vec![
            (agree(1), Some(Confidence::High)),
            (agree(2), None),
            (agree(11), Some(Confidence::High)),
            (Outcome::Disagree { self_match: true }, Some(Confidence::Low)),
            (Outcome::Disagree { self_match: false }, None),
            (
                Outcome::Partial {
                    side: MatchedSide::ParentOnly,
                },
                None,
            ),
            (Outcome::Unmatchable, Some(Confidence::High)),
        ]
    }

    #[test]
    fn counts_sum_to_total() {
        let mut summary = ComparisonSummary::new(8);
        for (outcome, confidence) in sample() {
            summary.record_outcome(&outcome, confidence);
        }
        assert_eq!(summary.total, 7);
        let by_category: usize = Category::ALL.iter().map(|c| summary.count(*c)).sum();
        assert_eq!(by_category, summary.total);
        assert_eq!(summary.self_match_artifacts, 1);
        assert_eq!(summary.partial_parent_only, 1);
        assert_eq!(summary.hops.count(2), 1);
        assert_eq!(summary.hops.overflow(), 1);
        assert_eq!(summary.hops.average(), Some(14.0 / 3.0));
        assert_eq!(
            summary.confidence[&Confidence::High][&Category::Agree],
            2
        );
    }

    #[test]
    fn merge_matches_sequential_fold() {
        let outcomes = sample();
        let mut sequential = ComparisonSummary::new(8);
        for (outcome, confidence) in &outcomes {
            sequential.record_outcome(outcome, *confidence);
        }

        let (left, right) = outcomes.split_at(3);
        let fold = |part: &[(Outcome, Option<Confidence>)]| {
            let mut summary = ComparisonSummary::new(8);
            for (outcome, confidence) in part {
                summary.record_outcome(outcome, *confidence);
            }
            summary
        };
        assert_eq!(fold(right).merge(fold(left)), sequential);
    }

    #[test]
    fn empty_run_has_no_average_and_zero_shares() {
        let summary = ComparisonSummary::new(8);
        assert_eq!(summary.hops.average(), None);
        assert_eq!(summary.share(Category::Agree), 0.0);
        assert_eq!(summary.agreement_rate(), 0.0);
    }

    #[test]
    fn histogram_exact_buckets() {
        let mut histogram = HopHistogram::new(3);
        for hops in [1, 1, 3, 4, 9] {
            histogram.record(hops);
        }
        let buckets: Vec<_> = histogram.iter().collect();
        assert_eq!(buckets, vec![(1, 2), (2, 0), (3, 1)]);
        assert_eq!(histogram.overflow(), 2);
        assert_eq!(histogram.total(), 5);
        assert_eq!(histogram.count(0), 0);
    }
}
