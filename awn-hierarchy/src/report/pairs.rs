//! Per-pair dumps for manual review.

use serde::Serialize;
use std::io::{self, Write};

use awn_lexicon::{ConceptId, Confidence, SynsetId};

use crate::matcher::ConceptMatch;
use crate::verifier::{Category, MatchedSide, Outcome};
use crate::ComparisonError;

use super::{chain_name, concept_info, plural, synset_info, Report};

/// Synsets listed per matched lemma in the DISAGREE dump.
const LISTED_PER_LEMMA: usize = 3;

#[derive(Debug, Serialize)]
struct PairRow<'a> {
    child_id: &'a ConceptId,
    parent_id: &'a ConceptId,
    category: Category,
    matched_side: Option<MatchedSide>,
    self_match: bool,
    hops: Option<usize>,
    child_candidates: usize,
    parent_candidates: usize,
    path: String,
    confidence: Option<Confidence>,
}

impl Report<'_> {
    /// One CSV row per classified pair, in ontology order.
    pub fn write_pairs_csv<W: Write>(&self, out: W) -> Result<(), ComparisonError> {
        let mut writer = csv::Writer::from_writer(out);
        for pair in &self.run.classified {
            let (matched_side, path) = match &pair.outcome {
                Outcome::Partial { side } => (Some(*side), String::new()),
                Outcome::Agree { path } => (None, join_path(&path.path)),
                _ => (None, String::new()),
            };
            writer.serialize(PairRow {
                child_id: &pair.result.pair.child,
                parent_id: &pair.result.pair.parent,
                category: pair.category(),
                matched_side,
                self_match: pair.outcome.is_self_match(),
                hops: pair.outcome.hops(),
                child_candidates: pair.result.child.len(),
                parent_candidates: pair.result.parent.len(),
                path,
                confidence: pair.result.confidence,
            })?;
        }
        writer.flush().map_err(|err| ComparisonError::Csv(err.into()))?;
        Ok(())
    }

    /// Every AGREE case with the lemmas that produced its endpoints.
    pub fn write_agree_dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let total = self.run.summary.agree;
        writeln!(out, "ALL {total} AGREE CASES - Full Detail for Linguistic Review")?;
        writeln!(out, "{}\n", "=".repeat(120))?;

        let ontology = self.ontology();
        let wordnet = self.wordnet();
        for (i, pair) in self.run.iter_category(Category::Agree).enumerate() {
            let Outcome::Agree { path } = &pair.outcome else {
                continue;
            };
            let result = &pair.result;
            writeln!(out, "--- AGREE #{} ({} hop{}) ---", i + 1, path.hops, plural(path.hops))?;
            writeln!(out, "  CHILD ontology: {}", concept_info(ontology, &result.pair.child))?;
            writeln!(out, "  PARENT ontology: {}", concept_info(ontology, &result.pair.parent))?;
            writeln!(
                out,
                "  Child matched via lemma: '{}' -> {}",
                result.child.lemma_for(path.child()).unwrap_or("?"),
                path.child()
            )?;
            writeln!(
                out,
                "  Parent matched via lemma: '{}' -> {}",
                result.parent.lemma_for(path.parent()).unwrap_or("?"),
                path.parent()
            )?;
            writeln!(out, "  Wordnet {} path:", chain_name(self.run.relation))?;
            for step in &path.path {
                writeln!(out, "    -> {}", synset_info(wordnet, step))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// The first DISAGREE cases with the candidates of every lemma.
    pub fn write_disagree_dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let total = self.run.summary.disagree;
        let shown = self.config.disagree_dump_limit.min(total);
        writeln!(out, "DISAGREE CASES - {shown} of {total} - Full Detail")?;
        writeln!(out, "{}\n", "=".repeat(120))?;

        let ontology = self.ontology();
        let disagreements = self.run.iter_category(Category::Disagree).take(shown);
        for (i, pair) in disagreements.enumerate() {
            let result = &pair.result;
            writeln!(out, "--- DISAGREE #{} ---", i + 1)?;
            writeln!(out, "  CHILD ontology: {}", concept_info(ontology, &result.pair.child))?;
            writeln!(out, "  PARENT ontology: {}", concept_info(ontology, &result.pair.parent))?;
            if pair.outcome.is_self_match() {
                writeln!(out, "  (child and parent share a synset)")?;
            }
            self.write_side_matches(out, "Child", &result.child)?;
            self.write_side_matches(out, "Parent", &result.parent)?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_side_matches<W: Write>(
        &self,
        out: &mut W,
        side: &str,
        matched: &ConceptMatch,
    ) -> io::Result<()> {
        writeln!(out, "  {side} wordnet matches ({} synsets):", matched.len())?;
        for (lemma, synsets) in &matched.via {
            for id in synsets.iter().take(LISTED_PER_LEMMA) {
                writeln!(out, "    '{lemma}' -> {}", synset_info(self.wordnet(), id))?;
            }
        }
        Ok(())
    }

    /// Review indicators as plain text.
    pub fn write_indicators<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let indicators = &self.run.indicators;
        writeln!(out, "=== AGREE QUALITY INDICATORS ===")?;
        writeln!(
            out,
            "POS consistent (child=parent): {} / {} ({:.1}%)",
            indicators.pos_consistent,
            indicators.agree_total,
            indicators.pos_consistency()
        )?;
        let mismatched: usize = indicators.pos_mismatches.values().sum();
        writeln!(out, "POS mismatch: {mismatched}")?;
        for (cross, count) in &indicators.pos_mismatches {
            writeln!(out, "  {cross}: {count}")?;
        }
        writeln!(
            out,
            "AGREE via same normalized lemma on both sides: {} / {}",
            indicators.same_lemma.len(),
            indicators.agree_total
        )?;
        writeln!(out)?;
        writeln!(out, "=== DISAGREE QUALITY INDICATORS ===")?;
        writeln!(
            out,
            "DISAGREE with adjective synsets in matches: {} / {}",
            indicators.adjective_disagree.len(),
            indicators.disagree_total
        )?;
        writeln!(
            out,
            "DISAGREE with more than {} synsets on a side: {}",
            indicators.polysemy_threshold,
            indicators.polysemous_disagree.len()
        )?;
        Ok(())
    }
}

fn join_path(path: &[SynsetId]) -> String {
    path.iter()
        .map(SynsetId::as_str)
        .collect::<Vec<_>>()
        .join(" > ")
}
