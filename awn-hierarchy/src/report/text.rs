use std::io::{self, Write};

use crate::verifier::{Category, ClassifiedPair, MatchedSide, Outcome};

use super::{chain_name, concept_label, plural, synset_label, Report};

const RULE_WIDTH: usize = 100;
/// Candidate synsets listed per side in DISAGREE examples.
const LISTED_CANDIDATES: usize = 5;

fn rule(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn section(out: &mut impl Write, title: &str, shown: usize, total: usize) -> io::Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "{title} (showing {shown} of {total})")?;
    rule(out)?;
    writeln!(out)
}

impl Report<'_> {
    /// Plain-text report: summary, hop distribution and examples per
    /// category.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let summary = &self.run.summary;
        let relation = self.run.relation;
        let chain = chain_name(relation);

        rule(out)?;
        writeln!(
            out,
            "ARABIC ONTOLOGY {relation} vs WORDNET {} CHAINS",
            chain.to_uppercase()
        )?;
        writeln!(out, "Compared {} ontology parent-child pairs", summary.total)?;
        writeln!(out, "{} search depth: up to {} hops", capitalize(chain), self.run.max_hops)?;
        rule(out)?;
        writeln!(out)?;

        writeln!(out, "SUMMARY STATISTICS")?;
        writeln!(out, "{}", "-".repeat(60))?;
        writeln!(out, "Total {relation} pairs analyzed:       {}", summary.total)?;
        let rows = [
            ("AGREE     (path found):              ", Category::Agree),
            ("DISAGREE  (both matched, no path):   ", Category::Disagree),
            ("PARTIAL   (only one side matched):   ", Category::Partial),
        ];
        for (label, category) in rows {
            writeln!(
                out,
                "  {label}{:>5}  ({:.1}%)",
                summary.count(category),
                summary.share(category)
            )?;
            if category == Category::Disagree {
                writeln!(
                    out,
                    "    - shared synset (self-match):     {:>5}",
                    summary.self_match_artifacts
                )?;
            }
        }
        writeln!(
            out,
            "    - child only:                      {:>5}",
            summary.partial_child_only
        )?;
        writeln!(
            out,
            "    - parent only:                     {:>5}",
            summary.partial_parent_only
        )?;
        writeln!(
            out,
            "  UNMATCHABLE (neither matched):       {:>5}  ({:.1}%)",
            summary.unmatchable,
            summary.share(Category::Unmatchable)
        )?;
        if self.run.skipped_pairs > 0 {
            writeln!(
                out,
                "  Skipped (unknown concept id):        {:>5}",
                self.run.skipped_pairs
            )?;
        }
        writeln!(out)?;

        if summary.agree > 0 {
            writeln!(out, "AGREE - Hop distribution:")?;
            for (hops, count) in summary.hops.iter().filter(|(_, count)| *count > 0) {
                writeln!(
                    out,
                    "  {hops} hop{:<1}: {count:>5}  ({:.1}%)",
                    plural(hops),
                    count as f64 * 100.0 / summary.agree as f64
                )?;
            }
            if summary.hops.overflow() > 0 {
                writeln!(
                    out,
                    "  more:    {:>5}  ({:.1}%)",
                    summary.hops.overflow(),
                    summary.hops.overflow() as f64 * 100.0 / summary.agree as f64
                )?;
            }
            if let Some(average) = summary.hops.average() {
                writeln!(out, "  Average: {average:.2} hops")?;
            }
            writeln!(out)?;
        }

        let limit = self.config.sample_per_category;
        self.write_agree_examples(out, limit)?;
        self.write_disagree_examples(out, limit)?;
        self.write_partial_examples(out, limit, MatchedSide::ChildOnly)?;
        self.write_partial_examples(out, limit, MatchedSide::ParentOnly)?;
        self.write_unmatchable_examples(out, limit)?;

        rule(out)?;
        writeln!(out, "END OF REPORT")?;
        rule(out)
    }

    fn write_agree_examples<W: Write>(&self, out: &mut W, limit: usize) -> io::Result<()> {
        let total = self.run.summary.agree;
        section(out, "AGREE EXAMPLES", limit.min(total), total)?;
        for pair in self.run.iter_category(Category::Agree).take(limit) {
            self.write_pair_header(out, pair)?;
            if let Outcome::Agree { path } = &pair.outcome {
                writeln!(out, "  Wordnet path ({} hop{}):", path.hops, plural(path.hops))?;
                for step in &path.path {
                    writeln!(out, "    -> {}", synset_label(self.wordnet(), step))?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_disagree_examples<W: Write>(&self, out: &mut W, limit: usize) -> io::Result<()> {
        let total = self.run.summary.disagree;
        section(out, "DISAGREE EXAMPLES", limit.min(total), total)?;
        for pair in self.run.iter_category(Category::Disagree).take(limit) {
            self.write_pair_header(out, pair)?;
            for (side, candidates) in [
                ("Child", &pair.result.child.candidates),
                ("Parent", &pair.result.parent.candidates),
            ] {
                writeln!(out, "  {side} wordnet synsets ({}):", candidates.len())?;
                for id in candidates.iter().take(LISTED_CANDIDATES) {
                    writeln!(out, "    {}", synset_label(self.wordnet(), id))?;
                }
                if candidates.len() > LISTED_CANDIDATES {
                    writeln!(
                        out,
                        "    ... and {} more",
                        candidates.len() - LISTED_CANDIDATES
                    )?;
                }
            }
            if pair.outcome.is_self_match() {
                writeln!(out, "  -> Both sides share a synset; no path of 1 or more hops")?;
            }
            writeln!(
                out,
                "  -> No {} path found within {} hops",
                chain_name(self.run.relation),
                self.run.max_hops
            )?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_partial_examples<W: Write>(
        &self,
        out: &mut W,
        limit: usize,
        side: MatchedSide,
    ) -> io::Result<()> {
        let summary = &self.run.summary;
        let (title, total) = match side {
            MatchedSide::ChildOnly => ("PARTIAL - CHILD ONLY", summary.partial_child_only),
            MatchedSide::ParentOnly => ("PARTIAL - PARENT ONLY", summary.partial_parent_only),
        };
        section(out, title, limit.min(total), total)?;
        let matching = self
            .run
            .classified
            .iter()
            .filter(|pair| pair.outcome == Outcome::Partial { side });
        for pair in matching.take(limit) {
            let ontology = self.ontology();
            let describe = |n: usize| match n {
                0 => "NO wordnet match".to_string(),
                n => format!("{n} wordnet synsets"),
            };
            writeln!(
                out,
                "  Child:  {} -> {}",
                concept_label(ontology, &pair.result.pair.child),
                describe(pair.result.child.len())
            )?;
            writeln!(
                out,
                "  Parent: {} -> {}",
                concept_label(ontology, &pair.result.pair.parent),
                describe(pair.result.parent.len())
            )?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_unmatchable_examples<W: Write>(&self, out: &mut W, limit: usize) -> io::Result<()> {
        let total = self.run.summary.unmatchable;
        section(out, "UNMATCHABLE EXAMPLES", limit.min(total), total)?;
        for pair in self.run.iter_category(Category::Unmatchable).take(limit) {
            let ontology = self.ontology();
            writeln!(out, "  Child:  {}", concept_label(ontology, &pair.result.pair.child))?;
            writeln!(out, "  Parent: {}", concept_label(ontology, &pair.result.pair.parent))?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_pair_header<W: Write>(&self, out: &mut W, pair: &ClassifiedPair) -> io::Result<()> {
        let ontology = self.ontology();
        writeln!(out, "  Ontology: {}", concept_label(ontology, &pair.result.pair.child))?;
        writeln!(
            out,
            "    {} -> {}",
            self.run.relation,
            concept_label(ontology, &pair.result.pair.parent)
        )?;
        if let Some(confidence) = pair.result.confidence {
            writeln!(out, "    confidence: {confidence}")?;
        }
        Ok(())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
