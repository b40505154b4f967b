use std::io::{self, Write};

use crate::verifier::Category;

use super::{chain_name, Report};

impl Report<'_> {
    /// Category and hop tables in Markdown.
    pub fn write_markdown<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let summary = &self.run.summary;
        let relation = self.run.relation;
        let chain = chain_name(relation);

        writeln!(out, "## Ontology {relation} vs wordnet {chain} chains\n")?;
        writeln!(out, "### Method")?;
        writeln!(out, "For each of the {} ontology {relation} pairs:", summary.total)?;
        writeln!(
            out,
            "1. Map child and parent concepts to wordnet synsets via normalized lemma matching"
        )?;
        writeln!(
            out,
            "2. Breadth-first search up the {chain} graph (max {} hops) from child synsets toward parent synsets",
            self.run.max_hops
        )?;
        writeln!(out, "3. Classify as AGREE / DISAGREE / PARTIAL / UNMATCHABLE\n")?;

        writeln!(out, "### Results\n")?;
        writeln!(out, "| Category | Count | % |")?;
        writeln!(out, "|----------|------:|---:|")?;
        let rows = [
            (Category::Agree, "AGREE (path exists)"),
            (Category::Disagree, "DISAGREE (both matched, no path)"),
            (Category::Partial, "PARTIAL (one side unmatched)"),
            (Category::Unmatchable, "UNMATCHABLE (neither matched)"),
        ];
        for (category, label) in rows {
            writeln!(
                out,
                "| {label} | {} | {:.1}% |",
                summary.count(category),
                summary.share(category)
            )?;
        }
        writeln!(out, "| **Total** | **{}** | **100%** |\n", summary.total)?;

        if summary.self_match_artifacts > 0 {
            writeln!(
                out,
                "{} DISAGREE pairs share a synset between child and parent.\n",
                summary.self_match_artifacts
            )?;
        }

        if summary.agree > 0 {
            writeln!(out, "#### Hop Distribution (AGREE cases)\n")?;
            writeln!(out, "| Hops | Count | % of AGREE |")?;
            writeln!(out, "|-----:|------:|-----------:|")?;
            for (hops, count) in summary.hops.iter().filter(|(_, count)| *count > 0) {
                writeln!(
                    out,
                    "| {hops} | {count} | {:.1}% |",
                    count as f64 * 100.0 / summary.agree as f64
                )?;
            }
            if summary.hops.overflow() > 0 {
                writeln!(
                    out,
                    "| >{} | {} | {:.1}% |",
                    summary.hops.max_bucket(),
                    summary.hops.overflow(),
                    summary.hops.overflow() as f64 * 100.0 / summary.agree as f64
                )?;
            }
            if let Some(average) = summary.hops.average() {
                writeln!(out, "\nAverage path length: {average:.2} hops")?;
            }
        }
        Ok(())
    }
}
