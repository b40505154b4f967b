//! Human-readable and machine-readable output of a comparison run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use awn_lexicon::{
    ConceptId, ConceptRelationKind, LexiconInfo, LoadStats, Ontology, OntologyStats, SynsetId,
    Wordnet,
};

use crate::aggregate::ComparisonSummary;
use crate::config::ComparisonConfig;
use crate::pipeline::{ComparisonRun, Resources};
use crate::review::QualityIndicators;
use crate::ComparisonError;

mod markdown;
mod pairs;
mod sample;
mod stats;
mod text;

pub use sample::SideBySide;
pub use stats::write_wordnet_stats;

pub const TEXT_REPORT: &str = "hierarchy_comparison_report.txt";
pub const MARKDOWN_SUMMARY: &str = "hierarchy_summary.md";
pub const JSON_SUMMARY: &str = "hierarchy_summary.json";
pub const PAIRS_CSV: &str = "hierarchy_pairs.csv";
pub const AGREE_DUMP: &str = "validation_all_agree.txt";
pub const DISAGREE_DUMP: &str = "validation_disagree_sample.txt";

/// Renders one run against the resources it was computed from.
pub struct Report<'a> {
    run: &'a ComparisonRun,
    resources: &'a Resources,
    config: &'a ComparisonConfig,
}

impl<'a> Report<'a> {
    pub fn new(
        run: &'a ComparisonRun,
        resources: &'a Resources,
        config: &'a ComparisonConfig,
    ) -> Self {
        Self {
            run,
            resources,
            config,
        }
    }

    fn ontology(&self) -> &Ontology {
        &self.resources.ontology
    }

    fn wordnet(&self) -> &Wordnet {
        &self.resources.wordnet
    }

    /// Write every report file into `dir`, creating it if needed.
    pub fn write_all(&self, dir: &Path) -> Result<Vec<PathBuf>, ComparisonError> {
        fs::create_dir_all(dir).map_err(|source| ComparisonError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::new();
        written.push(write_file(dir, TEXT_REPORT, |out| self.write_text(out))?);
        written.push(write_file(dir, MARKDOWN_SUMMARY, |out| {
            self.write_markdown(out)
        })?);
        written.push(write_file(dir, AGREE_DUMP, |out| self.write_agree_dump(out))?);
        written.push(write_file(dir, DISAGREE_DUMP, |out| {
            self.write_disagree_dump(out)
        })?);

        let json = dir.join(JSON_SUMMARY);
        let mut out = BufWriter::new(create(&json)?);
        serde_json::to_writer_pretty(&mut out, &self.json_summary())?;
        out.flush().map_err(|source| ComparisonError::Io {
            path: json.clone(),
            source,
        })?;
        written.push(json);

        let csv = dir.join(PAIRS_CSV);
        self.write_pairs_csv(create(&csv)?)?;
        written.push(csv);

        info!(dir = %dir.display(), files = written.len(), "wrote comparison reports");
        Ok(written)
    }

    pub fn json_summary(&self) -> JsonSummary<'_> {
        JsonSummary {
            generated_at: Utc::now(),
            relation: self.run.relation,
            max_hops: self.run.max_hops,
            wordnet: self.wordnet().info(),
            wordnet_stats: self.wordnet().stats(),
            ontology_stats: self.ontology().stats(),
            matched_concepts: self.run.matched_concepts,
            skipped_pairs: self.run.skipped_pairs,
            summary: &self.run.summary,
            indicators: &self.run.indicators,
        }
    }
}

/// Serialized form of a run's tallies.
#[derive(Debug, Serialize)]
pub struct JsonSummary<'a> {
    pub generated_at: DateTime<Utc>,
    pub relation: ConceptRelationKind,
    pub max_hops: usize,
    pub wordnet: &'a LexiconInfo,
    pub wordnet_stats: &'a LoadStats,
    pub ontology_stats: &'a OntologyStats,
    pub matched_concepts: usize,
    pub skipped_pairs: usize,
    pub summary: &'a ComparisonSummary,
    pub indicators: &'a QualityIndicators,
}

fn create(path: &Path) -> Result<File, ComparisonError> {
    File::create(path).map_err(|source| ComparisonError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(
    dir: &Path,
    name: &str,
    render: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<PathBuf, ComparisonError> {
    let path = dir.join(name);
    let mut out = BufWriter::new(create(&path)?);
    render(&mut out)
        .and_then(|()| out.flush())
        .map_err(|source| ComparisonError::Io {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// Cut `text` to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max) {
        Some((end, _)) => Cow::Owned(format!("{}...", &text[..end])),
        None => Cow::Borrowed(text),
    }
}

fn prefix(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

pub(crate) fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// `[id] lemma|lemma (english)`
pub(crate) fn concept_label(ontology: &Ontology, id: &ConceptId) -> String {
    match ontology.concept(id) {
        Some(concept) => concept.label(),
        None => format!("[{id}] ?"),
    }
}

/// Concept label followed by the start of its gloss.
pub(crate) fn concept_info(ontology: &Ontology, id: &ConceptId) -> String {
    let mut info = concept_label(ontology, id);
    if let Some(gloss) = ontology.concept(id).and_then(|c| c.gloss.as_deref()) {
        info.push_str(" // ");
        info.push_str(prefix(gloss, 100));
    }
    info
}

/// `id [pos]: definition`, with the definition cut to 80 characters.
pub(crate) fn synset_label(wordnet: &Wordnet, id: &SynsetId) -> String {
    let Some(synset) = wordnet.synset(id) else {
        return id.to_string();
    };
    let mut label = format!("{id} [{}]", synset.pos);
    if let Some(definition) = synset.first_definition().filter(|d| !d.is_empty()) {
        label.push_str(": ");
        label.push_str(&truncate(definition, 80));
    }
    label
}

/// `id [pos] lemmas=(..) def: ..` for the review dumps.
pub(crate) fn synset_info(wordnet: &Wordnet, id: &SynsetId) -> String {
    let Some(synset) = wordnet.synset(id) else {
        return format!("{id} [?]");
    };
    let lemmas: Vec<&str> = synset.lemmas.iter().take(5).map(String::as_str).collect();
    format!(
        "{id} [{}] lemmas=({}) def: {}",
        synset.pos,
        lemmas.join(", "),
        prefix(synset.first_definition().unwrap_or(""), 120)
    )
}

/// Name of the wordnet chain walked for an ontology relation.
pub(crate) fn chain_name(kind: ConceptRelationKind) -> &'static str {
    match kind {
        ConceptRelationKind::SubTypeOf | ConceptRelationKind::InstanceOf => "hypernym",
        ConceptRelationKind::PartOf => "holonym",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("قطط", 2), "قط...");
        assert_eq!(truncate("قط", 2), "قط");
        assert_eq!(prefix("abcdef", 3), "abc");
    }

    #[test]
    fn labels_unknown_ids() {
        let wordnet = Wordnet::builder().finish();
        let ontology = Ontology::default();
        assert_eq!(synset_label(&wordnet, &SynsetId::new("x")), "x");
        assert_eq!(concept_label(&ontology, &ConceptId::new("7")), "[7] ?");
    }
}
