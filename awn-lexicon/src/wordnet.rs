use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info, warn};

use crate::model::{LexicalEntry, PartOfSpeech, Synset, SynsetId};

/// Header attributes of the `Lexicon` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconInfo {
    pub id: Option<String>,
    pub label: Option<String>,
    pub language: Option<String>,
    pub version: Option<String>,
}

/// What was kept and what was dropped while loading a wordnet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    pub entries: usize,
    pub senses: usize,
    pub synsets: usize,
    pub relations: usize,
    /// Relations whose target synset does not exist.
    pub dangling_relations: usize,
    /// Senses pointing at a synset that does not exist.
    pub dangling_senses: usize,
    pub duplicate_synsets: usize,
    /// Entries without an id or written form.
    pub malformed_entries: usize,
    /// Synsets without an id.
    pub malformed_synsets: usize,
}

/// An immutable wordnet loaded from a lexical resource file.
#[derive(Debug, Clone)]
pub struct Wordnet {
    info: LexiconInfo,
    entries: Vec<LexicalEntry>,
    synsets: Vec<Synset>,
    positions: HashMap<SynsetId, usize>,
    stats: LoadStats,
}

impl Wordnet {
    pub fn builder() -> WordnetBuilder {
        WordnetBuilder::default()
    }

    pub fn info(&self) -> &LexiconInfo {
        &self.info
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    pub fn entries(&self) -> &[LexicalEntry] {
        &self.entries
    }

    pub fn synsets(&self) -> &[Synset] {
        &self.synsets
    }

    pub fn synset(&self, id: &SynsetId) -> Option<&Synset> {
        self.positions.get(id).map(|&pos| &self.synsets[pos])
    }

    pub fn contains(&self, id: &SynsetId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.synsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synsets.is_empty()
    }

    pub fn pos_distribution(&self) -> BTreeMap<PartOfSpeech, usize> {
        let mut counts = BTreeMap::new();
        for synset in &self.synsets {
            *counts.entry(synset.pos).or_insert(0) += 1;
        }
        counts
    }

    pub fn relation_type_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for relation in self.synsets.iter().flat_map(|s| &s.relations) {
            *counts.entry(relation.rel_type.to_string()).or_insert(0) += 1;
        }
        counts
    }
}

/// Collects raw records and enforces the wordnet invariants on `finish`.
#[derive(Debug, Default)]
pub struct WordnetBuilder {
    info: LexiconInfo,
    entries: Vec<LexicalEntry>,
    synsets: Vec<Synset>,
    stats: LoadStats,
}

impl WordnetBuilder {
    pub fn info(&mut self, info: LexiconInfo) -> &mut Self {
        self.info = info;
        self
    }

    pub fn entry(&mut self, entry: LexicalEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    pub fn synset(&mut self, synset: Synset) -> &mut Self {
        self.synsets.push(synset);
        self
    }

    pub fn malformed_entry(&mut self) -> &mut Self {
        self.stats.malformed_entries += 1;
        self
    }

    pub fn malformed_synset(&mut self) -> &mut Self {
        self.stats.malformed_synsets += 1;
        self
    }

    pub fn finish(self) -> Wordnet {
        let mut stats = self.stats;

        let mut synsets = Vec::with_capacity(self.synsets.len());
        let mut positions = HashMap::with_capacity(self.synsets.len());
        for synset in self.synsets {
            if positions.contains_key(&synset.id) {
                debug!(synset = %synset.id, "skipping duplicate synset");
                stats.duplicate_synsets += 1;
                continue;
            }
            positions.insert(synset.id.clone(), synsets.len());
            synsets.push(synset);
        }

        for synset in &mut synsets {
            let mut dangling = 0;
            let mut seen = HashSet::new();
            synset.relations.retain(|relation| {
                if !positions.contains_key(&relation.target) {
                    dangling += 1;
                    return false;
                }
                seen.insert((relation.rel_type.clone(), relation.target.clone()))
            });
            if dangling > 0 {
                debug!(synset = %synset.id, dangling, "dropping relations to unknown synsets");
            }
            stats.dangling_relations += dangling;
            stats.relations += synset.relations.len();
        }

        let mut entries = Vec::with_capacity(self.entries.len());
        for mut entry in self.entries {
            let before = entry.senses.len();
            entry.senses.retain(|sense| positions.contains_key(&sense.synset));
            stats.dangling_senses += before - entry.senses.len();
            for sense in &entry.senses {
                let synset = &mut synsets[positions[&sense.synset]];
                if !synset.lemmas.contains(&entry.lemma) {
                    synset.lemmas.push(entry.lemma.clone());
                }
            }
            stats.senses += entry.senses.len();
            entries.push(entry);
        }

        stats.entries = entries.len();
        stats.synsets = synsets.len();

        if stats.dangling_relations > 0 || stats.dangling_senses > 0 {
            warn!(
                dangling_relations = stats.dangling_relations,
                dangling_senses = stats.dangling_senses,
                "dropped references to synsets missing from the lexicon"
            );
        }
        info!(
            synsets = stats.synsets,
            entries = stats.entries,
            senses = stats.senses,
            relations = stats.relations,
            "wordnet loaded"
        );

        Wordnet {
            info: self.info,
            entries,
            synsets,
            positions,
            stats,
        }
    }
}
