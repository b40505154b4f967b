use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::io::{self, Write};

use awn_lexicon::{ConceptId, ConceptRelationKind, Ontology, Synset, Wordnet};

use crate::matcher::{ConceptMatch, ResolvedConcepts};

const MAX_LEMMAS: usize = 10;
const MAX_EXAMPLES: usize = 3;

/// A seeded random sample of matched concepts, shown next to every
/// wordnet synset they matched.
pub struct SideBySide<'a> {
    ontology: &'a Ontology,
    wordnet: &'a Wordnet,
    entries: Vec<&'a ConceptMatch>,
}

impl<'a> SideBySide<'a> {
    /// Same `seed`, same inputs, same selection.
    pub fn sample(
        ontology: &'a Ontology,
        wordnet: &'a Wordnet,
        resolved: &'a ResolvedConcepts,
        size: usize,
        seed: u64,
    ) -> Self {
        let mut matched: Vec<&ConceptMatch> = resolved.iter().filter(|m| m.is_matched()).collect();
        matched.sort_by(|a, b| a.concept.cmp(&b.concept));
        let mut rng = StdRng::seed_from_u64(seed);
        let entries = matched
            .choose_multiple(&mut rng, size.min(matched.len()))
            .copied()
            .collect();
        Self {
            ontology,
            wordnet,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn concepts(&self) -> impl Iterator<Item = &ConceptId> {
        self.entries.iter().map(|entry| &entry.concept)
    }

    pub fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let total = self.entries.len();
        writeln!(out, "{}", "=".repeat(100))?;
        writeln!(out, "ARABIC ONTOLOGY vs WORDNET - SIDE-BY-SIDE COMPARISON")?;
        writeln!(out, "Selected {total} entries that exist in both resources")?;
        writeln!(out, "{}\n", "=".repeat(100))?;

        for (i, entry) in self.entries.iter().enumerate() {
            let matched_lemma = entry.via.keys().next().map(String::as_str).unwrap_or("");
            writeln!(out, "{}", "-".repeat(100))?;
            writeln!(
                out,
                "  ENTRY {} / {total}   |   Matched on lemma: \"{matched_lemma}\"",
                i + 1
            )?;
            writeln!(out, "{}\n", "-".repeat(100))?;
            self.write_concept(out, &entry.concept)?;
            self.write_synsets(out, entry)?;
        }

        writeln!(out, "{}", "=".repeat(100))?;
        writeln!(out, "END OF COMPARISON")?;
        writeln!(out, "{}", "=".repeat(100))
    }

    fn write_concept<W: Write>(&self, out: &mut W, id: &ConceptId) -> io::Result<()> {
        let concept = self.ontology.concept(id);
        let field = |value: Option<&String>| -> String {
            value
                .filter(|v| !v.is_empty())
                .cloned()
                .unwrap_or_else(|| "(none)".to_string())
        };
        writeln!(out, "  +--- ARABIC ONTOLOGY")?;
        writeln!(out, "  | Concept ID:    {id}")?;
        writeln!(
            out,
            "  | Arabic Synset: {}",
            concept.map(|c| c.lemmas.join("|")).unwrap_or_default()
        )?;
        writeln!(out, "  | English:       {}", field(concept.and_then(|c| c.english.as_ref())))?;
        writeln!(out, "  | Gloss:         {}", field(concept.and_then(|c| c.gloss.as_ref())))?;
        writeln!(out, "  | Example:       {}", field(concept.and_then(|c| c.example.as_ref())))?;
        writeln!(out, "  | DataSource:    {}", field(concept.and_then(|c| c.source.as_ref())))?;
        for kind in [
            ConceptRelationKind::SubTypeOf,
            ConceptRelationKind::PartOf,
            ConceptRelationKind::InstanceOf,
        ] {
            writeln!(out, "  | {:<14} {}", format!("{kind}:"), self.parent_label(id, kind))?;
        }
        writeln!(out, "  +---\n")
    }

    fn parent_label(&self, id: &ConceptId, kind: ConceptRelationKind) -> String {
        let Some(parent) = self
            .ontology
            .relations_of(id)
            .and_then(|relations| relations.parent(kind))
        else {
            return "NULL".to_string();
        };
        match self.ontology.concept(parent) {
            Some(concept) => format!(
                "{parent}: {} | {}",
                concept.lemmas.join("|"),
                concept.english.as_deref().unwrap_or("")
            ),
            None => parent.to_string(),
        }
    }

    fn write_synsets<W: Write>(&self, out: &mut W, entry: &ConceptMatch) -> io::Result<()> {
        writeln!(out, "  +--- WORDNET")?;
        for id in &entry.candidates {
            if let Some(synset) = self.wordnet.synset(id) {
                write_synset(out, synset)?;
            }
        }
        writeln!(out, "  | Total matching wordnet synsets: {}", entry.len())?;
        writeln!(out, "  +---\n\n")
    }
}

fn write_synset<W: Write>(out: &mut W, synset: &Synset) -> io::Result<()> {
    writeln!(out, "  |")?;
    writeln!(out, "  | Synset ID:     {}", synset.id)?;
    writeln!(out, "  | ILI:           {}", synset.ili.as_deref().unwrap_or(""))?;
    writeln!(out, "  | POS:           {}", synset.pos)?;
    let lemmas: Vec<&str> = synset.lemmas.iter().take(MAX_LEMMAS).map(String::as_str).collect();
    writeln!(out, "  | Lemmas:        {}", lemmas.join(" | "))?;

    let numbered = |label: &str, i: usize, n: usize| {
        if n > 1 {
            format!("{label} [{}]:", i + 1)
        } else {
            format!("{label}:")
        }
    };
    for (i, definition) in synset.definitions.iter().enumerate() {
        let label = numbered("Definition", i, synset.definitions.len());
        writeln!(out, "  | {label:<14} {definition}")?;
    }
    let examples = synset.examples.len().min(MAX_EXAMPLES);
    for (i, example) in synset.examples.iter().take(MAX_EXAMPLES).enumerate() {
        let label = numbered("Example", i, examples);
        writeln!(out, "  | {label:<14} {example}")?;
    }

    if !synset.relations.is_empty() {
        let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for relation in &synset.relations {
            grouped
                .entry(relation.rel_type.as_str())
                .or_default()
                .push(relation.target.as_str());
        }
        writeln!(out, "  | Relations:")?;
        for (rel_type, targets) in grouped {
            writeln!(out, "  |   {rel_type}: {}", targets.join(", "))?;
        }
    }
    writeln!(out, "  | - - - - - - - - - - - - - - - - - -")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::ConceptMatcher;
    use awn_lexicon::{
        Concept, ConceptRelations, LexicalIndex, PartOfSpeech, SynsetId, SynsetRelation, RelType,
    };
    use awn_text::ArabicNormalizer;

    fn concept(id: &str, lemma: &str) -> Concept {
        Concept {
            id: ConceptId::new(id),
            lemmas: vec![lemma.to_string()],
            english: Some(format!("concept {id}")),
            gloss: None,
            example: None,
            source: Some("1".to_string()),
        }
    }

    fn fixture() -> (Ontology, Wordnet) {
        let ontology = Ontology::from_parts(
            vec![
                concept("1", "قط"),
                concept("2", "حيوان"),
                concept("3", "بيت"),
                concept("4", "غير موجود"),
            ],
            vec![ConceptRelations {
                concept: ConceptId::new("1"),
                sub_type_of: Some(ConceptId::new("2")),
                ..ConceptRelations::default()
            }],
        );
        let mut builder = Wordnet::builder();
        for (id, lemma) in [("cat-n", "قِطّ"), ("animal-n", "حيوان"), ("house-n", "بيت")] {
            let mut synset = Synset::new(SynsetId::new(id), PartOfSpeech::Noun);
            synset.lemmas.push(lemma.to_string());
            synset.definitions.push(format!("definition of {id}"));
            if id == "cat-n" {
                synset.relations.push(SynsetRelation {
                    rel_type: RelType::Hypernym,
                    target: SynsetId::new("animal-n"),
                });
            }
            builder.synset(synset);
        }
        (ontology, builder.finish())
    }

    fn index_lemmas(wordnet: &Wordnet) -> LexicalIndex<SynsetId> {
        let mut index = LexicalIndex::new(ArabicNormalizer::new());
        for synset in wordnet.synsets() {
            for lemma in &synset.lemmas {
                index.insert(lemma, synset.id.clone());
            }
        }
        index
    }

    #[test]
    fn sample_is_seeded_and_only_matched() {
        let (ontology, wordnet) = fixture();
        let index = index_lemmas(&wordnet);
        let resolved = ConceptMatcher::new(&index).resolve_all(&ontology);

        let first = SideBySide::sample(&ontology, &wordnet, &resolved, 2, 42);
        let again = SideBySide::sample(&ontology, &wordnet, &resolved, 2, 42);
        let ids: Vec<_> = first.concepts().cloned().collect();
        assert_eq!(ids, again.concepts().cloned().collect::<Vec<_>>());
        assert_eq!(first.len(), 2);
        assert!(!ids.contains(&ConceptId::new("4")));

        let all = SideBySide::sample(&ontology, &wordnet, &resolved, 35, 42);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn renders_both_resources() {
        let (ontology, wordnet) = fixture();
        let index = index_lemmas(&wordnet);
        let resolved = ConceptMatcher::new(&index).resolve_all(&ontology);
        let sample = SideBySide::sample(&ontology, &wordnet, &resolved, 35, 7);

        let mut out = Vec::new();
        sample.write(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Selected 3 entries"));
        assert!(text.contains("subTypeOf:     2: حيوان | concept 2"));
        assert!(text.contains("hypernym: animal-n"));
        assert!(text.contains("END OF COMPARISON"));
    }
}
