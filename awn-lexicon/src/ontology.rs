//! Ontology loaded from its `Concepts.csv` and `Relations.csv` tables.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::model::{Concept, ConceptId, ConceptRelationKind, ConceptRelations};
use crate::LexiconError;

/// Row counts gathered while loading the ontology.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyStats {
    pub concepts: usize,
    pub relation_rows: usize,
    /// Rows that failed to deserialize, lack an id, or list no Arabic lemma.
    pub malformed_concept_rows: usize,
    pub malformed_relation_rows: usize,
    pub duplicate_concepts: usize,
    /// Relation rows for a concept seen earlier; the later row wins.
    pub duplicate_relation_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConceptPair {
    pub child: ConceptId,
    pub parent: ConceptId,
}

/// The child/parent pairs of one ontology relation column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSet {
    pub kind: ConceptRelationKind,
    pub pairs: Vec<ConceptPair>,
    /// Pairs dropped because either side is not a known concept.
    pub unknown_references: usize,
}

#[derive(Debug, Deserialize)]
struct ConceptRow {
    #[serde(rename = "conceptId")]
    concept_id: Option<String>,
    #[serde(rename = "arabicSynset")]
    arabic_synset: Option<String>,
    #[serde(rename = "englishSynset")]
    english_synset: Option<String>,
    gloss: Option<String>,
    example: Option<String>,
    #[serde(rename = "dataSourceId")]
    data_source_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RelationRow {
    concept_id: Option<String>,
    #[serde(rename = "subTypeOfID")]
    sub_type_of: Option<String>,
    #[serde(rename = "partOfID")]
    part_of: Option<String>,
    #[serde(rename = "instanceOfID")]
    instance_of: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Ontology {
    concepts: Vec<Concept>,
    positions: HashMap<ConceptId, usize>,
    relations: Vec<ConceptRelations>,
    relation_positions: HashMap<ConceptId, usize>,
    stats: OntologyStats,
}

impl Ontology {
    /// Load the concept and relation tables from disk.
    pub fn load(
        concepts_path: impl AsRef<Path>,
        relations_path: impl AsRef<Path>,
    ) -> Result<Self, LexiconError> {
        let concepts = open(concepts_path.as_ref())?;
        let relations = open(relations_path.as_ref())?;
        info!(
            concepts = %concepts_path.as_ref().display(),
            relations = %relations_path.as_ref().display(),
            "loading ontology"
        );
        Self::from_readers(concepts, relations)
    }

    pub fn from_readers<C: Read, R: Read>(concepts: C, relations: R) -> Result<Self, LexiconError> {
        let mut ontology = Ontology::default();

        let (rows, malformed) = read_table::<_, ConceptRow>(concepts, "concepts", "conceptId")?;
        ontology.stats.malformed_concept_rows = malformed;
        for row in rows {
            match concept_from_row(row) {
                Some(concept) => ontology.insert_concept(concept),
                None => ontology.stats.malformed_concept_rows += 1,
            }
        }

        let (rows, malformed) = read_table::<_, RelationRow>(relations, "relations", "concept_id")?;
        ontology.stats.malformed_relation_rows = malformed;
        for row in rows {
            match row.concept_id.and_then(present) {
                Some(id) => ontology.insert_relations(ConceptRelations {
                    concept: ConceptId(id),
                    sub_type_of: row.sub_type_of.and_then(parent_reference),
                    part_of: row.part_of.and_then(parent_reference),
                    instance_of: row.instance_of.and_then(parent_reference),
                }),
                None => ontology.stats.malformed_relation_rows += 1,
            }
        }

        info!(
            concepts = ontology.stats.concepts,
            relation_rows = ontology.stats.relation_rows,
            malformed = ontology.stats.malformed_concept_rows + ontology.stats.malformed_relation_rows,
            "ontology loaded"
        );
        Ok(ontology)
    }

    /// Build an ontology from already parsed records.
    pub fn from_parts(concepts: Vec<Concept>, relations: Vec<ConceptRelations>) -> Self {
        let mut ontology = Ontology::default();
        for concept in concepts {
            if concept.lemmas.is_empty() {
                ontology.stats.malformed_concept_rows += 1;
            } else {
                ontology.insert_concept(concept);
            }
        }
        for relation in relations {
            ontology.insert_relations(relation);
        }
        ontology
    }

    fn insert_concept(&mut self, concept: Concept) {
        if self.positions.contains_key(&concept.id) {
            debug!(concept = %concept.id, "skipping duplicate concept");
            self.stats.duplicate_concepts += 1;
            return;
        }
        self.positions.insert(concept.id.clone(), self.concepts.len());
        self.concepts.push(concept);
        self.stats.concepts += 1;
    }

    fn insert_relations(&mut self, relations: ConceptRelations) {
        match self.relation_positions.get(&relations.concept) {
            Some(&pos) => {
                self.stats.duplicate_relation_rows += 1;
                self.relations[pos] = relations;
            }
            None => {
                self.relation_positions
                    .insert(relations.concept.clone(), self.relations.len());
                self.relations.push(relations);
                self.stats.relation_rows += 1;
            }
        }
    }

    pub fn stats(&self) -> &OntologyStats {
        &self.stats
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    pub fn concept(&self, id: &ConceptId) -> Option<&Concept> {
        self.positions.get(id).map(|&pos| &self.concepts[pos])
    }

    pub fn relations(&self) -> &[ConceptRelations] {
        &self.relations
    }

    pub fn relations_of(&self, id: &ConceptId) -> Option<&ConceptRelations> {
        self.relation_positions.get(id).map(|&pos| &self.relations[pos])
    }

    /// Child/parent pairs for one relation column, in table order.
    pub fn pairs(&self, kind: ConceptRelationKind) -> PairSet {
        let mut pairs = Vec::new();
        let mut unknown_references = 0;
        for relations in &self.relations {
            let Some(parent) = relations.parent(kind) else {
                continue;
            };
            if !self.positions.contains_key(&relations.concept)
                || !self.positions.contains_key(parent)
            {
                debug!(child = %relations.concept, parent = %parent, "skipping pair with unknown concept");
                unknown_references += 1;
                continue;
            }
            pairs.push(ConceptPair {
                child: relations.concept.clone(),
                parent: parent.clone(),
            });
        }
        info!(relation = %kind, pairs = pairs.len(), unknown_references, "collected ontology pairs");
        PairSet {
            kind,
            pairs,
            unknown_references,
        }
    }
}

fn open(path: &Path) -> Result<File, LexiconError> {
    File::open(path).map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Deserialize every row, counting the ones that do not fit the schema.
fn read_table<R: Read, T: DeserializeOwned>(
    source: R,
    table: &str,
    required: &'static str,
) -> Result<(Vec<T>, usize), LexiconError> {
    let csv_error = |source| LexiconError::Csv {
        table: table.to_string(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(source);

    if !reader.headers().map_err(csv_error)?.iter().any(|h| h == required) {
        return Err(LexiconError::MissingColumn {
            table: table.to_string(),
            column: required,
        });
    }

    let mut rows = Vec::new();
    let mut malformed = 0;
    for (line, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(err) if err.is_io_error() => return Err(csv_error(err)),
            Err(err) => {
                debug!(table, row = line + 1, error = %err, "skipping malformed row");
                malformed += 1;
            }
        }
    }
    Ok((rows, malformed))
}

fn concept_from_row(row: ConceptRow) -> Option<Concept> {
    let id = row.concept_id.and_then(present)?;
    let lemmas: Vec<String> = row
        .arabic_synset
        .unwrap_or_default()
        .split('|')
        .map(str::trim)
        .filter(|lemma| !lemma.is_empty())
        .map(str::to_string)
        .collect();
    if lemmas.is_empty() {
        debug!(concept = %id, "skipping concept without Arabic lemmas");
        return None;
    }
    Some(Concept {
        id: ConceptId(id),
        lemmas,
        english: row.english_synset.and_then(present),
        gloss: row.gloss.and_then(present),
        example: row.example.and_then(present),
        source: row.data_source_id.and_then(present),
    })
}

/// Empty cells and the literal `NULL` mean "absent".
fn present(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "NULL" {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// Parent columns additionally use `0` to mark a root concept.
fn parent_reference(value: String) -> Option<ConceptId> {
    present(value).filter(|id| id != "0").map(ConceptId)
}
