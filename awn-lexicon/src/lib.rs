//! Lexical resources for the hierarchy comparison: the wordnet read from
//! WN-LMF XML, the ontology read from its CSV tables, the normalized lemma
//! index over either of them, and directed relation graphs.

use std::path::PathBuf;

pub mod annotations;
pub mod graph;
pub mod index;
mod lmf;
pub mod model;
pub mod ontology;
pub mod wordnet;

pub use annotations::ConfidenceAnnotations;
pub use graph::RelationGraph;
pub use index::LexicalIndex;
pub use model::{
    Concept, ConceptId, ConceptRelationKind, ConceptRelations, Confidence, LexicalEntry,
    PartOfSpeech, RelType, Sense, Synset, SynsetId, SynsetRelation,
};
pub use ontology::{ConceptPair, Ontology, OntologyStats, PairSet};
pub use wordnet::{LexiconInfo, LoadStats, Wordnet, WordnetBuilder};

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML near byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("failed to read {table} table: {source}")]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },

    #[error("{table} table is missing required column {column}")]
    MissingColumn { table: String, column: &'static str },

    #[error("unknown confidence level {0:?}")]
    UnknownConfidence(String),

    #[error("unknown ontology relation {0:?}, expected subTypeOf, partOf or instanceOf")]
    UnknownRelationKind(String),
}
