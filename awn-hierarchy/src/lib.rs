//! Compares the parent/child relations of the Arabic ontology with the
//! hypernym graph of the Arabic wordnet.
//!
//! Concepts are resolved to candidate synsets through normalized lemmas
//! ([`matcher`]), each relation pair is verified by a bounded breadth-first
//! search ([`verifier`]), and the verdicts are tallied ([`aggregate`]) and
//! written out for review ([`report`]).

use std::path::PathBuf;

pub mod aggregate;
pub mod config;
pub mod matcher;
pub mod pipeline;
pub mod report;
pub mod review;
pub mod verifier;

pub use aggregate::{ComparisonSummary, HopHistogram};
pub use config::ComparisonConfig;
pub use matcher::{ConceptMatch, ConceptMatcher, MatchResult, ResolvedConcepts};
pub use pipeline::{Comparison, ComparisonRun, InputPaths, Resources};
pub use review::QualityIndicators;
pub use verifier::{
    Category, ClassifiedPair, MatchedSide, Outcome, PathMatch, PathVerifier, DEFAULT_MAX_HOPS,
};

#[derive(Debug, thiserror::Error)]
pub enum ComparisonError {
    #[error(transparent)]
    Lexicon(#[from] awn_lexicon::LexiconError),

    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
