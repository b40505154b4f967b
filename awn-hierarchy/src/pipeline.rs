use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

use awn_lexicon::{
    ConceptRelationKind, ConfidenceAnnotations, LexicalIndex, Ontology, RelationGraph, SynsetId,
    Wordnet,
};
use awn_text::ArabicNormalizer;

use crate::aggregate::ComparisonSummary;
use crate::config::ComparisonConfig;
use crate::matcher::{ConceptMatcher, MatchResult, ResolvedConcepts};
use crate::review::QualityIndicators;
use crate::verifier::{Category, ClassifiedPair, PathVerifier};
use crate::ComparisonError;

/// Locations of the input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub wordnet: PathBuf,
    pub concepts: PathBuf,
    pub relations: PathBuf,
    pub annotations: Option<PathBuf>,
}

/// Everything read from disk, loaded once and shared read-only.
#[derive(Debug, Clone)]
pub struct Resources {
    pub wordnet: Wordnet,
    pub ontology: Ontology,
    pub annotations: ConfidenceAnnotations,
}

impl Resources {
    pub fn load(paths: &InputPaths) -> Result<Self, ComparisonError> {
        let started = Instant::now();
        let ontology = Ontology::load(&paths.concepts, &paths.relations)?;
        let wordnet = Wordnet::from_lmf_path(&paths.wordnet)?;
        let annotations = match &paths.annotations {
            Some(path) => ConfidenceAnnotations::load(path)?,
            None => ConfidenceAnnotations::default(),
        };
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "loaded input resources"
        );
        Ok(Self {
            wordnet,
            ontology,
            annotations,
        })
    }
}

/// Indices and graph built for one relation kind, ready to classify.
pub struct Comparison<'r> {
    resources: &'r Resources,
    config: ComparisonConfig,
    normalizer: ArabicNormalizer,
    index: LexicalIndex<SynsetId>,
    graph: RelationGraph,
    resolved: ResolvedConcepts,
}

impl<'r> Comparison<'r> {
    pub fn prepare(resources: &'r Resources, config: &ComparisonConfig) -> Self {
        let normalizer = ArabicNormalizer::with_config(config.normalizer);
        let index = LexicalIndex::from_wordnet(&resources.wordnet, normalizer);
        let graph = RelationGraph::for_relation(&resources.wordnet, config.relation);
        let resolved = ConceptMatcher::new(&index).resolve_all(&resources.ontology);
        Self {
            resources,
            config: config.clone(),
            normalizer,
            index,
            graph,
            resolved,
        }
    }

    pub fn resources(&self) -> &Resources {
        self.resources
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &ArabicNormalizer {
        &self.normalizer
    }

    pub fn index(&self) -> &LexicalIndex<SynsetId> {
        &self.index
    }

    pub fn graph(&self) -> &RelationGraph {
        &self.graph
    }

    pub fn resolved(&self) -> &ResolvedConcepts {
        &self.resolved
    }

    /// Resolve both sides of every pair of the configured relation.
    /// The second value counts pairs dropped for unknown concept ids.
    pub fn match_pairs(&self) -> (Vec<MatchResult>, usize) {
        let pair_set = self.resources.ontology.pairs(self.config.relation);
        let annotations = &self.resources.annotations;
        let results = pair_set
            .pairs
            .iter()
            .map(|pair| self.resolved.match_pair(pair, annotations.get(pair)))
            .collect();
        (results, pair_set.unknown_references)
    }

    pub fn run(&self) -> ComparisonRun {
        let started = Instant::now();
        let (results, skipped_pairs) = self.match_pairs();
        let verifier = PathVerifier::new(&self.graph, self.config.max_hops);
        let buckets = self.config.histogram_buckets();
        info!(
            pairs = results.len(),
            relation = %self.config.relation,
            max_hops = self.config.max_hops,
            parallel = self.config.parallel,
            "classifying relation pairs"
        );

        let (classified, summary) = if self.config.parallel {
            let classified: Vec<ClassifiedPair> = results
                .into_par_iter()
                .map(|result| {
                    let outcome = verifier.classify(&result);
                    ClassifiedPair { result, outcome }
                })
                .collect();
            let summary = classified
                .par_iter()
                .fold(
                    || ComparisonSummary::new(buckets),
                    |mut summary, pair| {
                        summary.record(pair);
                        summary
                    },
                )
                .reduce(|| ComparisonSummary::new(buckets), ComparisonSummary::merge);
            (classified, summary)
        } else {
            let total = results.len();
            let mut summary = ComparisonSummary::new(buckets);
            let mut classified = Vec::with_capacity(total);
            for (i, result) in results.into_iter().enumerate() {
                let outcome = verifier.classify(&result);
                let pair = ClassifiedPair { result, outcome };
                summary.record(&pair);
                classified.push(pair);
                if (i + 1) % 500 == 0 {
                    debug!(done = i + 1, total, "classification progress");
                }
            }
            (classified, summary)
        };

        let indicators = QualityIndicators::compute(
            &classified,
            &self.resources.wordnet,
            &self.normalizer,
            self.config.polysemy_threshold,
        );
        info!(
            total = summary.total,
            agree = summary.agree,
            disagree = summary.disagree,
            partial = summary.partial(),
            unmatchable = summary.unmatchable,
            self_match = summary.self_match_artifacts,
            skipped_pairs,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "classification complete"
        );

        ComparisonRun {
            relation: self.config.relation,
            max_hops: self.config.max_hops,
            matched_concepts: self.resolved.matched_count(),
            skipped_pairs,
            classified,
            summary,
            indicators,
        }
    }
}

/// Verdicts and tallies of one comparison run.
#[derive(Debug, Clone)]
pub struct ComparisonRun {
    pub relation: ConceptRelationKind,
    pub max_hops: usize,
    /// Ontology concepts with at least one candidate synset.
    pub matched_concepts: usize,
    /// Pairs dropped because a side referenced an unknown concept.
    pub skipped_pairs: usize,
    /// In ontology relation order.
    pub classified: Vec<ClassifiedPair>,
    pub summary: ComparisonSummary,
    pub indicators: QualityIndicators,
}

impl ComparisonRun {
    pub fn iter_category(&self, category: Category) -> impl Iterator<Item = &ClassifiedPair> {
        self.classified
            .iter()
            .filter(move |pair| pair.category() == category)
    }
}
